//! Descriptor type and its on-disk store

use std::path::Path;

use serde::{Deserialize, Serialize};
use syncrepo_fs::{ConfigStore, NormalizedPath, SyncPath};
use syncrepo_git::is_git_remote;

use crate::{Error, Result};

/// Template remote, branch, optional prefix and last synced commit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Descriptor {
    /// Network URL of the template repository
    pub remote: String,
    /// Template branch to follow
    pub branch: String,
    /// Head commit recorded after the last complete sync
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub commit: Option<String>,
    /// Subdirectory of the template used as the sync root
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prefix: Option<String>,
    /// Fields this tool does not know about, written back unchanged
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl Descriptor {
    pub fn new(remote: impl Into<String>, branch: impl Into<String>) -> Self {
        Self {
            remote: remote.into(),
            branch: branch.into(),
            commit: None,
            prefix: None,
            extra: serde_json::Map::new(),
        }
    }

    pub fn with_prefix(mut self, prefix: Option<String>) -> Self {
        self.prefix = prefix;
        self
    }

    pub fn with_commit(mut self, commit: impl Into<String>) -> Self {
        self.commit = Some(commit.into());
        self
    }

    /// Prefix with surrounding slashes removed; `None` for the template root.
    pub fn prefix(&self) -> Option<&str> {
        self.prefix
            .as_deref()
            .map(|p| p.trim_matches('/'))
            .filter(|p| !p.is_empty())
    }

    /// Check required fields. Returns the problem description on failure.
    pub fn validate(&self) -> std::result::Result<(), String> {
        if self.remote.trim().is_empty() {
            return Err("Missing or invalid 'remote' field.".into());
        }
        if self.branch.trim().is_empty() {
            return Err("Missing or invalid 'branch' field.".into());
        }
        if !is_git_remote(&self.remote) {
            return Err(
                "'remote' field must be a valid git URL (http://, https://, or git@).".into(),
            );
        }
        Ok(())
    }
}

/// On-disk shape; required fields are optional here so a missing field gets
/// a targeted message instead of a generic parse error.
#[derive(Debug, Deserialize)]
struct RawDescriptor {
    remote: Option<String>,
    branch: Option<String>,
    commit: Option<String>,
    prefix: Option<String>,
    #[serde(flatten)]
    extra: serde_json::Map<String, serde_json::Value>,
}

/// Reads and writes the descriptor record.
#[derive(Debug, Clone)]
pub struct DescriptorStore {
    path: NormalizedPath,
    store: ConfigStore,
}

impl DescriptorStore {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: NormalizedPath::new(path),
            store: ConfigStore::new(),
        }
    }

    /// Store at the default location inside `root`.
    pub fn in_project(root: &NormalizedPath) -> Self {
        Self {
            path: root.join(SyncPath::Descriptor.as_str()),
            store: ConfigStore::new(),
        }
    }

    pub fn path(&self) -> &NormalizedPath {
        &self.path
    }

    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    /// Load and validate the descriptor.
    pub fn load(&self) -> Result<Descriptor> {
        if !self.path.exists() {
            return Err(Error::ConfigNotFound {
                path: self.path.to_native(),
            });
        }

        let raw: RawDescriptor = self.store.load(&self.path).map_err(|e| match e {
            syncrepo_fs::Error::ConfigParse { format, message, .. } => Error::Config {
                path: self.path.to_native(),
                message: format!("invalid {} ({})", format, message),
            },
            other => other.into(),
        })?;

        let descriptor = Descriptor {
            remote: raw.remote.unwrap_or_default(),
            branch: raw.branch.unwrap_or_default(),
            commit: raw.commit,
            prefix: raw.prefix,
            extra: raw.extra,
        };
        descriptor.validate().map_err(|message| Error::Config {
            path: self.path.to_native(),
            message,
        })?;

        Ok(descriptor)
    }

    /// Persist the descriptor atomically.
    pub fn save(&self, descriptor: &Descriptor) -> Result<()> {
        self.store.save(&self.path, descriptor)?;
        tracing::debug!(path = %self.path, commit = ?descriptor.commit, "Saved descriptor");
        Ok(())
    }
}
