//! Error types for syncrepo-core

use std::path::PathBuf;

/// Result type for syncrepo-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Filesystem effect a containment check guards.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Write,
    Remove,
}

impl std::fmt::Display for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Write => write!(f, "write"),
            Self::Remove => write!(f, "remove"),
        }
    }
}

/// Errors that can occur in syncrepo-core operations.
///
/// Every variant is fatal to the invocation that raised it.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Descriptor fields are missing or invalid, or the record cannot be parsed
    #[error("Invalid config {}: {message}", path.display())]
    Config { path: PathBuf, message: String },

    /// Descriptor file does not exist
    #[error("Configuration file not found: {}", path.display())]
    ConfigNotFound { path: PathBuf },

    /// Template remote is a local path or otherwise not a network URL
    #[error("Local template remotes are not supported: \"{remote}\"")]
    InvalidRemote { remote: String },

    /// Working tree is not a repository, or is dirty without force
    #[error("{message}")]
    Precondition { message: String, hint: String },

    /// Unmapped backend failure
    #[error(transparent)]
    Backend(syncrepo_git::Error),

    /// A template path resolved outside the project root
    #[error(
        "Security error: the template tried to {operation} a file outside your project directory\n  File path: \"{path}\"\n  Resolved path: \"{}\"\n  Project root: \"{}\"",
        resolved.display(),
        root.display()
    )]
    SecurityViolation {
        operation: Operation,
        path: String,
        resolved: PathBuf,
        root: PathBuf,
    },

    /// No commit hash resolvable for the branch
    #[error("No commit hash found for branch \"{branch}\" in remote \"{remote}\"")]
    RemoteResolution { remote: String, branch: String },

    /// Filesystem error from syncrepo-fs
    #[error(transparent)]
    Fs(#[from] syncrepo_fs::Error),
}

impl Error {
    pub fn precondition(message: impl Into<String>, hint: impl Into<String>) -> Self {
        Self::Precondition {
            message: message.into(),
            hint: hint.into(),
        }
    }

    /// Remediation shown to the user alongside the error.
    pub fn hint(&self) -> Option<&str> {
        match self {
            Self::Config { .. } | Self::ConfigNotFound { .. } => {
                Some("Run 'syncrepo init --remote <url>' to initialize.")
            }
            Self::InvalidRemote { .. } => {
                Some("Use a network URL (http://, https://, or git@).")
            }
            Self::Precondition { hint, .. } => Some(hint.as_str()),
            Self::SecurityViolation { .. } => Some(
                "This is blocked to protect files outside your project. Check the template repository for paths containing \"../\" or symlinked directories.",
            ),
            Self::RemoteResolution { .. } => {
                Some("Check that the branch exists and the remote is accessible.")
            }
            Self::Backend(_) | Self::Fs(_) => None,
        }
    }
}

impl From<syncrepo_git::Error> for Error {
    fn from(error: syncrepo_git::Error) -> Self {
        match error {
            syncrepo_git::Error::RemoteResolution { remote, branch } => {
                Self::RemoteResolution { remote, branch }
            }
            other => Self::Backend(other),
        }
    }
}
