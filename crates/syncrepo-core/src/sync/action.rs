//! Per-file sync classification

use serde::{Deserialize, Serialize};
use syncrepo_fs::NormalizedPath;

/// Why a path produced no effect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    /// Local bytes already equal the template bytes
    Unchanged,
    /// Template content is unreadable and there is no local file to remove
    Withdrawn,
}

/// Action computed for one template path. Never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncAction {
    /// No local file; write the template content
    Create {
        path: String,
        target: NormalizedPath,
        content: Vec<u8>,
    },
    /// Local file differs; replace it with the template content
    OverwriteConflict {
        path: String,
        target: NormalizedPath,
        content: Vec<u8>,
    },
    /// Template content withdrawn; delete the local file
    Remove { path: String, target: NormalizedPath },
    /// Excluded by `.syncrepoignore`; local file is left alone
    Ignore { path: String },
    /// Nothing to do
    Skip { path: String, reason: SkipReason },
}

impl SyncAction {
    /// Template-relative path this action was computed for.
    pub fn path(&self) -> &str {
        match self {
            Self::Create { path, .. }
            | Self::OverwriteConflict { path, .. }
            | Self::Remove { path, .. }
            | Self::Ignore { path }
            | Self::Skip { path, .. } => path,
        }
    }

    pub fn kind(&self) -> ActionKind {
        match self {
            Self::Create { .. } => ActionKind::Create,
            Self::OverwriteConflict { .. } => ActionKind::OverwriteConflict,
            Self::Remove { .. } => ActionKind::Remove,
            Self::Ignore { .. } => ActionKind::Ignore,
            Self::Skip { .. } => ActionKind::Skip,
        }
    }

    /// Whether applying this action touches the filesystem.
    pub fn is_effect(&self) -> bool {
        matches!(
            self,
            Self::Create { .. } | Self::OverwriteConflict { .. } | Self::Remove { .. }
        )
    }
}

/// Discriminant of [`SyncAction`] used in reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionKind {
    Create,
    OverwriteConflict,
    Remove,
    Ignore,
    Skip,
}

impl std::fmt::Display for ActionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Create => write!(f, "create"),
            Self::OverwriteConflict => write!(f, "overwrite"),
            Self::Remove => write!(f, "remove"),
            Self::Ignore => write!(f, "ignore"),
            Self::Skip => write!(f, "skip"),
        }
    }
}
