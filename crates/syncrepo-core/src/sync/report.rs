//! Summary of one sync run

use serde::{Deserialize, Serialize};

use super::action::{ActionKind, SkipReason, SyncAction};

/// One classified path, in tree-listing order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportEntry {
    pub path: String,
    pub kind: ActionKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<SkipReason>,
}

/// Report produced once per sync run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyncReport {
    /// No effects were applied and the descriptor was not updated
    pub dry_run: bool,
    /// Head commit resolved after the file effects
    pub commit: Option<String>,
    /// Every processed path in listing order
    pub entries: Vec<ReportEntry>,
}

impl SyncReport {
    pub fn new(dry_run: bool) -> Self {
        Self {
            dry_run,
            ..Self::default()
        }
    }

    /// Record a classified action.
    pub fn record(&mut self, action: &SyncAction) {
        let reason = match action {
            SyncAction::Skip { reason, .. } => Some(*reason),
            _ => None,
        };
        self.entries.push(ReportEntry {
            path: action.path().to_string(),
            kind: action.kind(),
            reason,
        });
    }

    pub fn count(&self, kind: ActionKind) -> usize {
        self.entries.iter().filter(|e| e.kind == kind).count()
    }

    /// Paths with the given action, in listing order.
    pub fn paths(&self, kind: ActionKind) -> Vec<&str> {
        self.entries
            .iter()
            .filter(|e| e.kind == kind)
            .map(|e| e.path.as_str())
            .collect()
    }

    pub fn created(&self) -> usize {
        self.count(ActionKind::Create)
    }

    pub fn overwritten(&self) -> usize {
        self.count(ActionKind::OverwriteConflict)
    }

    pub fn removed(&self) -> usize {
        self.count(ActionKind::Remove)
    }

    pub fn ignored(&self) -> usize {
        self.count(ActionKind::Ignore)
    }

    /// Paths whose local bytes already matched the template.
    pub fn unchanged(&self) -> usize {
        self.entries
            .iter()
            .filter(|e| e.reason == Some(SkipReason::Unchanged))
            .count()
    }

    /// Whether any path produced a filesystem effect.
    pub fn has_changes(&self) -> bool {
        self.created() + self.overwritten() + self.removed() > 0
    }

    /// One-line count summary.
    pub fn summary(&self) -> String {
        format!(
            "{} created, {} overwritten, {} removed, {} ignored, {} unchanged",
            self.created(),
            self.overwritten(),
            self.removed(),
            self.ignored(),
            self.unchanged()
        )
    }
}
