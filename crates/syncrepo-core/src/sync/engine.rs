//! SyncEngine implementation
//!
//! The engine runs one sequential pass: preconditions, descriptor load,
//! template fetch, per-path classification and effects, then the commit
//! pointer update. Any error aborts the pass; effects already applied stay.

use std::path::Path;

use syncrepo_fs::{NormalizedPath, SyncPath, io};
use syncrepo_git::{Blob, Gateway, TEMPLATE_REF, template_refspec};

use crate::config::{Descriptor, DescriptorStore};
use crate::error::Operation;
use crate::ignore::IgnoreList;
use crate::{Error, Result};

use super::action::{SkipReason, SyncAction};
use super::report::SyncReport;

/// Options for a sync run
#[derive(Debug, Clone, Copy, Default)]
pub struct SyncOptions {
    /// Proceed even when the working tree has uncommitted changes
    pub force: bool,
    /// Classify and report without writing, removing or updating the descriptor
    pub dry_run: bool,
}

/// Stage of a sync run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Fetching,
    Planning,
    Applying,
    Finalizing,
    Done,
    Aborted,
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Idle => "idle",
            Self::Fetching => "fetching",
            Self::Planning => "planning",
            Self::Applying => "applying",
            Self::Finalizing => "finalizing",
            Self::Done => "done",
            Self::Aborted => "aborted",
        };
        f.write_str(name)
    }
}

/// Tracks the current phase and logs each transition.
struct PhaseTracker {
    current: Phase,
}

impl PhaseTracker {
    fn new() -> Self {
        Self {
            current: Phase::Idle,
        }
    }

    fn enter(&mut self, next: Phase) {
        tracing::debug!(from = %self.current, to = %next, "Sync phase");
        self.current = next;
    }
}

/// Engine that keeps a project in step with its template repository
///
/// Generic over the [`Gateway`] so tests can substitute an in-memory backend.
pub struct SyncEngine<G> {
    /// Canonical project root
    root: NormalizedPath,
    gateway: G,
    store: DescriptorStore,
}

impl<G: Gateway> SyncEngine<G> {
    /// Create an engine for the project at `root`, using the default
    /// descriptor location inside it.
    ///
    /// # Errors
    ///
    /// Returns an error if `root` cannot be canonicalized.
    pub fn new(root: impl AsRef<Path>, gateway: G) -> Result<Self> {
        let root = NormalizedPath::canonical(root)?;
        let store = DescriptorStore::in_project(&root);
        Ok(Self {
            root,
            gateway,
            store,
        })
    }

    /// Use a descriptor stored somewhere other than the default location.
    pub fn with_store(mut self, store: DescriptorStore) -> Self {
        self.store = store;
        self
    }

    pub fn root(&self) -> &NormalizedPath {
        &self.root
    }

    pub fn store(&self) -> &DescriptorStore {
        &self.store
    }

    pub fn gateway(&self) -> &G {
        &self.gateway
    }

    /// Run one sync pass.
    ///
    /// # Errors
    ///
    /// Every error is fatal: precondition failures happen before any backend
    /// call, later failures leave already-applied effects in place.
    pub async fn sync(&self, options: &SyncOptions) -> Result<SyncReport> {
        self.sync_with_progress(options, |_| {}).await
    }

    /// Run one sync pass, calling `progress` for each classified path before
    /// its effect is applied.
    ///
    /// Every effect applied before an abort has been passed to `progress`.
    pub async fn sync_with_progress<F>(
        &self,
        options: &SyncOptions,
        mut progress: F,
    ) -> Result<SyncReport>
    where
        F: FnMut(&SyncAction),
    {
        let mut phase = PhaseTracker::new();
        match self.run(options, &mut phase, &mut progress).await {
            Ok(report) => {
                phase.enter(Phase::Done);
                Ok(report)
            }
            Err(e) => {
                tracing::debug!(phase = %phase.current, error = %e, "Sync aborted");
                phase.enter(Phase::Aborted);
                Err(e)
            }
        }
    }

    async fn run(
        &self,
        options: &SyncOptions,
        phase: &mut PhaseTracker,
        progress: &mut dyn FnMut(&SyncAction),
    ) -> Result<SyncReport> {
        self.check_preconditions(options).await?;
        let descriptor = self.store.load()?;

        phase.enter(Phase::Fetching);
        self.gateway
            .fetch_ref(&descriptor.remote, &template_refspec(&descriptor.branch))
            .await?;
        let ignore = self.load_ignore_list().await?;
        let files = self
            .gateway
            .list_tree(TEMPLATE_REF, descriptor.prefix())
            .await?;
        tracing::debug!(files = files.len(), rules = ignore.len(), "Fetched template tree");

        let mut report = SyncReport::new(options.dry_run);
        for file in files {
            if file == SyncPath::IgnoreFile.as_str() {
                continue;
            }

            phase.enter(Phase::Planning);
            let action = self.classify(&descriptor, &ignore, file).await?;
            log_action(&action);
            report.record(&action);
            progress(&action);

            if action.is_effect() && !options.dry_run {
                phase.enter(Phase::Applying);
                apply(action).await?;
            }
        }

        phase.enter(Phase::Finalizing);
        let commit = self
            .gateway
            .resolve_remote_head(&descriptor.remote, &descriptor.branch)
            .await?;
        if !options.dry_run {
            self.store.save(&descriptor.with_commit(commit.clone()))?;
        }
        tracing::debug!(commit = %commit, "Resolved template head");
        report.commit = Some(commit);

        Ok(report)
    }

    async fn check_preconditions(&self, options: &SyncOptions) -> Result<()> {
        let root = self.root.to_native();
        if !self.gateway.is_repository(&root).await {
            return Err(Error::precondition(
                "Not a git repository. The sync command must be run from within a git repository.",
                "Run 'git init' to initialize a git repository first.",
            ));
        }
        if !options.force && self.gateway.is_dirty(&root).await {
            return Err(Error::precondition(
                "Repository has uncommitted changes. Commit or stash your changes before syncing.",
                "Use --force or -f to override this check and proceed anyway.",
            ));
        }
        Ok(())
    }

    /// Read the exclusion file from the template root, ignoring any prefix.
    async fn load_ignore_list(&self) -> Result<IgnoreList> {
        match self
            .gateway
            .read_blob(TEMPLATE_REF, SyncPath::IgnoreFile.as_str())
            .await
        {
            Blob::Found(bytes) => Ok(IgnoreList::from_content(&String::from_utf8_lossy(&bytes))),
            Blob::NotFound => Ok(IgnoreList::empty()),
            Blob::Failed(e) => Err(e.into()),
        }
    }

    /// Decide what to do with one template path.
    ///
    /// Containment is verified before the local file is inspected, so an
    /// escaping path aborts the run even when no effect would follow.
    async fn classify(
        &self,
        descriptor: &Descriptor,
        ignore: &IgnoreList,
        path: String,
    ) -> Result<SyncAction> {
        if ignore.is_ignored(&path) {
            return Ok(SyncAction::Ignore { path });
        }

        let object = match descriptor.prefix() {
            Some(prefix) => format!("{}/{}", prefix, path),
            None => path.clone(),
        };

        match self.gateway.read_blob(TEMPLATE_REF, &object).await {
            Blob::Failed(e) => Err(e.into()),
            Blob::NotFound => {
                let target = self.contain(&path, Operation::Remove)?;
                if target.is_file() {
                    Ok(SyncAction::Remove { path, target })
                } else {
                    Ok(SyncAction::Skip {
                        path,
                        reason: SkipReason::Withdrawn,
                    })
                }
            }
            Blob::Found(content) => {
                let target = self.contain(&path, Operation::Write)?;
                match io::read_file_if_exists(&target).await? {
                    None => Ok(SyncAction::Create {
                        path,
                        target,
                        content,
                    }),
                    Some(local) if local == content => Ok(SyncAction::Skip {
                        path,
                        reason: SkipReason::Unchanged,
                    }),
                    Some(_) => Ok(SyncAction::OverwriteConflict {
                        path,
                        target,
                        content,
                    }),
                }
            }
        }
    }

    fn contain(&self, path: &str, operation: Operation) -> Result<NormalizedPath> {
        self.root.contain(path).map_err(|e| match e {
            syncrepo_fs::Error::PathEscapesRoot {
                path,
                resolved,
                root,
            } => Error::SecurityViolation {
                operation,
                path,
                resolved,
                root,
            },
            other => other.into(),
        })
    }
}

async fn apply(action: SyncAction) -> Result<()> {
    match action {
        SyncAction::Create {
            target, content, ..
        }
        | SyncAction::OverwriteConflict {
            target, content, ..
        } => io::write_atomic_async(target, content).await?,
        SyncAction::Remove { target, .. } => io::remove_file(&target).await?,
        SyncAction::Ignore { .. } | SyncAction::Skip { .. } => {}
    }
    Ok(())
}

fn log_action(action: &SyncAction) {
    let path = action.path();
    match action {
        SyncAction::Create { .. } => tracing::info!(path, "Creating"),
        SyncAction::OverwriteConflict { .. } => {
            tracing::warn!(path, "Overwriting; local changes will be lost")
        }
        SyncAction::Remove { .. } => tracing::warn!(path, "Removing; not found in template"),
        SyncAction::Ignore { .. } => tracing::info!(path, "Ignoring"),
        SyncAction::Skip { reason, .. } => tracing::debug!(path, ?reason, "Skipping"),
    }
}
