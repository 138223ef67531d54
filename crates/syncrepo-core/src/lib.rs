//! Template synchronization engine for syncrepo
//!
//! Keeps a local project in step with a template repository:
//!
//! - **ignore**: `.syncrepoignore` parsing and cascading match/negate evaluation
//! - **config**: the persisted remote [`Descriptor`] and its store
//! - **sync**: per-file classification, containment checks and effects
//! - **init**: first-time descriptor creation
//!
//! # Architecture
//!
//! ```text
//!                  syncrepo-cli
//!                       |
//!                 syncrepo-core
//!                   /       \
//!          syncrepo-fs   syncrepo-git
//! ```

pub mod config;
pub mod error;
pub mod ignore;
pub mod init;
pub mod sync;

pub use config::{Descriptor, DescriptorStore};
pub use error::{Error, Operation, Result};
pub use ignore::{IgnoreList, IgnoreRule};
pub use init::{InitRequest, init};
pub use sync::{
    ActionKind, Phase, ReportEntry, SkipReason, SyncAction, SyncEngine, SyncOptions, SyncReport,
};
