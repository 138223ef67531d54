//! Sync planner and executor
//!
//! [`SyncEngine::sync`] fetches the template, classifies every listed path
//! into a [`SyncAction`], checks containment, applies the effect and
//! collects a [`SyncReport`].

mod action;
mod engine;
mod report;

pub use action::{ActionKind, SkipReason, SyncAction};
pub use engine::{Phase, SyncEngine, SyncOptions};
pub use report::{ReportEntry, SyncReport};
