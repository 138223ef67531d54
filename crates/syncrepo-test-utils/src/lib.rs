//! Shared test utilities for the syncrepo workspace.
//!
//! Dev-dependency only, never published.
//!
//! # Modules
//!
//! - [`git`]: git CLI helpers and the [`git::TemplateRepo`] fixture
//! - [`project`]: [`project::TestProject`] builder for a local project under sync

pub mod git;
pub mod project;
