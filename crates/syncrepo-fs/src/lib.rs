//! Filesystem layer for syncrepo
//!
//! Provides normalized path handling, project-root containment checks and
//! atomic I/O used by the sync engine and the descriptor store.

pub mod config;
pub mod constants;
pub mod error;
pub mod io;
pub mod path;

pub use config::ConfigStore;
pub use constants::SyncPath;
pub use error::{Error, Result};
pub use path::NormalizedPath;
