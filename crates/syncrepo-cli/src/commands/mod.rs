//! Command implementations

mod init;
mod sync;

pub use init::run_init;
pub use sync::run_sync;
