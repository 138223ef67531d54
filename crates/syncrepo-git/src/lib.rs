//! Backend gateway for syncrepo
//!
//! The sync engine talks to the template repository only through the
//! [`Gateway`] trait. [`GitCli`] implements it by invoking the `git`
//! command line, one subprocess per operation.

pub mod error;
pub mod gateway;
pub mod git_cli;
pub mod remote;

pub use error::{Error, Result};
pub use gateway::{Blob, Gateway, TEMPLATE_REF, template_refspec};
pub use git_cli::GitCli;
pub use remote::is_git_remote;
