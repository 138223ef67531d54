//! Persisted remote descriptor
//!
//! The descriptor records which template a project follows:
//!
//! ```json
//! {
//!   "remote": "https://github.com/example/template.git",
//!   "branch": "main",
//!   "commit": "3f1c...",
//!   "prefix": "templates/basic"
//! }
//! ```
//!
//! `commit` and `prefix` are optional. The record lives in `syncrepo.json` at
//! the project root unless another path is configured; `.toml` and `.yaml`
//! paths are stored in those formats.

mod descriptor;

pub use descriptor::{Descriptor, DescriptorStore};
