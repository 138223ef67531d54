//! Gateway trait consumed by the sync engine

use std::path::Path;

use async_trait::async_trait;

use crate::{Error, Result};

/// Private ref the template branch is fetched into.
///
/// Lives outside `refs/heads` and `refs/remotes` so user refs are never touched.
pub const TEMPLATE_REF: &str = "refs/syncrepo/fetch/template";

/// Refspec that force-updates [`TEMPLATE_REF`] from `branch`.
pub fn template_refspec(branch: &str) -> String {
    format!("+refs/heads/{}:{}", branch, TEMPLATE_REF)
}

/// Outcome of reading a blob from a tree.
#[derive(Debug)]
pub enum Blob {
    /// The blob exists; raw bytes.
    Found(Vec<u8>),
    /// The path is listed but its content cannot be retrieved.
    ///
    /// Callers treat this as "file withdrawn", never as empty content.
    NotFound,
    /// Any other backend failure.
    Failed(Error),
}

/// Trait for template repository access.
///
/// Implementations may use a subprocess, a library binding or an in-memory
/// fixture; the sync engine depends only on this contract.
#[async_trait]
pub trait Gateway: Send + Sync {
    /// Resolve the current head commit of `branch` at `url` without fetching content.
    async fn resolve_remote_head(&self, url: &str, branch: &str) -> Result<String>;

    /// Fetch `refspec` from `url` into the local object store.
    async fn fetch_ref(&self, url: &str, refspec: &str) -> Result<()>;

    /// List files (recursive, files only) under `prefix` at `reference`.
    ///
    /// Returned paths are relative to the prefix, in backend listing order.
    async fn list_tree(&self, reference: &str, prefix: Option<&str>) -> Result<Vec<String>>;

    /// Read the blob at `path` (relative to the tree root) from `reference`.
    async fn read_blob(&self, reference: &str, path: &str) -> Blob;

    /// Whether `root` is inside a version-controlled repository.
    async fn is_repository(&self, root: &Path) -> bool;

    /// Whether `root` has uncommitted changes. If the status check itself fails, report dirty.
    async fn is_dirty(&self, root: &Path) -> bool;
}
