//! First-time descriptor creation

use syncrepo_git::{Gateway, is_git_remote};

use crate::config::{Descriptor, DescriptorStore};
use crate::{Error, Result};

/// Parameters for [`init`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InitRequest {
    pub remote: String,
    pub branch: String,
    /// Template subdirectory to sync from
    pub prefix: Option<String>,
}

impl InitRequest {
    pub fn new(remote: impl Into<String>, branch: impl Into<String>) -> Self {
        Self {
            remote: remote.into(),
            branch: branch.into(),
            prefix: None,
        }
    }

    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = Some(prefix.into());
        self
    }
}

/// Resolve the template head and write the initial descriptor.
///
/// Only a ref query is made; no template content is fetched.
///
/// # Errors
///
/// - [`Error::InvalidRemote`] if the remote is a local path
/// - [`Error::Config`] if the branch is empty
/// - [`Error::RemoteResolution`] if no commit hash is found for the branch
pub async fn init<G: Gateway + ?Sized>(
    gateway: &G,
    store: &DescriptorStore,
    request: InitRequest,
) -> Result<Descriptor> {
    if !is_git_remote(&request.remote) {
        return Err(Error::InvalidRemote {
            remote: request.remote,
        });
    }
    if request.branch.trim().is_empty() {
        return Err(Error::Config {
            path: store.path().to_native(),
            message: "Missing or invalid 'branch' field.".into(),
        });
    }

    let commit = gateway
        .resolve_remote_head(&request.remote, &request.branch)
        .await?;

    let descriptor = Descriptor::new(request.remote, request.branch)
        .with_prefix(request.prefix.filter(|p| !p.trim_matches('/').is_empty()))
        .with_commit(commit);
    store.save(&descriptor)?;

    tracing::info!(
        remote = %descriptor.remote,
        branch = %descriptor.branch,
        commit = ?descriptor.commit,
        "Initialized template descriptor"
    );
    Ok(descriptor)
}
