//! Gateway implementation backed by the `git` command line

use std::path::{Path, PathBuf};
use std::process::Stdio;

use async_trait::async_trait;
use tokio::process::Command;

use crate::gateway::{Blob, Gateway};
use crate::remote::parse_remote_head;
use crate::{Error, Result};

/// Runs one `git` subprocess per gateway operation.
#[derive(Debug, Clone)]
pub struct GitCli {
    /// Repository the fetched objects land in
    workdir: PathBuf,
}

impl GitCli {
    pub fn new(workdir: impl Into<PathBuf>) -> Self {
        Self {
            workdir: workdir.into(),
        }
    }

    pub fn workdir(&self) -> &Path {
        &self.workdir
    }

    /// Execute `git <args>` in `dir` and return stdout.
    ///
    /// Exit code 0 is success; anything else becomes
    /// [`Error::CommandFailed`] with the accumulated stderr.
    async fn exec_in(&self, dir: &Path, args: &[&str]) -> Result<Vec<u8>> {
        let owned_args = || args.iter().map(|a| a.to_string()).collect::<Vec<_>>();
        tracing::debug!(args = ?args, dir = %dir.display(), "Running git");

        let output = Command::new("git")
            .args(args)
            .current_dir(dir)
            .stdin(Stdio::null())
            .output()
            .await
            .map_err(|source| Error::Spawn {
                args: owned_args(),
                source,
            })?;

        if output.status.success() {
            Ok(output.stdout)
        } else {
            let code = output.status.code().unwrap_or(-1);
            let stderr = String::from_utf8_lossy(&output.stderr).to_string();
            tracing::debug!(args = ?args, code, stderr = %stderr.trim(), "git failed");
            Err(Error::CommandFailed {
                args: owned_args(),
                code,
                stderr,
            })
        }
    }

    async fn exec(&self, args: &[&str]) -> Result<Vec<u8>> {
        self.exec_in(&self.workdir, args).await
    }
}

fn utf8(args: &[&str], bytes: Vec<u8>) -> Result<String> {
    String::from_utf8(bytes).map_err(|e| Error::MalformedOutput {
        args: args.iter().map(|a| a.to_string()).collect(),
        message: e.to_string(),
    })
}

/// Trim surrounding slashes; an empty prefix means the tree root.
fn normalize_prefix(prefix: Option<&str>) -> Option<&str> {
    prefix.map(|p| p.trim_matches('/')).filter(|p| !p.is_empty())
}

#[async_trait]
impl Gateway for GitCli {
    async fn resolve_remote_head(&self, url: &str, branch: &str) -> Result<String> {
        let args = ["ls-remote", url, branch];
        let output = utf8(&args, self.exec(&args).await?)?;

        parse_remote_head(&output, branch).ok_or_else(|| Error::RemoteResolution {
            remote: url.to_string(),
            branch: branch.to_string(),
        })
    }

    async fn fetch_ref(&self, url: &str, refspec: &str) -> Result<()> {
        self.exec(&["fetch", "--no-tags", url, refspec]).await?;
        Ok(())
    }

    async fn list_tree(&self, reference: &str, prefix: Option<&str>) -> Result<Vec<String>> {
        let tree = match normalize_prefix(prefix) {
            Some(prefix) => format!("{}:{}", reference, prefix),
            None => reference.to_string(),
        };
        let args = ["ls-tree", "-r", "-z", "--name-only", tree.as_str()];
        let output = utf8(&args, self.exec(&args).await?)?;

        Ok(output
            .split('\0')
            .filter(|entry| !entry.is_empty())
            .map(str::to_string)
            .collect())
    }

    async fn read_blob(&self, reference: &str, path: &str) -> Blob {
        let object = format!("{}:{}", reference, path);
        match self.exec(&["cat-file", "blob", object.as_str()]).await {
            Ok(bytes) => Blob::Found(bytes),
            Err(e) if e.is_object_not_found() => Blob::NotFound,
            Err(e) => Blob::Failed(e),
        }
    }

    async fn is_repository(&self, root: &Path) -> bool {
        self.exec_in(root, &["rev-parse", "--git-dir"]).await.is_ok()
    }

    async fn is_dirty(&self, root: &Path) -> bool {
        match self.exec_in(root, &["status", "--porcelain"]).await {
            Ok(output) => !String::from_utf8_lossy(&output).trim().is_empty(),
            Err(e) => {
                tracing::warn!(error = %e, "Dirty check failed; treating tree as dirty");
                true
            }
        }
    }
}
