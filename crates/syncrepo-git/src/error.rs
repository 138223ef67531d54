//! Error types for syncrepo-git

/// Result type for syncrepo-git operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while talking to the version-control backend
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The backend exited with a non-zero status.
    #[error("git {} failed (exit code {code}): {}", args.join(" "), stderr.trim())]
    CommandFailed {
        args: Vec<String>,
        code: i32,
        stderr: String,
    },

    /// The backend executable could not be started.
    #[error("Failed to run git {}: {source}", args.join(" "))]
    Spawn {
        args: Vec<String>,
        #[source]
        source: std::io::Error,
    },

    /// No commit hash could be resolved for the branch.
    #[error("No commit hash found for branch \"{branch}\" in remote \"{remote}\"")]
    RemoteResolution { remote: String, branch: String },

    /// The backend produced output that could not be interpreted.
    #[error("Unexpected output from git {}: {message}", args.join(" "))]
    MalformedOutput { args: Vec<String>, message: String },
}

impl Error {
    /// Whether the failure is git's "object not found" signature.
    ///
    /// Git reports a missing path or object with exit status 128 and a
    /// `fatal:` diagnostic.
    pub fn is_object_not_found(&self) -> bool {
        match self {
            Self::CommandFailed { code, stderr, .. } => {
                *code == 128 || stderr.to_lowercase().contains("fatal")
            }
            _ => false,
        }
    }
}
