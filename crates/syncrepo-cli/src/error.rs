//! Error types for syncrepo-cli

/// Result type for CLI operations
pub type Result<T> = std::result::Result<T, CliError>;

/// Errors that can occur in CLI operations
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    /// Error from syncrepo-core
    #[error(transparent)]
    Core(#[from] syncrepo_core::Error),

    /// Standard I/O error
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Report could not be rendered
    #[error("Failed to render report: {0}")]
    Json(#[from] serde_json::Error),
}

impl CliError {
    /// Remediation hint printed under the error.
    pub fn hint(&self) -> Option<&str> {
        match self {
            Self::Core(e) => e.hint(),
            Self::Io(_) | Self::Json(_) => None,
        }
    }
}
