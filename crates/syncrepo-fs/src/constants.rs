//! Well-known file names used by syncrepo.

use std::path::Path;

/// Standard syncrepo filesystem markers and paths.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncPath {
    /// The persisted remote descriptor in the project root
    Descriptor,
    /// The exclusion file at the template repository root
    IgnoreFile,
}

impl SyncPath {
    /// Get the string representation of the path.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Descriptor => "syncrepo.json",
            Self::IgnoreFile => ".syncrepoignore",
        }
    }
}

impl AsRef<Path> for SyncPath {
    fn as_ref(&self) -> &Path {
        Path::new(self.as_str())
    }
}

impl AsRef<str> for SyncPath {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl std::fmt::Display for SyncPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
