//! Normalized path handling and project-root containment

use std::path::{Path, PathBuf};

use crate::{Error, Result};

/// A path normalized to use forward slashes internally.
///
/// Dot segments are resolved at construction time, so `a/../b` becomes `b`
/// and `/a/b/../../c` becomes `/c`. Leading `..` segments of a relative path
/// are dropped. Conversion to a platform-native path happens only at I/O
/// boundaries.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NormalizedPath {
    /// Internal representation always uses forward slashes
    inner: String,
}

impl NormalizedPath {
    /// Create a new NormalizedPath from any path-like input.
    pub fn new(path: impl AsRef<Path>) -> Self {
        let raw = path.as_ref().to_string_lossy();
        Self {
            inner: clean(&raw),
        }
    }

    /// Resolve symlinks and make the path absolute.
    pub fn canonical(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let real = dunce::canonicalize(path).map_err(|e| Error::io(path, e))?;
        Ok(Self::new(real))
    }

    /// Get the internal normalized string representation.
    pub fn as_str(&self) -> &str {
        &self.inner
    }

    /// Convert to a platform-native PathBuf for I/O operations.
    pub fn to_native(&self) -> PathBuf {
        PathBuf::from(&self.inner)
    }

    /// Join this path with a segment, resolving dot segments.
    pub fn join(&self, segment: &str) -> Self {
        let joined = if self.inner.ends_with('/') {
            format!("{}{}", self.inner, segment)
        } else {
            format!("{}/{}", self.inner, segment)
        };
        Self::new(joined)
    }

    /// Get the parent directory.
    pub fn parent(&self) -> Option<Self> {
        let trimmed = self.inner.trim_end_matches('/');
        match trimmed.rfind('/') {
            Some(idx) if idx > 0 => Some(Self {
                inner: trimmed[..idx].to_string(),
            }),
            Some(0) if trimmed.len() > 1 => Some(Self {
                inner: "/".to_string(),
            }),
            _ => None,
        }
    }

    /// Get the file name component.
    pub fn file_name(&self) -> Option<&str> {
        let trimmed = self.inner.trim_end_matches('/');
        trimmed.rsplit('/').next().filter(|name| !name.is_empty())
    }

    /// Get the extension if present.
    pub fn extension(&self) -> Option<&str> {
        self.file_name().and_then(|name| {
            let idx = name.rfind('.')?;
            if idx == 0 {
                None
            } else {
                Some(&name[idx + 1..])
            }
        })
    }

    /// Check if this path exists on the filesystem.
    pub fn exists(&self) -> bool {
        self.to_native().exists()
    }

    /// Check if this is a regular file (symlinks are followed).
    pub fn is_file(&self) -> bool {
        self.to_native().is_file()
    }

    /// Check if this path lies strictly beneath `root`.
    ///
    /// The root itself is not considered to be within the root.
    pub fn is_within(&self, root: &NormalizedPath) -> bool {
        let root = root.inner.trim_end_matches('/');
        self.inner.len() > root.len()
            && self.inner.starts_with(root)
            && self.inner[root.len()..].starts_with('/')
    }

    /// Map a relative path onto this root and verify it stays inside.
    ///
    /// `self` must be the canonical project root. The check is done twice:
    /// lexically on the joined path, then physically on the deepest existing
    /// ancestor so a symlinked directory cannot redirect the target outside
    /// the root. The final component is not followed, which keeps removals
    /// and renames acting on the link itself.
    pub fn contain(&self, relative: &str) -> Result<NormalizedPath> {
        let escapes = |resolved: PathBuf| Error::PathEscapesRoot {
            path: relative.to_string(),
            resolved,
            root: self.to_native(),
        };

        let candidate = self.join(relative);
        if !candidate.is_within(self) {
            return Err(escapes(candidate.to_native()));
        }

        let mut ancestor = candidate.parent();
        while let Some(dir) = ancestor {
            if std::fs::symlink_metadata(dir.to_native()).is_ok() {
                let real = Self::canonical(dir.to_native())?;
                if real != *self && !real.is_within(self) {
                    return Err(escapes(real.to_native()));
                }
                break;
            }
            ancestor = dir.parent();
        }

        Ok(candidate)
    }
}

/// Unify separators, drop empty and `.` segments, and resolve `..`.
///
/// A leading `//` (UNC-style network path) is preserved.
fn clean(raw: &str) -> String {
    let unified = raw.replace('\\', "/");

    let (prefix, rest) = if unified.starts_with("//") && !unified.starts_with("///") {
        ("//", &unified[2..])
    } else if unified.starts_with('/') {
        ("/", unified.trim_start_matches('/'))
    } else {
        ("", unified.as_str())
    };

    let mut parts: Vec<&str> = Vec::new();
    for component in rest.split('/') {
        match component {
            "" | "." => {}
            ".." => {
                parts.pop();
            }
            other => parts.push(other),
        }
    }

    format!("{}{}", prefix, parts.join("/"))
}

impl AsRef<Path> for NormalizedPath {
    fn as_ref(&self) -> &Path {
        Path::new(&self.inner)
    }
}

impl std::fmt::Display for NormalizedPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.inner)
    }
}

impl From<&str> for NormalizedPath {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for NormalizedPath {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

impl From<PathBuf> for NormalizedPath {
    fn from(p: PathBuf) -> Self {
        Self::new(p)
    }
}

impl From<&Path> for NormalizedPath {
    fn from(p: &Path) -> Self {
        Self::new(p)
    }
}
