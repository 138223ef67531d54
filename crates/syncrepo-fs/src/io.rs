//! Atomic I/O operations with file locking

use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::Path;

use fs2::FileExt;

use crate::{Error, NormalizedPath, Result};

/// Write content atomically to a file with locking.
///
/// Parent directories are created as needed. Content goes to a temp file in
/// the same directory, is flushed, then renamed over the target, so readers
/// see either the old or the new content. An existing target keeps its
/// permissions. The temp file is removed on every failure path.
pub fn write_atomic(path: &NormalizedPath, content: &[u8]) -> Result<()> {
    let native_path = path.to_native();

    if let Some(parent) = native_path.parent() {
        fs::create_dir_all(parent).map_err(|e| Error::io(parent, e))?;
    }

    // Same directory keeps the rename on one filesystem
    let temp_name = format!(
        ".{}.{}.tmp",
        native_path
            .file_name()
            .map(|n| n.to_string_lossy())
            .unwrap_or_default(),
        std::process::id()
    );
    let temp_path = native_path.with_file_name(&temp_name);

    let temp_file = OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(&temp_path)
        .map_err(|e| Error::io(&temp_path, e))?;

    let result = fill_temp(temp_file, &temp_path, &native_path, content).and_then(|()| {
        fs::rename(&temp_path, &native_path).map_err(|e| Error::io(&native_path, e))
    });
    if result.is_err() {
        let _ = fs::remove_file(&temp_path);
        return result;
    }

    tracing::trace!(path = %path, bytes = content.len(), "Wrote file atomically");
    Ok(())
}

/// Lock, write and flush the temp file, copying the target's permissions.
fn fill_temp(mut temp_file: File, temp_path: &Path, target: &Path, content: &[u8]) -> Result<()> {
    temp_file.lock_exclusive().map_err(|_| Error::LockFailed {
        path: target.to_path_buf(),
    })?;

    temp_file
        .write_all(content)
        .map_err(|e| Error::io(temp_path, e))?;

    if let Ok(existing) = fs::metadata(target) {
        temp_file
            .set_permissions(existing.permissions())
            .map_err(|e| Error::io(temp_path, e))?;
    }

    temp_file.sync_all().map_err(|e| Error::io(temp_path, e))?;

    temp_file.unlock().map_err(|_| Error::LockFailed {
        path: target.to_path_buf(),
    })
}

/// Async wrapper around [`write_atomic`] that runs on the blocking pool.
pub async fn write_atomic_async(path: NormalizedPath, content: Vec<u8>) -> Result<()> {
    let native = path.to_native();
    tokio::task::spawn_blocking(move || write_atomic(&path, &content))
        .await
        .map_err(|e| Error::io(native, std::io::Error::other(e)))?
}

/// Read text content from a file.
pub fn read_text(path: &NormalizedPath) -> Result<String> {
    let native_path = path.to_native();
    fs::read_to_string(&native_path).map_err(|e| Error::io(&native_path, e))
}

/// Read a regular file's bytes, returning `None` when no regular file exists.
///
/// A directory at `path` counts as absent. Other read failures propagate.
pub async fn read_file_if_exists(path: &NormalizedPath) -> Result<Option<Vec<u8>>> {
    let native_path = path.to_native();
    match tokio::fs::metadata(&native_path).await {
        Ok(meta) if meta.is_file() => {}
        Ok(_) => return Ok(None),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(Error::io(native_path, e)),
    }

    tokio::fs::read(&native_path)
        .await
        .map(Some)
        .map_err(|e| Error::io(native_path, e))
}

/// Remove a file.
pub async fn remove_file(path: &NormalizedPath) -> Result<()> {
    let native_path = path.to_native();
    tokio::fs::remove_file(&native_path)
        .await
        .map_err(|e| Error::io(native_path, e))
}
