//! Writing fetched pictures to storage.

use std::path::Path;

use tokio::fs;
use tracing::debug;

use super::DownloadError;

/// Writes `bytes` to `path`, creating missing parent directories first.
///
/// Existing directories are fine. An existing file at `path` is replaced;
/// callers pick `path` so that only happens for static name templates.
///
/// # Errors
///
/// Returns [`DownloadError::Io`] when a directory cannot be created or the
/// file cannot be written.
pub async fn write_picture(path: &Path, bytes: &[u8]) -> Result<(), DownloadError> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)
            .await
            .map_err(|e| DownloadError::io(parent, e))?;
    }

    fs::write(path, bytes)
        .await
        .map_err(|e| DownloadError::io(path, e))?;
    debug!(path = %path.display(), bytes = bytes.len(), "picture written");
    Ok(())
}
