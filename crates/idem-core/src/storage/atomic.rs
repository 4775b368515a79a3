//! Write-to-temp then rename.

use std::io;
use std::path::Path;
use tokio::fs;
use tokio::io::AsyncWriteExt;

use super::temp::temp_path;
use crate::error::FileSystemError;

/// Permission bits for newly written files (unix only).
pub const FILE_MODE: u32 = 0o644;

/// Atomically replace `final_path` with `data`.
///
/// The parent directory must already exist. On failure the temp file is
/// removed best-effort and the original target is left untouched.
pub async fn atomic_write(final_path: &Path, data: &[u8]) -> Result<(), FileSystemError> {
    let tmp = temp_path(final_path);
    if let Err(e) = write_then_rename(&tmp, final_path, data).await {
        if let Err(cleanup) = fs::remove_file(&tmp).await {
            tracing::debug!(
                "could not remove temp file {}: {}",
                tmp.display(),
                cleanup
            );
        }
        return Err(FileSystemError::new(
            format!("atomic write to {} failed", final_path.display()),
            final_path,
        )
        .with_source(e));
    }
    Ok(())
}

async fn write_then_rename(tmp: &Path, final_path: &Path, data: &[u8]) -> io::Result<()> {
    let mut options = fs::OpenOptions::new();
    options.write(true).create(true).truncate(true);
    #[cfg(unix)]
    options.mode(FILE_MODE);

    let mut file = options.open(tmp).await?;
    file.write_all(data).await?;
    file.sync_all().await?;
    drop(file);

    fs::rename(tmp, final_path).await
}
