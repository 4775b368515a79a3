//! Hash, compare, and replace only on change.

use std::io;
use std::path::Path;
use tokio::fs;

use super::types::{WriteData, WriteOperation, WriteOptions, WriteResult};
use crate::checksum::HashAlgorithm;
use crate::error::FileSystemError;
use crate::storage;

/// Write `data` to `path` unless the file already holds exactly those bytes.
///
/// Returns [`WriteOperation::NoChange`] without touching the file (mtime and
/// permissions are preserved) when the digests match. Otherwise creates the
/// parent directory if needed and atomically replaces the target.
pub async fn idempotent_write(
    path: impl AsRef<Path>,
    data: impl Into<WriteData>,
    options: &WriteOptions,
) -> Result<WriteResult, FileSystemError> {
    let path = path.as_ref();
    let buffer = data.into().into_bytes(options.encoding).map_err(|e| {
        FileSystemError::new(
            format!("failed to encode content for {} as {}", path.display(), options.encoding),
            path,
        )
        .with_source(e)
    })?;

    let algorithm = options.algorithm;
    let (current, new) = tokio::join!(existing_digest(path, algorithm), async {
        algorithm.digest_hex(&buffer)
    });
    let current = current?;

    if current.as_deref() == Some(new.as_str()) {
        tracing::debug!("{} unchanged ({} {})", path.display(), algorithm, new);
        return Ok(WriteResult {
            operation: WriteOperation::NoChange,
            path: path.to_path_buf(),
        });
    }

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).await.map_err(|e| {
            FileSystemError::new(format!("failed to create directory {}", parent.display()), path)
                .with_source(e)
        })?;
    }
    storage::atomic_write(path, &buffer).await?;

    let operation = if current.is_some() {
        WriteOperation::Updated
    } else {
        WriteOperation::Created
    };
    tracing::debug!("{} {} ({} bytes)", operation, path.display(), buffer.len());
    Ok(WriteResult {
        operation,
        path: path.to_path_buf(),
    })
}

/// Digest of the file at `path`, or `None` if it does not exist.
async fn existing_digest(
    path: &Path,
    algorithm: HashAlgorithm,
) -> Result<Option<String>, FileSystemError> {
    match fs::read(path).await {
        Ok(bytes) => Ok(Some(algorithm.digest_hex(&bytes))),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(FileSystemError::new(
            format!("failed to read file for hashing: {}", path.display()),
            path,
        )
        .with_source(e)),
    }
}
