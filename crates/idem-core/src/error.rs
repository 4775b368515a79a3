//! Error taxonomy shared by both engines.
//!
//! Primitive failures (OS errors, transport faults, encoding problems) are
//! always wrapped into [`FileSystemError`] or [`NetworkError`] before they
//! leave the crate, so callers never match on raw `io::Error`s.

use std::error::Error as StdError;
use std::path::{Path, PathBuf};

/// Boxed underlying cause carried by the error types.
pub type BoxError = Box<dyn StdError + Send + Sync + 'static>;

/// Any failure produced by this crate.
#[derive(Debug, thiserror::Error)]
pub enum IdempotencyError {
    #[error(transparent)]
    FileSystem(#[from] FileSystemError),
    #[error(transparent)]
    Network(#[from] NetworkError),
}

impl IdempotencyError {
    /// The underlying cause, if one was recorded.
    pub fn cause(&self) -> Option<&(dyn StdError + Send + Sync + 'static)> {
        match self {
            IdempotencyError::FileSystem(e) => e.source.as_deref(),
            IdempotencyError::Network(e) => e.source.as_deref(),
        }
    }
}

/// Filesystem fault during an idempotent write.
#[derive(Debug, thiserror::Error)]
#[error("{message}")]
pub struct FileSystemError {
    pub message: String,
    /// Path being read or written when the fault happened.
    pub path: Option<PathBuf>,
    #[source]
    pub source: Option<BoxError>,
}

impl FileSystemError {
    pub fn new(message: impl Into<String>, path: impl AsRef<Path>) -> Self {
        Self {
            message: message.into(),
            path: Some(path.as_ref().to_path_buf()),
            source: None,
        }
    }

    pub fn with_source(mut self, source: impl Into<BoxError>) -> Self {
        self.source = Some(source.into());
        self
    }
}

/// Request failure after retries were exhausted (or before the first attempt
/// when the request itself is unusable).
#[derive(Debug, thiserror::Error)]
#[error("{message}")]
pub struct NetworkError {
    pub message: String,
    pub url: String,
    /// Status of the last retryable response; `None` when the last failure
    /// was a transport fault.
    pub status: Option<u16>,
    #[source]
    pub source: Option<BoxError>,
}

impl NetworkError {
    pub fn new(message: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            url: url.into(),
            status: None,
            source: None,
        }
    }

    pub fn with_status(mut self, status: Option<u16>) -> Self {
        self.status = status;
        self
    }

    pub fn with_source(mut self, source: impl Into<BoxError>) -> Self {
        self.source = Some(source.into());
        self
    }
}
