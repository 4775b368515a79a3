pub mod config;
pub mod logging;

pub mod checksum;
pub mod encoding;
pub mod error;
pub mod fetch;
pub mod http;
pub mod retry;
pub mod storage;
pub mod write;

#[cfg(test)]
pub(crate) mod testing;

pub use error::{FileSystemError, IdempotencyError, NetworkError};
pub use fetch::{idempotent_fetch, FetchOptions, IdempotentClient};
pub use write::{idempotent_write, WriteData, WriteOperation, WriteOptions, WriteResult};
