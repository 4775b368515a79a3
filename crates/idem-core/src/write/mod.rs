//! Content-addressed idempotent file writes.
//!
//! The target is hashed and compared against the new content first; the disk
//! is only touched when the digests differ, and then through an atomic
//! temp-file rename (see [`crate::storage`]).

mod engine;
mod types;

pub use engine::idempotent_write;
pub use types::{WriteData, WriteOperation, WriteOptions, WriteResult};

#[cfg(test)]
mod tests;
