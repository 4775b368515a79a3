//! Retrying HTTP requests carrying an idempotency key.
//!
//! Every attempt sends the same request with the same `Idempotency-Key`
//! header. Transport faults and 409/429/5xx responses are retried with
//! exponential backoff; any other response is returned as-is.

mod client;
mod engine;
mod failure;
mod options;

pub use client::IdempotentClient;
pub use engine::{idempotent_fetch, IDEMPOTENCY_KEY_HEADER};
pub use failure::LastFailure;
pub use options::FetchOptions;
