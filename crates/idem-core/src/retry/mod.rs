//! Retry and backoff policy.
//!
//! Status/fault classification and the exponential backoff decision live
//! here so the request engine only has to say whether an attempt finished
//! or failed transiently.

mod classify;
mod error;
mod policy;
mod run;
mod sleep;

pub use classify::{classify_status, classify_transport_error, is_retryable_status, ErrorKind};
pub use error::InvalidRetryConfig;
pub use policy::{RetryConfig, RetryDecision, RetryOverrides};
pub use run::{run_with_retry, Attempt, Exhausted};
pub use sleep::{Sleeper, TokioSleeper};
