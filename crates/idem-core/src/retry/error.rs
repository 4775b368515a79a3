//! Rejected retry configuration.

use std::fmt;

/// Retry configuration that cannot produce a backoff schedule at all.
///
/// Out-of-order bounds are not an error: every delay is capped at
/// `max_timeout`, so `min_timeout > max_timeout` just means a flat schedule.
#[derive(Debug, Clone, PartialEq)]
pub enum InvalidRetryConfig {
    /// `factor` is NaN, infinite or negative.
    Factor(f64),
}

impl fmt::Display for InvalidRetryConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InvalidRetryConfig::Factor(factor) => {
                write!(f, "backoff factor must be a finite number >= 0, got {}", factor)
            }
        }
    }
}

impl std::error::Error for InvalidRetryConfig {}
