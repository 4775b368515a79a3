use serde::{Deserialize, Serialize};
use std::time::Duration;

use super::error::InvalidRetryConfig;

/// Decision returned by the retry policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RetryDecision {
    /// Attempts exhausted.
    NoRetry,
    /// Retry after the given delay.
    RetryAfter(Duration),
}

/// Fully resolved exponential backoff configuration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RetryConfig {
    /// Retries after the first attempt; at most `retries + 1` attempts are made.
    pub retries: u32,
    /// Multiplier applied per attempt.
    pub factor: f64,
    /// Delay before the first retry, and the jitter range.
    pub min_timeout: Duration,
    /// Upper bound on any single delay.
    pub max_timeout: Duration,
    /// Add uniform jitter in `[0, min_timeout)` to each delay.
    pub randomize: bool,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            retries: 3,
            factor: 2.0,
            min_timeout: Duration::from_millis(1000),
            max_timeout: Duration::from_millis(15000),
            randomize: true,
        }
    }
}

impl RetryConfig {
    /// Backoff before attempt `attempt + 1`, where `attempt` is the 0-based
    /// index of the attempt that just failed:
    /// `min(min_timeout * factor^attempt [+ jitter * min_timeout], max_timeout)`.
    ///
    /// `jitter` is a sample from `[0, 1)`; it is ignored unless `randomize`.
    pub fn delay_for(&self, attempt: u32, jitter: f64) -> Duration {
        let min = self.min_timeout.as_secs_f64();
        let exp = i32::try_from(attempt).unwrap_or(i32::MAX);
        let mut secs = min * self.factor.powi(exp);
        if self.randomize {
            secs += jitter.clamp(0.0, 1.0) * min;
        }
        let capped = secs.min(self.max_timeout.as_secs_f64());
        Duration::from_secs_f64(capped.max(0.0))
    }

    /// Whether to retry after the 0-based `attempt` failed transiently.
    pub fn decide(&self, attempt: u32, jitter: f64) -> RetryDecision {
        if attempt >= self.retries {
            return RetryDecision::NoRetry;
        }
        RetryDecision::RetryAfter(self.delay_for(attempt, jitter))
    }

    /// Rejects only a factor the formula cannot use. Shrinking factors and
    /// `min_timeout > max_timeout` are accepted; [`delay_for`](Self::delay_for)
    /// caps every delay at `max_timeout`.
    pub fn validate(&self) -> Result<(), InvalidRetryConfig> {
        if !self.factor.is_finite() || self.factor < 0.0 {
            return Err(InvalidRetryConfig::Factor(self.factor));
        }
        Ok(())
    }
}

/// Partial retry configuration; unset fields fall back to [`RetryConfig::default`].
///
/// This is the shape callers (and `config.toml`) supply. Timeouts are in
/// milliseconds.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct RetryOverrides {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub retries: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub factor: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_timeout_ms: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_timeout_ms: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub randomize: Option<bool>,
}

impl RetryOverrides {
    /// Fields set in `other` win over fields set in `self`.
    pub fn overlay(&self, other: &RetryOverrides) -> RetryOverrides {
        RetryOverrides {
            retries: other.retries.or(self.retries),
            factor: other.factor.or(self.factor),
            min_timeout_ms: other.min_timeout_ms.or(self.min_timeout_ms),
            max_timeout_ms: other.max_timeout_ms.or(self.max_timeout_ms),
            randomize: other.randomize.or(self.randomize),
        }
    }

    /// Apply onto the defaults field by field and validate the result.
    pub fn resolve(&self) -> Result<RetryConfig, InvalidRetryConfig> {
        let base = RetryConfig::default();
        let config = RetryConfig {
            retries: self.retries.unwrap_or(base.retries),
            factor: self.factor.unwrap_or(base.factor),
            min_timeout: self
                .min_timeout_ms
                .map(Duration::from_millis)
                .unwrap_or(base.min_timeout),
            max_timeout: self
                .max_timeout_ms
                .map(Duration::from_millis)
                .unwrap_or(base.max_timeout),
            randomize: self.randomize.unwrap_or(base.randomize),
        };
        config.validate()?;
        Ok(config)
    }
}
