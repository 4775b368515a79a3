//! Retry loop: run an attempt until it finishes or the policy says stop.

use std::fmt;
use std::future::Future;

use super::policy::{RetryConfig, RetryDecision};
use super::sleep::Sleeper;

/// Outcome of a single attempt.
#[derive(Debug)]
pub enum Attempt<T, E> {
    /// Finished; returned to the caller as-is.
    Done(T),
    /// Failed transiently; eligible for another attempt.
    Retryable(E),
}

/// Every allowed attempt failed transiently.
#[derive(Debug)]
pub struct Exhausted<E> {
    /// Attempts made, including the first.
    pub attempts: u32,
    pub last: E,
}

/// Runs `f(attempt)` (0-based) until it returns [`Attempt::Done`] or
/// `config.retries + 1` attempts have failed. Between attempts, sleeps for
/// the backoff delay through `sleeper`.
pub async fn run_with_retry<T, E, F, Fut>(
    config: &RetryConfig,
    sleeper: &dyn Sleeper,
    mut f: F,
) -> Result<T, Exhausted<E>>
where
    F: FnMut(u32) -> Fut,
    Fut: Future<Output = Attempt<T, E>>,
    E: fmt::Display,
{
    let mut attempt = 0u32;
    loop {
        match f(attempt).await {
            Attempt::Done(value) => return Ok(value),
            Attempt::Retryable(err) => {
                let jitter = if config.randomize {
                    rand::random::<f64>()
                } else {
                    0.0
                };
                match config.decide(attempt, jitter) {
                    RetryDecision::NoRetry => {
                        return Err(Exhausted {
                            attempts: attempt.saturating_add(1),
                            last: err,
                        })
                    }
                    RetryDecision::RetryAfter(delay) => {
                        tracing::info!(
                            "attempt {} failed ({}); retrying in {}ms",
                            attempt + 1,
                            err,
                            delay.as_millis()
                        );
                        sleeper.sleep(delay).await;
                        attempt += 1;
                    }
                }
            }
        }
    }
}
