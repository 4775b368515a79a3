use crate::error::NetworkError;
use crate::http::{HttpRequest, HttpResponse, HttpTransport};
use crate::retry::{self, Attempt, Sleeper};

use super::failure::LastFailure;
use super::options::FetchOptions;

/// Header carrying the caller's idempotency key.
pub const IDEMPOTENCY_KEY_HEADER: &str = "Idempotency-Key";

/// Send `options` to `url` through `transport`, retrying transient failures.
///
/// Returns the first non-retryable response, whatever its status; checking
/// for client errors is up to the caller. Fails with [`NetworkError`] once
/// `retries + 1` attempts have failed, or up front when the URL, the retry
/// configuration or a header (including the idempotency key) is unusable.
pub async fn idempotent_fetch(
    transport: &dyn HttpTransport,
    sleeper: &dyn Sleeper,
    url: &str,
    options: FetchOptions,
) -> Result<HttpResponse, NetworkError> {
    let config = options.retry.unwrap_or_default().resolve().map_err(|e| {
        NetworkError::new(format!("invalid retry configuration for {}", url), url).with_source(e)
    })?;
    url::Url::parse(url)
        .map_err(|e| NetworkError::new(format!("invalid URL: {}", url), url).with_source(e))?;

    let mut request = HttpRequest::new(&options.method, url);
    request.headers = options.headers;
    request
        .headers
        .set(IDEMPOTENCY_KEY_HEADER, options.idempotency_key);
    request.body = options.body;
    request.timeout = options.timeout;
    request.headers.validate().map_err(|e| {
        NetworkError::new(format!("refusing to send invalid header to {}", url), url)
            .with_source(e)
    })?;

    let outcome = retry::run_with_retry(&config, sleeper, |attempt| {
        let request = request.clone();
        async move {
            tracing::debug!("{} {} (attempt {})", request.method, request.url, attempt + 1);
            match transport.send(request).await {
                Ok(response) if retry::is_retryable_status(response.status) => {
                    tracing::debug!(
                        "attempt {}: {:?}",
                        attempt + 1,
                        retry::classify_status(response.status)
                    );
                    Attempt::Retryable(LastFailure::Status(response.status))
                }
                Ok(response) => Attempt::Done(response),
                Err(e) => {
                    tracing::debug!(
                        "attempt {}: {:?}: {}",
                        attempt + 1,
                        retry::classify_transport_error(&e),
                        e
                    );
                    Attempt::Retryable(LastFailure::Transport(e))
                }
            }
        }
    })
    .await;

    outcome.map_err(|exhausted| {
        tracing::warn!(
            "{} failed after {} attempts: {}",
            url,
            exhausted.attempts,
            exhausted.last
        );
        NetworkError::new(
            format!("request to {} failed after {} attempts", url, exhausted.attempts),
            url,
        )
        .with_status(exhausted.last.status())
        .with_source(exhausted.last)
    })
}
