use std::sync::Arc;

use super::engine::idempotent_fetch;
use super::options::FetchOptions;
use crate::error::NetworkError;
use crate::http::{CurlTransport, HttpResponse, HttpTransport};
use crate::retry::{RetryOverrides, Sleeper, TokioSleeper};

/// Owns a transport, a sleeper and default retry overrides.
///
/// Per-call [`FetchOptions::retry`] fields win over the client defaults.
#[derive(Clone)]
pub struct IdempotentClient {
    transport: Arc<dyn HttpTransport>,
    sleeper: Arc<dyn Sleeper>,
    retry_defaults: RetryOverrides,
}

impl Default for IdempotentClient {
    fn default() -> Self {
        Self::new(Arc::new(CurlTransport::default()), Arc::new(TokioSleeper))
    }
}

impl IdempotentClient {
    pub fn new(transport: Arc<dyn HttpTransport>, sleeper: Arc<dyn Sleeper>) -> Self {
        Self {
            transport,
            sleeper,
            retry_defaults: RetryOverrides::default(),
        }
    }

    pub fn with_retry_defaults(mut self, defaults: RetryOverrides) -> Self {
        self.retry_defaults = defaults;
        self
    }

    pub async fn fetch(
        &self,
        url: &str,
        mut options: FetchOptions,
    ) -> Result<HttpResponse, NetworkError> {
        let call = options.retry.unwrap_or_default();
        options.retry = Some(self.retry_defaults.overlay(&call));
        idempotent_fetch(self.transport.as_ref(), self.sleeper.as_ref(), url, options).await
    }
}
