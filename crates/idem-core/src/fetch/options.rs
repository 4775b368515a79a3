use std::time::Duration;

use crate::http::Headers;
use crate::retry::RetryOverrides;

/// Request fields plus the idempotency key and optional retry overrides.
#[derive(Debug, Clone, PartialEq)]
pub struct FetchOptions {
    pub method: String,
    pub headers: Headers,
    pub body: Option<Vec<u8>>,
    /// Per-attempt timeout.
    pub timeout: Option<Duration>,
    /// Sent verbatim as `Idempotency-Key` on every attempt.
    pub idempotency_key: String,
    pub retry: Option<RetryOverrides>,
}

impl FetchOptions {
    /// `GET` with no body and default retries.
    pub fn new(idempotency_key: impl Into<String>) -> Self {
        Self {
            method: "GET".to_string(),
            headers: Headers::new(),
            body: None,
            timeout: None,
            idempotency_key: idempotency_key.into(),
            retry: None,
        }
    }

    pub fn method(mut self, method: impl Into<String>) -> Self {
        self.method = method.into();
        self
    }

    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.set(name, value);
        self
    }

    pub fn headers(mut self, headers: Headers) -> Self {
        self.headers = headers;
        self
    }

    pub fn body(mut self, body: impl Into<Vec<u8>>) -> Self {
        self.body = Some(body.into());
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn retry(mut self, retry: RetryOverrides) -> Self {
        self.retry = Some(retry);
        self
    }
}
