use async_trait::async_trait;
use std::fmt;

use super::message::{HttpRequest, HttpResponse};

/// Sends a single HTTP request.
///
/// Any received response is `Ok`, including 4xx/5xx; `Err` is reserved for
/// faults where no response arrived (DNS, refused/reset connection, timeout).
#[async_trait]
pub trait HttpTransport: Send + Sync {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError>;
}

/// Rough class of a transport fault.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransportErrorKind {
    /// Connect or overall timeout.
    Timeout,
    /// DNS, refused, reset, or otherwise broken connection.
    Connection,
    Other,
}

/// No response was received.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{kind}: {message}")]
pub struct TransportError {
    pub kind: TransportErrorKind,
    pub message: String,
}

impl TransportError {
    pub fn new(kind: TransportErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

impl fmt::Display for TransportErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransportErrorKind::Timeout => f.write_str("timeout"),
            TransportErrorKind::Connection => f.write_str("connection error"),
            TransportErrorKind::Other => f.write_str("transport error"),
        }
    }
}
