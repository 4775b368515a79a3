//! Classify HTTP statuses and transport faults for retry decisions.

use crate::http::{TransportError, TransportErrorKind};

/// High-level classification of an attempt outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Operation timed out (connect/overall).
    Timeout,
    /// Server asked us to slow down (429).
    Throttled,
    /// Conflicting concurrent request (409), typically an in-flight duplicate
    /// of the same idempotency key.
    Conflict,
    /// Network-level failure (connection reset, DNS, etc.).
    Connection,
    /// Any other transport fault. Still retried: no response arrived.
    Transport,
    /// 5xx.
    Http5xx(u16),
    /// Everything else; returned to the caller without retrying.
    Terminal,
}

impl ErrorKind {
    pub fn is_retryable(self) -> bool {
        !matches!(self, ErrorKind::Terminal)
    }
}

/// Retryable iff `>= 500`, `409` or `429`.
pub fn is_retryable_status(status: u16) -> bool {
    classify_status(status).is_retryable()
}

pub fn classify_status(status: u16) -> ErrorKind {
    match status {
        409 => ErrorKind::Conflict,
        429 => ErrorKind::Throttled,
        500..=u16::MAX => ErrorKind::Http5xx(status),
        _ => ErrorKind::Terminal,
    }
}

/// Transport faults are always retryable; the kind is kept for logging.
pub fn classify_transport_error(e: &TransportError) -> ErrorKind {
    match e.kind {
        TransportErrorKind::Timeout => ErrorKind::Timeout,
        TransportErrorKind::Connection => ErrorKind::Connection,
        TransportErrorKind::Other => ErrorKind::Transport,
    }
}
