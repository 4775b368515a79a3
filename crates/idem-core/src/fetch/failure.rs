use crate::http::TransportError;

/// Last transient failure seen by the request engine.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LastFailure {
    #[error("received retryable status code: {0}")]
    Status(u16),
    #[error(transparent)]
    Transport(#[from] TransportError),
}

impl LastFailure {
    /// Status code when the failure was a received response.
    pub fn status(&self) -> Option<u16> {
        match self {
            LastFailure::Status(code) => Some(*code),
            LastFailure::Transport(_) => None,
        }
    }
}
