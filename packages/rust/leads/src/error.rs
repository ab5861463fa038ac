//! Classified failures of a lead submission.

use tokyon_shared::TokyonError;

/// Coarse classification used by callers to pick a response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    InvalidInput,
    Misconfigured,
    RemoteUnavailable,
    RemoteRejected,
}

/// Why a lead could not be turned into a card.
#[derive(Debug, thiserror::Error)]
pub enum SubmissionError {
    /// Required submission fields are absent.
    #[error("missing required fields: {missing}")]
    InvalidInput { missing: String },

    /// The deployment lacks credentials or the target pipe.
    #[error("misconfigured: {message}")]
    Misconfigured { message: String },

    /// The remote call did not complete (transport, HTTP status, undecodable body).
    #[error("remote unavailable: {0}")]
    RemoteUnavailable(String),

    /// The remote answered with GraphQL errors.
    #[error("remote rejected the record: {message}")]
    RemoteRejected {
        message: String,
        details: Option<serde_json::Value>,
    },
}

impl SubmissionError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidInput { .. } => ErrorKind::InvalidInput,
            Self::Misconfigured { .. } => ErrorKind::Misconfigured,
            Self::RemoteUnavailable(_) => ErrorKind::RemoteUnavailable,
            Self::RemoteRejected { .. } => ErrorKind::RemoteRejected,
        }
    }

    pub fn misconfigured(msg: impl Into<String>) -> Self {
        Self::Misconfigured {
            message: msg.into(),
        }
    }
}

impl From<TokyonError> for SubmissionError {
    fn from(err: TokyonError) -> Self {
        match err {
            TokyonError::Config { message } => Self::Misconfigured { message },
            other => Self::RemoteUnavailable(other.to_string()),
        }
    }
}
