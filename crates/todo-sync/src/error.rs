//! Error Taxonomy
//!
//! Every call to an external service returns a classified error so the
//! presentation layer can decide how to surface it.

use thiserror::Error;

/// Common result type for sync operations
pub type SyncResult<T> = Result<T, SyncError>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SyncError {
    /// No session, or the session was refused by the service.
    #[error("Not authenticated: {0}")]
    NotAuthenticated(String),

    /// The request never produced an HTTP response.
    #[error("Network error: {0}")]
    Network(String),

    /// The service answered and refused the request.
    #[error("Request rejected: {0}")]
    Rejected(String),

    /// The service answered with something that could not be decoded.
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

/// Coarse error classes for presentation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    NotAuthenticated,
    NetworkUnreachable,
    ServerRejected,
    Internal,
}

impl SyncError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::NotAuthenticated(_) => ErrorKind::NotAuthenticated,
            Self::Network(_) => ErrorKind::NetworkUnreachable,
            Self::Rejected(_) => ErrorKind::ServerRejected,
            Self::InvalidResponse(_) | Self::Config(_) => ErrorKind::Internal,
        }
    }

    /// Classify a non-success HTTP status.
    pub(crate) fn from_status(status: reqwest::StatusCode, detail: impl Into<String>) -> Self {
        let detail = detail.into();
        match status.as_u16() {
            401 | 403 => Self::NotAuthenticated(format!("{status}: {detail}")),
            _ => Self::Rejected(format!("{status}: {detail}")),
        }
    }
}

impl From<serde_json::Error> for SyncError {
    fn from(e: serde_json::Error) -> Self {
        Self::InvalidResponse(e.to_string())
    }
}
