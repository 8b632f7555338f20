//! Error taxonomy for backend calls.
//!
//! Transport concerns (session expiry, timeouts) are normalised here so
//! callers only decide what to tell the user.

use thiserror::Error;

pub const TIMEOUT_MESSAGE: &str = "Request timed out. Please try again.";
pub const GENERIC_MESSAGE: &str = "Something went wrong. Please try again.";

/// Errors that can occur while talking to the backend.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The backend rejected the session (401). Already handled by the
    /// re-auth guard; never shown to the user.
    #[error("Session expired")]
    SessionExpired,

    /// 408 from the backend, or the client-side request timeout fired.
    #[error("{}", TIMEOUT_MESSAGE)]
    Timeout,

    /// Any other non-success status.
    #[error("Backend returned {status}: {}", .message.as_deref().unwrap_or(GENERIC_MESSAGE))]
    Status { status: u16, message: Option<String> },

    /// No response at all (DNS, refused connection, reset…).
    #[error("Network error: {0}")]
    Network(#[source] reqwest::Error),

    /// The response body did not have the expected shape.
    #[error("Failed to decode response: {0}")]
    Decode(String),

    /// The request could not be built.
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// The HTTP client itself could not be constructed.
    #[error("Failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),
}

/// Coarse classification used for logging and branching.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Unauthorized,
    Timeout,
    Status,
    Network,
    Decode,
    InvalidRequest,
}

impl ApiError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ApiError::SessionExpired => ErrorKind::Unauthorized,
            ApiError::Timeout => ErrorKind::Timeout,
            ApiError::Status { .. } => ErrorKind::Status,
            ApiError::Network(_) => ErrorKind::Network,
            ApiError::Decode(_) => ErrorKind::Decode,
            ApiError::InvalidRequest(_) | ApiError::Client(_) => ErrorKind::InvalidRequest,
        }
    }

    /// HTTP status, when the backend answered.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::SessionExpired => Some(401),
            ApiError::Timeout => None,
            ApiError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Errors the caller must not report a second time.
    pub fn is_silent(&self) -> bool {
        matches!(self, ApiError::SessionExpired)
    }

    /// Text for the user-facing notification; `None` for silent errors.
    pub fn user_message(&self) -> Option<String> {
        match self {
            ApiError::SessionExpired => None,
            ApiError::Timeout => Some(TIMEOUT_MESSAGE.to_string()),
            ApiError::Status {
                message: Some(message),
                ..
            } if !message.trim().is_empty() => Some(message.clone()),
            _ => Some(GENERIC_MESSAGE.to_string()),
        }
    }
}
