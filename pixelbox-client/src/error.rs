//! Client error types

use thiserror::Error;

/// Client error type
#[derive(Debug, Error)]
pub enum ClientError {
    /// Transport failure (no usable response: connect error, timeout, ...)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Business-rule rejection carrying the server's message verbatim
    #[error("{0}")]
    Api(String),

    /// Authentication failed (invalid credentials, refresh rejected)
    #[error("Authentication failed: {0}")]
    Auth(String),

    /// Authentication required (401). Forces a local logout.
    #[error("Authentication required")]
    Unauthorized,

    /// Permission denied
    #[error("Permission denied: {0}")]
    Forbidden(String),

    /// Resource not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Validation error
    #[error("Validation error: {0}")]
    Validation(String),

    /// Invalid response format
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl ClientError {
    /// True when the server rejected the token (forces re-login)
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, ClientError::Unauthorized)
    }

    /// The server-provided message, when one was present in the payload.
    /// Callers fall back to an action-specific message otherwise.
    pub fn server_message(&self) -> Option<&str> {
        match self {
            ClientError::Api(msg)
            | ClientError::Auth(msg)
            | ClientError::Validation(msg)
            | ClientError::NotFound(msg)
            | ClientError::Forbidden(msg) => Some(msg),
            _ => None,
        }
    }
}

/// Result type for client operations
pub type ClientResult<T> = Result<T, ClientError>;
