//! Store error types

use pixelbox_client::ClientError;
use rust_decimal::Decimal;
use shared::OrderStatus;
use thiserror::Error;

/// Store/workflow error type
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Please log in first")]
    NotAuthenticated,

    #[error("Insufficient points: need {required:.2}, balance {balance:.2}")]
    InsufficientBalance { required: Decimal, balance: Decimal },

    #[error("Cannot {action} a {status} order")]
    InvalidTransition {
        status: OrderStatus,
        action: &'static str,
    },

    /// Another call for the same resource is still in flight
    #[error("Operation already in progress")]
    Busy(String),

    #[error("{0}")]
    Validation(String),

    #[error("Client error: {0}")]
    Client(#[from] ClientError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl StoreError {
    /// True when the server rejected the token; the session must be cleared
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, StoreError::Client(e) if e.is_unauthorized())
    }

    /// Notification text: the server's message when one exists, otherwise an
    /// action-specific fallback. Local guard failures explain themselves.
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            StoreError::Client(e) => e
                .server_message()
                .map(str::to_string)
                .unwrap_or_else(|| fallback.to_string()),
            other => other.to_string(),
        }
    }
}

/// Result type for store operations
pub type StoreResult<T> = Result<T, StoreError>;
