//! Error types for the TinyLink client
//!
//! The taxonomy follows what a caller has to distinguish:
//! - [`Error::Validation`]: local precondition failure, never reaches the network
//! - [`Error::NotFound`]: 404-class gateway response
//! - [`Error::Gateway`]: any other non-2xx response or a transport failure
//! - [`Error::Json`]: a 2xx response whose body is not the expected shape

use thiserror::Error;

/// Result type alias for TinyLink operations
pub type Result<T> = std::result::Result<T, Error>;

/// Shown when the store rejects a create without supplying a message
pub const CREATE_FAILED: &str = "Failed to create link";

/// Banner shown when the link list cannot be fetched
pub const FETCH_FAILED: &str = "Failed to fetch links";

/// Notice shown when a delete is rejected
pub const DELETE_FAILED: &str = "Failed to delete link";

/// Core error type for the TinyLink client
#[derive(Error, Debug)]
pub enum Error {
    /// Local precondition failure (bad input before any request is made)
    #[error("Validation error: {0}")]
    Validation(String),

    /// The requested record does not exist on the store
    #[error("Not found: {0}")]
    NotFound(String),

    /// Non-2xx response (`status` set) or transport failure (`status` is `None`)
    #[error("Gateway error{}: {message}", status_suffix(.status))]
    Gateway {
        /// HTTP status code, if a response was received
        status: Option<u16>,
        /// Server-supplied or transport error message
        message: String,
    },

    /// Another mutation is still pending on the same registry
    #[error("Operation in progress: {0}")]
    Busy(String),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Malformed response body
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Create a validation error
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Create a "not found" error
    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    /// Create a gateway error for a received non-2xx response
    pub fn gateway(status: u16, message: impl Into<String>) -> Self {
        Self::Gateway {
            status: Some(status),
            message: message.into(),
        }
    }

    /// Create a gateway error for a request that never got a response
    pub fn transport(message: impl Into<String>) -> Self {
        Self::Gateway {
            status: None,
            message: message.into(),
        }
    }

    /// Create a busy error
    pub fn busy(msg: impl Into<String>) -> Self {
        Self::Busy(msg.into())
    }

    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Whether this is a 404-class failure
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }

    /// Text suitable for showing to the user
    ///
    /// Validation messages are returned verbatim and gateway failures carry the
    /// server's message. Everything else falls back to `fallback`.
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            Self::Validation(msg) | Self::Busy(msg) => msg.clone(),
            Self::Gateway {
                status: Some(_),
                message,
            } if !message.is_empty() => message.clone(),
            _ => fallback.to_string(),
        }
    }
}

fn status_suffix(status: &Option<u16>) -> String {
    status.map(|s| format!(" ({s})")).unwrap_or_default()
}
