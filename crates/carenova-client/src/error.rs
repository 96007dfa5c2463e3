//! Error types for backend communication.

use thiserror::Error;

/// Result type alias for client operations.
pub type Result<T> = std::result::Result<T, ClientError>;

/// Errors that can occur while talking to the backend.
#[derive(Error, Debug)]
pub enum ClientError {
    /// Transport-level HTTP failure
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The backend answered with a non-success status
    #[error("Unexpected status: {0}")]
    Status(u16),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The configured server URL cannot be used
    #[error("Invalid server URL: {0}")]
    InvalidUrl(String),

    /// The chat socket failed
    #[error("Socket error: {0}")]
    Socket(String),

    /// A send was attempted without an open chat socket
    #[error("Chat socket is not connected")]
    NotConnected,
}

impl ClientError {
    /// Create a new invalid URL error.
    pub fn invalid_url(msg: impl Into<String>) -> Self {
        Self::InvalidUrl(msg.into())
    }
}

impl From<tokio_tungstenite::tungstenite::Error> for ClientError {
    fn from(err: tokio_tungstenite::tungstenite::Error) -> Self {
        Self::Socket(err.to_string())
    }
}
