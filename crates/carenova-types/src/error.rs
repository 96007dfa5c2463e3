//! Error types for protocol decoding.

use thiserror::Error;

/// Result type alias for protocol operations.
pub type ProtocolResult<T> = std::result::Result<T, ProtocolError>;

/// Errors that can occur while decoding frames pushed by the backend.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ProtocolError {
    /// The frame was not valid JSON or did not match the declared type.
    #[error("Malformed message: {message}")]
    Malformed { message: String },

    /// The frame carried no `type` discriminator.
    #[error("Missing message type")]
    MissingType,

    /// The frame carried a `type` discriminator this client does not know.
    #[error("Unrecognized message type: {kind}")]
    UnrecognizedType { kind: String },
}

impl ProtocolError {
    /// Create a new malformed message error.
    pub fn malformed(message: impl Into<String>) -> Self {
        Self::Malformed {
            message: message.into(),
        }
    }

    /// Create a new unrecognized type error.
    pub fn unrecognized(kind: impl Into<String>) -> Self {
        Self::UnrecognizedType { kind: kind.into() }
    }
}
