//! Network collaborators of the Carenova chat client
//!
//! The backend exposes two integration points: a plain request/response call that
//! generates follow-up questions, and a long-lived socket that carries the final
//! analysis exchange together with any intermediate progress pushes. This crate
//! wraps both behind small types so the conversation logic can be exercised
//! without a network.

use async_trait::async_trait;
use carenova_types::HealthResponse;

pub mod endpoint;
pub mod error;
pub mod http_client;
pub mod socket;

pub use endpoint::socket_url;
pub use error::{ClientError, Result};
pub use http_client::HttpFollowupClient;
pub use socket::{ChatSocket, SocketEvent, SocketHandle};

/// Request/response access to the question-generation backend.
#[async_trait]
pub trait FollowupClient: Send + Sync {
    /// Ask the backend for follow-up questions about the given symptoms.
    async fn followup_questions(&self, symptoms: &str) -> Result<Vec<String>>;

    /// Check if the backend is reachable and report its status.
    async fn health_check(&self) -> Result<HealthResponse>;
}
