//! Request and response bodies exchanged with the backend.

use serde::{Deserialize, Serialize};

/// Body of `POST /followup-questions`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FollowupQuestionsRequest {
    pub symptoms: String,
}

impl FollowupQuestionsRequest {
    pub fn new(symptoms: impl Into<String>) -> Self {
        Self {
            symptoms: symptoms.into(),
        }
    }
}

/// Response of `POST /followup-questions`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FollowupQuestionsResponse {
    pub questions: Vec<String>,
}

/// The single request sent over the chat socket per conversation cycle.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisRequest {
    pub session_id: String,
    pub initial_symptoms: String,
    pub followup_answers: Vec<String>,
}

/// Response of `GET /health`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthResponse {
    /// One of "healthy", "degraded" or "unhealthy".
    pub status: String,
    pub message: String,
    #[serde(default)]
    pub models_loaded: bool,
    #[serde(default)]
    pub vector_db_ready: bool,
}

impl HealthResponse {
    pub fn is_healthy(&self) -> bool {
        self.status == "healthy"
    }
}
