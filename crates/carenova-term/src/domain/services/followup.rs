use std::sync::Arc;

use carenova_client::FollowupClient;

use crate::domain::models::FollowupQuestions;

/// Asked when the backend cannot generate questions of its own.
pub const FALLBACK_QUESTIONS: [&str; 3] = [
    "How long have you had these symptoms?",
    "Are the symptoms getting worse?",
    "Do you have fever, rash, or other symptoms?",
];

pub fn fallback_questions() -> FollowupQuestions {
    FollowupQuestions::fallback(FALLBACK_QUESTIONS.iter().map(|q| q.to_string()).collect())
}

#[derive(Clone)]
pub struct FollowupQuestionService {
    client: Arc<dyn FollowupClient>,
}

impl FollowupQuestionService {
    pub fn new(client: Arc<dyn FollowupClient>) -> FollowupQuestionService {
        FollowupQuestionService { client }
    }

    /// Never fails: transport, status and decode errors, as well as an empty
    /// question list, all yield the fallback set.
    pub async fn fetch(&self, symptoms: &str) -> FollowupQuestions {
        match self.client.followup_questions(symptoms).await {
            Ok(questions) if !questions.is_empty() => {
                tracing::debug!(count = questions.len(), "received follow-up questions");
                FollowupQuestions::generated(questions)
            }
            Ok(_) => {
                tracing::warn!("backend returned no follow-up questions, using defaults");
                fallback_questions()
            }
            Err(err) => {
                tracing::error!(error = %err, "failed to fetch follow-up questions, using defaults");
                fallback_questions()
            }
        }
    }
}
