use async_trait::async_trait;
use carenova_types::{FollowupQuestionsRequest, FollowupQuestionsResponse, HealthResponse};
use std::time::Duration;

use crate::error::{ClientError, Result};
use crate::FollowupClient;

/// HTTP client for the question-generation and health endpoints
pub struct HttpFollowupClient {
    base_url: String,
    client: reqwest::Client,
    timeout: Duration,
}

impl HttpFollowupClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url: String = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client: reqwest::Client::new(),
            timeout: Duration::from_secs(30),
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[async_trait]
impl FollowupClient for HttpFollowupClient {
    async fn followup_questions(&self, symptoms: &str) -> Result<Vec<String>> {
        let url = format!("{}/followup-questions", self.base_url);

        let response = self
            .client
            .post(&url)
            .header("Content-Type", "application/json")
            .timeout(self.timeout)
            .json(&FollowupQuestionsRequest::new(symptoms))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!(status = status.as_u16(), "followup questions request failed");
            return Err(ClientError::Status(status.as_u16()));
        }

        let body = response.text().await?;
        let parsed: FollowupQuestionsResponse = serde_json::from_str(&body)?;

        Ok(parsed.questions)
    }

    async fn health_check(&self) -> Result<HealthResponse> {
        let url = format!("{}/health", self.base_url);
        let response = self
            .client
            .get(&url)
            .timeout(self.timeout)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ClientError::Status(status.as_u16()));
        }

        let body = response.text().await?;
        Ok(serde_json::from_str(&body)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Matcher;
    use serde_json::json;

    #[tokio::test]
    async fn test_followup_questions_success() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/followup-questions")
            .match_body(Matcher::Json(json!({"symptoms": "severe chest pain"})))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"questions":["Q1","Q2"]}"#)
            .create_async()
            .await;

        let client = HttpFollowupClient::new(server.url());
        let questions = client.followup_questions("severe chest pain").await.unwrap();

        assert_eq!(questions, vec!["Q1", "Q2"]);
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_followup_questions_non_success_status() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/followup-questions")
            .with_status(500)
            .with_body(r#"{"detail":"Failed to generate follow-up questions"}"#)
            .create_async()
            .await;

        let client = HttpFollowupClient::new(server.url());
        let err = client.followup_questions("headache").await.unwrap_err();

        assert!(matches!(err, ClientError::Status(500)));
    }

    #[tokio::test]
    async fn test_followup_questions_bad_body() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/followup-questions")
            .with_status(200)
            .with_body("<html>oops</html>")
            .create_async()
            .await;

        let client = HttpFollowupClient::new(format!("{}/", server.url()));
        let err = client.followup_questions("headache").await.unwrap_err();

        assert!(matches!(err, ClientError::Json(_)));
    }

    #[tokio::test]
    async fn test_health_check() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/health")
            .with_status(200)
            .with_body(
                r#"{"status":"healthy","message":"All systems operational","models_loaded":true,"vector_db_ready":true}"#,
            )
            .create_async()
            .await;

        let client = HttpFollowupClient::new(server.url());
        let health = client.health_check().await.unwrap();

        assert!(health.is_healthy());
        assert!(health.vector_db_ready);
    }

    #[test]
    fn test_base_url_trailing_slash_is_trimmed() {
        let client = HttpFollowupClient::new("http://localhost:8000/");
        assert_eq!(client.base_url(), "http://localhost:8000");
    }
}
