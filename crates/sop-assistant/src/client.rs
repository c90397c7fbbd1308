//! QA service contract and HTTP adapter
//!
//! One request per question, no retry, no timeout:
//! `POST {endpoint}` with `{ "message": ... }`, expecting `{ "answer": ... }`.

use crate::error::AssistantError;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Default QA service endpoint
pub const DEFAULT_ENDPOINT: &str = "http://127.0.0.1:5000/ask";

/// Request body
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AskRequest {
    /// Operator question, verbatim
    pub message: String,
}

/// Success response body
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AskResponse {
    /// Answer text, displayed verbatim
    pub answer: String,
}

/// Free-text question answering
#[async_trait]
pub trait Assistant: Send + Sync {
    /// Ask one question, single attempt
    async fn ask(&self, question: &str) -> Result<String, AssistantError>;
}

/// QA adapter settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AssistantConfig {
    /// Service endpoint URL
    pub endpoint: String,
}

impl AssistantConfig {
    /// Create default configuration
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// With endpoint
    #[inline]
    #[must_use]
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }
}

impl Default for AssistantConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
        }
    }
}

/// [`Assistant`] over HTTP
#[derive(Debug, Clone)]
pub struct HttpAssistant {
    endpoint: String,
    client: reqwest::Client,
}

impl HttpAssistant {
    /// Create adapter for an endpoint
    #[must_use]
    pub fn new(config: &AssistantConfig) -> Self {
        Self {
            endpoint: config.endpoint.clone(),
            client: reqwest::Client::new(),
        }
    }

    /// Endpoint URL
    #[inline]
    #[must_use]
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl Assistant for HttpAssistant {
    async fn ask(&self, question: &str) -> Result<String, AssistantError> {
        tracing::debug!(endpoint = %self.endpoint, "Sending question to assistant");

        let response = self
            .client
            .post(&self.endpoint)
            .json(&AskRequest {
                message: question.to_string(),
            })
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(AssistantError::Status(status.as_u16()));
        }

        let body: AskResponse = response
            .json()
            .await
            .map_err(|e| AssistantError::Decode(e.to_string()))?;

        tracing::debug!("Assistant answered");
        Ok(body.answer)
    }
}
