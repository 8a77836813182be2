//! HTTP client for the chat-completion vendor.

use std::time::Duration;

use reqwest::{Client, Url};
use serde::{Deserialize, Serialize};

use crate::error::LlmError;

const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1/chat/completions";

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChatChoiceMessage {
    content: Option<String>,
}

/// Client for the chat-completion vendor.
///
/// Cheap to clone (shares the underlying connection pool), so background
/// enrichment tasks each carry their own copy.
#[derive(Debug, Clone)]
pub struct CompletionClient {
    client: Client,
    api_key: String,
    model: String,
    endpoint: Url,
}

impl CompletionClient {
    /// Creates a client pointed at the production completion endpoint.
    ///
    /// # Errors
    ///
    /// Returns [`LlmError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(api_key: &str, model: &str, timeout_secs: u64) -> Result<Self, LlmError> {
        Self::with_base_url(api_key, model, timeout_secs, DEFAULT_BASE_URL)
    }

    /// Creates a client with a custom endpoint URL (for testing with wiremock).
    ///
    /// # Errors
    ///
    /// Returns [`LlmError::Http`] on client construction failure, or
    /// [`LlmError::InvalidBaseUrl`] if `base_url` does not parse.
    pub fn with_base_url(
        api_key: &str,
        model: &str,
        timeout_secs: u64,
        base_url: &str,
    ) -> Result<Self, LlmError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent("geolens/0.1 (visibility-onboarding)")
            .build()?;

        let endpoint = Url::parse(base_url).map_err(|e| LlmError::InvalidBaseUrl {
            base_url: base_url.to_owned(),
            reason: e.to_string(),
        })?;

        Ok(Self {
            client,
            api_key: api_key.to_owned(),
            model: model.to_owned(),
            endpoint,
        })
    }

    /// Sends one completion request and returns the raw message content.
    ///
    /// # Errors
    ///
    /// - [`LlmError::Http`] — network failure or timeout.
    /// - [`LlmError::UnexpectedStatus`] — non-2xx from the vendor.
    /// - [`LlmError::Deserialize`] — response body is not the expected shape.
    /// - [`LlmError::EmptyResponse`] — no choices, or empty/blank content.
    pub async fn complete(
        &self,
        system: Option<&str>,
        user: &str,
    ) -> Result<String, LlmError> {
        let mut messages = Vec::with_capacity(2);
        if let Some(system) = system {
            messages.push(ChatMessage {
                role: "system",
                content: system,
            });
        }
        messages.push(ChatMessage {
            role: "user",
            content: user,
        });

        let request = ChatRequest {
            model: &self.model,
            messages,
        };

        let response = self
            .client
            .post(self.endpoint.clone())
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(LlmError::UnexpectedStatus {
                status: status.as_u16(),
                message,
            });
        }

        let body = response.text().await?;
        let parsed: ChatResponse =
            serde_json::from_str(&body).map_err(|e| LlmError::Deserialize {
                context: "chat completion response".to_owned(),
                source: e,
            })?;

        let content = parsed
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .unwrap_or_default();

        if content.trim().is_empty() {
            return Err(LlmError::EmptyResponse);
        }

        Ok(content)
    }
}
