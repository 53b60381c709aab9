//! Client for OpenAI-compatible chat-completion endpoints
//!
//! This module provides the HTTP client for the external completion service.
//! It speaks the OpenAI `POST /chat/completions` wire format with bearer
//! authentication, so any compatible provider works by swapping the base URL.

use async_trait::async_trait;
use reqwest::{Client as ReqwestClient, StatusCode};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, error, instrument};

use super::{CompletionError, CompletionModel, CompletionRequest};

/// Default base URL for the completion service
pub const DEFAULT_BASE_URL: &str = "https://api.kluster.ai/v1";

/// Default model identifier
pub const DEFAULT_MODEL: &str = "klusterai/Meta-Llama-3.1-8B-Instruct-Turbo";

/// Timeout for completion requests in seconds
const DEFAULT_TIMEOUT_SECS: u64 = 120;

/// A chat message in the OpenAI wire format
#[derive(Debug, Serialize)]
struct ChatMessage {
    role: &'static str,
    content: String,
}

/// Request body for `POST /chat/completions`
#[derive(Debug, Serialize)]
struct ChatCompletionRequest {
    model: String,
    messages: Vec<ChatMessage>,
    n: u32,
    max_tokens: u32,
}

/// Response body for `POST /chat/completions`
#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

/// HTTP client for an OpenAI-compatible completion service
#[derive(Debug, Clone)]
pub struct OpenAiClient {
    client: ReqwestClient,
    base_url: String,
    api_key: Option<String>,
    model: String,
}

#[cfg(test)]
impl OpenAiClient {
    /// Set the base URL (for testing only)
    pub fn set_base_url(&mut self, url: String) {
        self.base_url = url;
    }
}

impl OpenAiClient {
    /// Create a new client with the default endpoint and model
    ///
    /// A `None` API key is allowed; the client then reports itself as
    /// unconfigured and the missing credential is surfaced per request.
    pub fn new(api_key: Option<String>) -> Self {
        let client = ReqwestClient::builder()
            .timeout(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            client,
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key,
            model: DEFAULT_MODEL.to_string(),
        }
    }

    /// Use a different model identifier
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }
}

#[async_trait]
impl CompletionModel for OpenAiClient {
    #[instrument(skip(self, request), level = "debug")]
    async fn complete(&self, request: CompletionRequest) -> Result<String, CompletionError> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or_else(|| CompletionError::Auth("No API key configured".to_string()))?;

        let body = ChatCompletionRequest {
            model: self.model.clone(),
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: request.system,
                },
                ChatMessage {
                    role: "user",
                    content: request.prompt,
                },
            ],
            n: 1,
            max_tokens: request.max_tokens,
        };

        let url = format!("{}/chat/completions", self.base_url);
        debug!("Sending completion request to {}", url);

        let response = self
            .client
            .post(url)
            .bearer_auth(api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        let response_text = response.text().await?;

        if !status.is_success() {
            error!("API error: {} - {}", status, response_text);

            return if status == StatusCode::UNAUTHORIZED {
                Err(CompletionError::Auth(
                    "Invalid API key or credentials".to_string(),
                ))
            } else {
                Err(CompletionError::Api {
                    status_code: status.as_u16(),
                    message: response_text,
                })
            };
        }

        let parsed: ChatCompletionResponse = serde_json::from_str(&response_text).map_err(|e| {
            error!("Failed to parse completion response: {}", e);
            CompletionError::UnexpectedResponse(format!("Failed to parse response: {}", e))
        })?;

        parsed
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .filter(|text| !text.is_empty())
            .ok_or(CompletionError::EmptyResponse)
    }

    fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Server;

    fn request() -> CompletionRequest {
        CompletionRequest {
            system: "You are a helpful assistant.".to_string(),
            prompt: "Say hi.".to_string(),
            max_tokens: 100,
        }
    }

    #[tokio::test]
    async fn returns_first_choice_text() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", "/chat/completions")
            .match_header("authorization", "Bearer test-key")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                r#"{
                    "choices": [{
                        "message": { "role": "assistant", "content": "hi there" }
                    }]
                }"#,
            )
            .create_async()
            .await;

        let mut client = OpenAiClient::new(Some("test-key".to_string()));
        client.set_base_url(server.url());

        let text = client.complete(request()).await.unwrap();
        assert_eq!(text, "hi there");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn empty_choices_is_an_error() {
        let mut server = Server::new_async().await;
        server
            .mock("POST", "/chat/completions")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{ "choices": [] }"#)
            .create_async()
            .await;

        let mut client = OpenAiClient::new(Some("test-key".to_string()));
        client.set_base_url(server.url());

        let err = client.complete(request()).await.unwrap_err();
        assert!(matches!(err, CompletionError::EmptyResponse));
    }

    #[tokio::test]
    async fn api_error_is_reported_with_status() {
        let mut server = Server::new_async().await;
        server
            .mock("POST", "/chat/completions")
            .with_status(500)
            .with_body("boom")
            .create_async()
            .await;

        let mut client = OpenAiClient::new(Some("test-key".to_string()));
        client.set_base_url(server.url());

        let err = client.complete(request()).await.unwrap_err();
        assert!(matches!(err, CompletionError::Api { status_code: 500, .. }));
    }

    #[tokio::test]
    async fn missing_key_fails_without_a_request() {
        let client = OpenAiClient::new(None);
        assert!(!client.is_configured());

        let err = client.complete(request()).await.unwrap_err();
        assert!(matches!(err, CompletionError::Auth(_)));
    }
}
