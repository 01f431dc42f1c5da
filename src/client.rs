//! HTTP client for OpenAI-compatible chat completion endpoints.
//!
//! One request per user turn: the latest user message is sent on its own,
//! with a fixed token cap. No conversation history, no retries, no timeout
//! beyond the transport default.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::config::Settings;

/// Errors from a completion request.
///
/// The controller collapses all of these into a single fallback reply; the
/// variants exist so diagnostics can log what actually went wrong.
#[derive(Debug, Error)]
pub enum CompletionError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("server returned status {0}")]
    Status(reqwest::StatusCode),

    #[error("completion response missing choices[0].message.content")]
    MissingContent,
}

/// Anything that can turn one user message into one reply.
///
/// The REPL uses [`CompletionClient`]; tests substitute a scripted backend.
#[async_trait]
pub trait CompletionBackend: Send + Sync {
    /// Produce a reply for `user_text`, already trimmed of surrounding
    /// whitespace.
    async fn complete(&self, user_text: &str) -> Result<String, CompletionError>;
}

/// Request body for `POST /chat/completions`.
#[derive(Debug, Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: Vec<WireMessage<'a>>,
    max_tokens: u32,
}

/// A single message in the request body.
#[derive(Debug, Serialize)]
struct WireMessage<'a> {
    role: &'a str,
    content: &'a str,
}

/// Expected response shape. Anything beyond the first choice's content is
/// ignored; a response without it is an error.
#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

/// Pull the first choice's content out of a parsed response.
fn extract_content(response: ChatCompletionResponse) -> Result<String, CompletionError> {
    response
        .choices
        .into_iter()
        .next()
        .and_then(|choice| choice.message.content)
        .map(|content| content.trim().to_string())
        .ok_or(CompletionError::MissingContent)
}

/// Thin reqwest wrapper for an OpenAI-compatible endpoint.
pub struct CompletionClient {
    http: reqwest::Client,
    base_url: String,
    model: String,
    api_key: Option<String>,
    max_tokens: u32,
}

impl CompletionClient {
    /// Build a client from settings.
    pub fn new(settings: &Settings) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: settings.base_url.clone(),
            model: settings.model.clone(),
            api_key: settings.api_key.clone(),
            max_tokens: settings.max_tokens,
        }
    }

    /// The model identifier sent with each request.
    pub fn model(&self) -> &str {
        &self.model
    }
}

#[async_trait]
impl CompletionBackend for CompletionClient {
    async fn complete(&self, user_text: &str) -> Result<String, CompletionError> {
        let url = format!("{}/chat/completions", self.base_url);
        let body = ChatCompletionRequest {
            model: &self.model,
            messages: vec![WireMessage {
                role: "user",
                content: user_text,
            }],
            max_tokens: self.max_tokens,
        };

        debug!(model = %self.model, %url, "dispatching completion request");

        let mut request = self.http.post(&url).json(&body);
        if let Some(key) = &self.api_key {
            request = request.bearer_auth(key);
        }

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(CompletionError::Status(status));
        }

        let parsed: ChatCompletionResponse = response.json().await?;
        extract_content(parsed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // =========================================================================
    // Wire Format Tests
    // =========================================================================

    #[test]
    fn test_request_body_shape() {
        let body = ChatCompletionRequest {
            model: "llama",
            messages: vec![WireMessage {
                role: "user",
                content: "hi",
            }],
            max_tokens: 150,
        };

        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "model": "llama",
                "messages": [{"role": "user", "content": "hi"}],
                "max_tokens": 150,
            })
        );
    }

    #[test]
    fn test_extract_content_trims_whitespace() {
        let response: ChatCompletionResponse = serde_json::from_str(
            r#"{"choices":[{"message":{"content":" Hello there "}}]}"#,
        )
        .unwrap();
        assert_eq!(extract_content(response).unwrap(), "Hello there");
    }

    #[test]
    fn test_extract_content_missing_choices() {
        let response: ChatCompletionResponse = serde_json::from_str("{}").unwrap();
        assert!(matches!(
            extract_content(response),
            Err(CompletionError::MissingContent)
        ));
    }

    #[test]
    fn test_extract_content_empty_choices() {
        let response: ChatCompletionResponse =
            serde_json::from_str(r#"{"choices":[]}"#).unwrap();
        assert!(matches!(
            extract_content(response),
            Err(CompletionError::MissingContent)
        ));
    }

    #[test]
    fn test_extract_content_null_content() {
        let response: ChatCompletionResponse =
            serde_json::from_str(r#"{"choices":[{"message":{"content":null}}]}"#).unwrap();
        assert!(matches!(
            extract_content(response),
            Err(CompletionError::MissingContent)
        ));
    }

    #[test]
    fn test_extra_fields_ignored() {
        let response: ChatCompletionResponse = serde_json::from_str(
            r#"{"id":"cmpl-1","object":"chat.completion",
                "choices":[{"index":0,"message":{"role":"assistant","content":"ok"},
                "finish_reason":"stop"}],"usage":{"total_tokens":12}}"#,
        )
        .unwrap();
        assert_eq!(extract_content(response).unwrap(), "ok");
    }

    // =========================================================================
    // Client Tests
    // =========================================================================

    #[test]
    fn test_client_from_settings() {
        let settings = Settings::new("http://localhost:8080/v1/", "llama", "", 150);
        let client = CompletionClient::new(&settings);
        assert_eq!(client.model(), "llama");
        assert_eq!(client.base_url, "http://localhost:8080/v1");
        assert!(client.api_key.is_none());
    }

    #[tokio::test]
    async fn test_connection_refused_is_error() {
        // Nothing listens on port 1; the request must fail, not hang.
        let settings = Settings::new("http://127.0.0.1:1/v1", "llama", "", 150);
        let client = CompletionClient::new(&settings);

        let result = client.complete("hi").await;
        assert!(matches!(result, Err(CompletionError::Http(_))));
    }

    // =========================================================================
    // Error Display Tests
    // =========================================================================

    #[test]
    fn test_missing_content_display() {
        let err = CompletionError::MissingContent;
        assert_eq!(
            err.to_string(),
            "completion response missing choices[0].message.content"
        );
    }

    #[test]
    fn test_status_display() {
        let err = CompletionError::Status(reqwest::StatusCode::INTERNAL_SERVER_ERROR);
        assert!(err.to_string().contains("500"));
    }
}
