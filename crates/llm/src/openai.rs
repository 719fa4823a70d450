//! OpenAI-compatible Chat Completions Implementation
//!
//! Calls `{base_url}/chat/completions` using the reqwest HTTP client.
//! Responses are decoded through a single typed schema; a body that does not
//! match it is returned verbatim as the reply text.

use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::{CompletionRequest, CompletionResponse, LlmConfig, LlmError, LlmMessage, LlmService};

/// Chat Completions request body
#[derive(Debug, Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: &'a [LlmMessage],
}

/// Chat Completions response body
#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    #[serde(default)]
    model: Option<String>,
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

/// Provider error response
#[derive(Debug, Deserialize)]
struct ErrorResponse {
    error: ApiError,
}

#[derive(Debug, Deserialize)]
struct ApiError {
    #[serde(rename = "type", default)]
    error_type: Option<String>,
    message: String,
}

/// Pull the first choice's text out of a response body.
///
/// Returns `None` when the body does not follow the Chat Completions schema
/// or carries no text in its first choice.
fn decode_completion(body: &str) -> Option<(String, Option<String>)> {
    let parsed: ChatCompletionResponse = serde_json::from_str(body).ok()?;
    let content = parsed.choices.into_iter().next()?.message.content?;
    Some((content, parsed.model))
}

/// OpenAI-compatible LLM service implementation
pub struct OpenAiCompatibleService {
    client: Client,
    config: LlmConfig,
    completions_url: String,
}

impl OpenAiCompatibleService {
    /// Create a new service; the base URL is taken from the config
    pub fn new(config: LlmConfig) -> Self {
        let completions_url = format!(
            "{}/chat/completions",
            config.base_url.trim_end_matches('/')
        );

        Self {
            client: Client::new(),
            config,
            completions_url,
        }
    }
}

#[async_trait::async_trait]
impl LlmService for OpenAiCompatibleService {
    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse, LlmError> {
        let model = if request.model.is_empty() {
            self.config.model.clone()
        } else {
            request.model
        };

        let body = ChatCompletionRequest {
            model: &model,
            messages: &request.messages,
        };

        tracing::debug!(
            model = %model,
            messages = request.messages.len(),
            "Sending chat completion request"
        );

        let response = self
            .client
            .post(&self.completions_url)
            .bearer_auth(&self.config.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| LlmError::Request(format!("HTTP request failed: {}", e)))?;

        let status = response.status();

        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(LlmError::RateLimit);
        }

        let text = response
            .text()
            .await
            .map_err(|e| LlmError::Response(format!("Failed to read response body: {}", e)))?;

        if !status.is_success() {
            if let Ok(error_response) = serde_json::from_str::<ErrorResponse>(&text) {
                let kind = error_response
                    .error
                    .error_type
                    .unwrap_or_else(|| "error".to_string());
                return Err(LlmError::Response(format!(
                    "Provider error ({}): {}",
                    kind, error_response.error.message
                )));
            }

            return Err(LlmError::Response(format!(
                "Provider returned {}: {}",
                status, text
            )));
        }

        match decode_completion(&text) {
            Some((content, reported_model)) => Ok(CompletionResponse {
                content,
                model: reported_model.unwrap_or(model),
            }),
            None => {
                tracing::warn!(
                    model = %model,
                    "Chat completion response did not match the expected schema, keeping raw body"
                );
                Ok(CompletionResponse {
                    content: text,
                    model,
                })
            }
        }
    }

    fn default_model(&self) -> &str {
        &self.config.model
    }
}
