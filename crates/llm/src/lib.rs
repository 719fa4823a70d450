//! Parley LLM Service
//!
//! Provides chat completion with support for:
//! - Any OpenAI-compatible `chat/completions` endpoint for production
//! - A recording mock service for testing and development
//!
//! Configuration is built explicitly (or from the environment once at startup)
//! and handed to the client at construction time.

pub mod mock;
pub mod openai;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use mock::MockLlmService;
pub use openai::OpenAiCompatibleService;

/// Base URL of the default OpenAI-compatible provider
pub const DEFAULT_BASE_URL: &str = "https://ellm.nrp-nautilus.io/v1";

/// Model used when neither the request nor the environment names one
pub const DEFAULT_MODEL: &str = "gemma3";

#[derive(Error, Debug)]
pub enum LlmError {
    #[error("LLM configuration error: {0}")]
    Configuration(String),

    #[error("LLM request error: {0}")]
    Request(String),

    #[error("LLM response error: {0}")]
    Response(String),

    #[error("LLM rate limit exceeded")]
    RateLimit,
}

/// Speaker of a message in an outbound completion request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LlmRole {
    User,
    Assistant,
}

impl LlmRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            LlmRole::User => "user",
            LlmRole::Assistant => "assistant",
        }
    }
}

impl std::fmt::Display for LlmRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One `{role, content}` entry of the conversation history
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LlmMessage {
    pub role: LlmRole,
    pub content: String,
}

impl LlmMessage {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: LlmRole::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: LlmRole::Assistant,
            content: content.into(),
        }
    }
}

/// A single chat completion exchange
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompletionRequest {
    /// Model identifier; empty means the service default
    pub model: String,
    /// Full ordered history, oldest first
    pub messages: Vec<LlmMessage>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompletionResponse {
    /// Text of the first completion choice
    pub content: String,
    pub model: String,
}

/// LLM service configuration
#[derive(Clone)]
pub struct LlmConfig {
    /// LLM provider (openai, mock)
    pub provider: String,
    /// Bearer credential for the provider
    pub api_key: String,
    /// Base URL the `chat/completions` path is appended to
    pub base_url: String,
    /// Model identifier sent with every request
    pub model: String,
}

impl std::fmt::Debug for LlmConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LlmConfig")
            .field("provider", &self.provider)
            .field("api_key", &"[REDACTED]")
            .field("base_url", &self.base_url)
            .field("model", &self.model)
            .finish()
    }
}

impl LlmConfig {
    /// Config for the default OpenAI-compatible provider
    pub fn openai(api_key: impl Into<String>) -> Self {
        Self {
            provider: "openai".to_string(),
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
        }
    }

    /// Config for the in-process mock provider
    pub fn mock() -> Self {
        Self {
            provider: "mock".to_string(),
            api_key: String::new(),
            base_url: String::new(),
            model: "mock-model".to_string(),
        }
    }

    /// Load LLM config from environment variables.
    ///
    /// Returns `None` when no credential is available for a real provider,
    /// which disables completions for the lifetime of the process.
    pub fn from_env() -> Option<Self> {
        dotenvy::dotenv().ok();

        let provider = std::env::var("LLM_PROVIDER").unwrap_or_else(|_| "openai".to_string());

        let base = if provider == "mock" {
            Self::mock()
        } else {
            let api_key = std::env::var("NRP_API_KEY")
                .ok()
                .filter(|key| !key.trim().is_empty())?;
            Self {
                provider,
                ..Self::openai(api_key)
            }
        };

        let base_url = std::env::var("LLM_BASE_URL").unwrap_or(base.base_url.clone());
        let model = std::env::var("LLM_MODEL").unwrap_or(base.model.clone());

        Some(Self {
            base_url,
            model,
            ..base
        })
    }
}

/// LLM service trait for different implementations
#[async_trait::async_trait]
pub trait LlmService: Send + Sync {
    /// Send the history and return the first choice's text
    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse, LlmError>;

    /// Model used when a request leaves `model` empty
    fn default_model(&self) -> &str;
}

/// LLM service factory
pub struct LlmServiceFactory;

impl LlmServiceFactory {
    /// Create LLM service based on configuration
    pub fn create(config: LlmConfig) -> Result<Box<dyn LlmService>, LlmError> {
        match config.provider.as_str() {
            "openai" => {
                if config.api_key.trim().is_empty() {
                    return Err(LlmError::Configuration(
                        "An API key is required for the openai provider".to_string(),
                    ));
                }
                tracing::info!(base_url = %config.base_url, model = %config.model, "Creating OpenAI-compatible LLM service");
                Ok(Box::new(OpenAiCompatibleService::new(config)))
            }
            "mock" => {
                tracing::info!("Creating mock LLM service");
                Ok(Box::new(MockLlmService::with_model(config.model)))
            }
            provider => Err(LlmError::Configuration(format!(
                "Unknown LLM provider: {}. Supported providers: openai, mock",
                provider
            ))),
        }
    }
}
