//! Mock LLM Service Implementation
//!
//! Used by `LlmServiceFactory` when provider is `"mock"`, and by tests.
//! Returns deterministic responses and records every request it receives.
//! Thread-safe via `Arc<Mutex<>>`; a poisoned lock keeps its recorded requests.

use std::sync::{Arc, Mutex, PoisonError};

use crate::{CompletionRequest, CompletionResponse, LlmError, LlmService};

/// Mock LLM service for testing
#[derive(Debug, Clone)]
pub struct MockLlmService {
    model: String,
    failure: Option<String>,
    requests: Arc<Mutex<Vec<CompletionRequest>>>,
}

impl MockLlmService {
    /// Create a new mock LLM service
    pub fn new() -> Self {
        Self::with_model("mock-model")
    }

    /// Create a mock that reports `model` as its default
    pub fn with_model(model: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            failure: None,
            requests: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Create a mock whose every completion fails with `message`
    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            failure: Some(message.into()),
            ..Self::new()
        }
    }

    /// Return all recorded requests, oldest first
    pub fn recorded_requests(&self) -> Vec<CompletionRequest> {
        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Clear all recorded requests
    pub fn reset(&self) {
        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }
}

impl Default for MockLlmService {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl LlmService for MockLlmService {
    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse, LlmError> {
        tracing::info!(
            messages = request.messages.len(),
            "Mock LLM service processing completion request"
        );

        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(request.clone());

        if let Some(message) = &self.failure {
            return Err(LlmError::Request(message.clone()));
        }

        let model = if request.model.is_empty() {
            self.model.clone()
        } else {
            request.model
        };

        let last_message = request
            .messages
            .last()
            .map(|m| m.content.as_str())
            .unwrap_or("empty");

        Ok(CompletionResponse {
            content: format!("Mock response to: {}", last_message),
            model,
        })
    }

    fn default_model(&self) -> &str {
        &self.model
    }
}
