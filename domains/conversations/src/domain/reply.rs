//! Assistant reply policy
//!
//! The outcome of asking the LLM for a reply. Every outcome becomes stored
//! message content; LLM problems never fail the HTTP request.

use parley_llm::{CompletionResponse, LlmError};

/// Content stored when no LLM is configured for this process
pub const NOT_CONFIGURED_TEXT: &str = "[LLM not configured]";

/// Prefix of the content stored when the LLM call fails
pub const ERROR_PREFIX: &str = "[LLM error]";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AssistantReply {
    /// Text of the first completion choice
    Completed(String),
    /// Diagnostic for a failed call
    Failed(String),
    /// No LLM configured, no call made
    NotConfigured,
}

impl AssistantReply {
    /// Build from the optional outcome of an LLM call (`None` = not configured)
    pub fn from_outcome(outcome: Option<Result<CompletionResponse, LlmError>>) -> Self {
        match outcome {
            None => AssistantReply::NotConfigured,
            Some(Ok(response)) => AssistantReply::Completed(response.content),
            Some(Err(e)) => AssistantReply::Failed(e.to_string()),
        }
    }

    pub fn is_completed(&self) -> bool {
        matches!(self, AssistantReply::Completed(_))
    }

    /// Message content to persist for this reply
    pub fn into_content(self) -> String {
        match self {
            AssistantReply::Completed(text) => text,
            AssistantReply::Failed(error) => format!("{} {}", ERROR_PREFIX, error),
            AssistantReply::NotConfigured => NOT_CONFIGURED_TEXT.to_string(),
        }
    }
}
