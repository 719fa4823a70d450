//! Conversations domain state

use crate::domain::reply::AssistantReply;
use crate::ConversationsRepositories;
use parley_llm::{CompletionRequest, LlmMessage, LlmService};
use std::sync::Arc;

/// Application state for the Conversations domain
#[derive(Clone)]
pub struct ConversationsState {
    pub repos: ConversationsRepositories,
    /// `None` when no LLM credential was configured at startup
    pub llm: Option<Arc<dyn LlmService>>,
}

impl ConversationsState {
    pub fn new(repos: ConversationsRepositories, llm: Option<Arc<dyn LlmService>>) -> Self {
        Self { repos, llm }
    }

    /// Ask the LLM for the next assistant turn.
    ///
    /// Never fails: every outcome is folded into an [`AssistantReply`].
    pub async fn request_reply(&self, history: Vec<LlmMessage>) -> AssistantReply {
        let Some(llm) = &self.llm else {
            tracing::debug!("LLM not configured, skipping completion");
            return AssistantReply::NotConfigured;
        };

        let request = CompletionRequest {
            model: llm.default_model().to_string(),
            messages: history,
        };

        let outcome = llm.complete(request).await;
        if let Err(e) = &outcome {
            tracing::warn!(error = %e, "LLM completion failed, storing diagnostic reply");
        }

        AssistantReply::from_outcome(Some(outcome))
    }
}
