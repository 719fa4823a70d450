//! History assembler
//!
//! Turns the stored, ordered messages of a conversation into the
//! `{role, content}` sequence sent to the LLM.

use parley_llm::LlmMessage;

use super::entities::Message;

/// Map stored messages (already ordered oldest first) to LLM messages.
///
/// Roles outside `user`/`assistant` are sent as `user`.
pub fn assemble_history(messages: &[Message]) -> Vec<LlmMessage> {
    messages
        .iter()
        .map(|m| LlmMessage {
            role: m.outbound_role().into(),
            content: m.content.clone(),
        })
        .collect()
}
