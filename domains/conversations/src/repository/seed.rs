//! Sample data for a fresh store

use parley_common::Result;

use super::ConversationsRepositories;
use crate::domain::entities::NewMessage;

pub const SAMPLE_TITLE: &str = "Welcome";
pub const SAMPLE_GREETING: &str = "Hi! Send a message to start chatting.";

/// Insert one sample conversation when the store holds none.
///
/// Returns whether anything was written.
pub async fn seed_if_empty(repos: &ConversationsRepositories) -> Result<bool> {
    if repos.conversations.count().await? > 0 {
        tracing::debug!("Store already has conversations, skipping seed");
        return Ok(false);
    }

    let conversation = repos.conversations.create(Some(SAMPLE_TITLE)).await?;
    repos
        .messages
        .create(&NewMessage::assistant(
            conversation.id,
            SAMPLE_GREETING.to_string(),
        ))
        .await?;

    tracing::info!(conversation_id = conversation.id, "Seeded sample conversation");
    Ok(true)
}
