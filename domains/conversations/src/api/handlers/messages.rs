//! Message API handlers

use axum::{
    extract::{Path, State},
    Json,
};
use chrono::{DateTime, Utc};
use parley_common::{Result, ValidatedJson};
use serde::{Deserialize, Serialize};
use validator::Validate;

use super::conversations::conversation_not_found;
use crate::api::middleware::ConversationsState;
use crate::domain::entities::{Message, NewMessage};
use crate::domain::history::assemble_history;

/// Request for posting a message
#[derive(Debug, Deserialize, Validate)]
pub struct SendMessageRequest {
    /// Stored verbatim; defaults to `"user"`
    #[serde(default)]
    pub role: Option<String>,

    /// Message content
    pub content: String,
}

/// Message response DTO
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub id: i64,
    pub conversation_id: i64,
    pub role: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

impl From<Message> for MessageResponse {
    fn from(m: Message) -> Self {
        Self {
            id: m.id,
            conversation_id: m.conversation_id,
            role: m.role,
            content: m.content,
            created_at: m.created_at,
        }
    }
}

/// Response for send message (includes both user and assistant messages)
#[derive(Debug, Serialize)]
pub struct SendMessageResponse {
    pub user: MessageResponse,
    pub assistant: MessageResponse,
}

/// Post a message to a conversation and store the assistant's reply
pub async fn send_message(
    State(state): State<ConversationsState>,
    Path(conversation_id): Path<i64>,
    ValidatedJson(req): ValidatedJson<SendMessageRequest>,
) -> Result<Json<SendMessageResponse>> {
    // Verify conversation exists before anything is written
    state
        .repos
        .conversations
        .find(conversation_id)
        .await?
        .ok_or_else(conversation_not_found)?;

    let user_msg = NewMessage::posted(conversation_id, req.role, req.content);
    let created_user_msg = state.repos.messages.create(&user_msg).await?;

    // Full history, including the message just stored
    let history = state
        .repos
        .messages
        .list_by_conversation(conversation_id)
        .await?;

    let reply = state.request_reply(assemble_history(&history)).await;

    tracing::info!(
        conversation_id,
        history_len = history.len(),
        completed = reply.is_completed(),
        "Assistant reply generated"
    );

    let assistant_msg = NewMessage::assistant(conversation_id, reply.into_content());
    let created_assistant_msg = state.repos.messages.create(&assistant_msg).await?;

    Ok(Json(SendMessageResponse {
        user: created_user_msg.into(),
        assistant: created_assistant_msg.into(),
    }))
}

/// List messages for a conversation, oldest first
pub async fn list_messages(
    State(state): State<ConversationsState>,
    Path(conversation_id): Path<i64>,
) -> Result<Json<Vec<MessageResponse>>> {
    state
        .repos
        .conversations
        .find(conversation_id)
        .await?
        .ok_or_else(conversation_not_found)?;

    let messages = state
        .repos
        .messages
        .list_by_conversation(conversation_id)
        .await?;

    let responses: Vec<MessageResponse> = messages.into_iter().map(Into::into).collect();
    Ok(Json(responses))
}
