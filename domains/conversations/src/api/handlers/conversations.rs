//! Conversation management API handlers

use axum::{
    extract::{Path, Query, State},
    Json,
};
use chrono::{DateTime, Utc};
use parley_common::{Error, Pagination, Result, ValidatedJson};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::api::middleware::ConversationsState;
use crate::domain::entities::Conversation;

/// Request for creating a conversation
#[derive(Debug, Default, Deserialize, Validate)]
pub struct CreateConversationRequest {
    /// Optional conversation title; empty or absent gets `"Conversation {id}"`
    #[serde(default)]
    pub title: Option<String>,
}

/// Conversation response DTO
#[derive(Debug, Serialize)]
pub struct ConversationResponse {
    pub id: i64,
    pub title: String,
    pub created_at: DateTime<Utc>,
}

impl From<Conversation> for ConversationResponse {
    fn from(c: Conversation) -> Self {
        Self {
            id: c.id,
            title: c.title,
            created_at: c.created_at,
        }
    }
}

/// Acknowledgement for deletions
#[derive(Debug, Serialize)]
pub struct DeleteResponse {
    pub ok: bool,
}

pub(crate) fn conversation_not_found() -> Error {
    Error::NotFound("Conversation not found".to_string())
}

/// Create a new conversation
pub async fn create_conversation(
    State(state): State<ConversationsState>,
    ValidatedJson(req): ValidatedJson<CreateConversationRequest>,
) -> Result<Json<ConversationResponse>> {
    let title = Conversation::requested_title(req.title);

    let created = state.repos.conversations.create(title.as_deref()).await?;

    tracing::info!(conversation_id = created.id, "Conversation created");
    Ok(Json(created.into()))
}

/// List a page of conversations
pub async fn list_conversations(
    State(state): State<ConversationsState>,
    Query(page): Query<Pagination>,
) -> Result<Json<Vec<ConversationResponse>>> {
    let convs = state
        .repos
        .conversations
        .list(page.offset(), page.limit())
        .await?;

    let responses: Vec<ConversationResponse> = convs.into_iter().map(Into::into).collect();
    Ok(Json(responses))
}

/// Get a single conversation by ID
pub async fn get_conversation(
    State(state): State<ConversationsState>,
    Path(id): Path<i64>,
) -> Result<Json<ConversationResponse>> {
    let conv = state
        .repos
        .conversations
        .find(id)
        .await?
        .ok_or_else(conversation_not_found)?;

    Ok(Json(conv.into()))
}

/// Delete a conversation and its messages
pub async fn delete_conversation(
    State(state): State<ConversationsState>,
    Path(id): Path<i64>,
) -> Result<Json<DeleteResponse>> {
    state
        .repos
        .conversations
        .find(id)
        .await?
        .ok_or_else(conversation_not_found)?;

    if !state.repos.conversations.delete(id).await? {
        // Removed by a concurrent request between the lookup and the delete
        return Err(conversation_not_found());
    }

    tracing::info!(conversation_id = id, "Conversation deleted");
    Ok(Json(DeleteResponse { ok: true }))
}
