//! Route definitions for Conversations domain API

use axum::{
    routing::{get, MethodRouter},
    Router,
};

use super::handlers::{conversations, messages};
use super::middleware::ConversationsState;

/// List + create, served with and without the trailing slash
fn conversation_collection() -> MethodRouter<ConversationsState> {
    get(conversations::list_conversations).post(conversations::create_conversation)
}

/// Create conversation routes
fn conversation_routes() -> Router<ConversationsState> {
    Router::new()
        .route("/conversations", conversation_collection())
        .route("/conversations/", conversation_collection())
        .route(
            "/conversations/{id}",
            get(conversations::get_conversation).delete(conversations::delete_conversation),
        )
}

/// Create message routes
fn message_routes() -> Router<ConversationsState> {
    Router::new().route(
        "/conversations/{conversation_id}/messages",
        get(messages::list_messages).post(messages::send_message),
    )
}

/// Create all Conversations domain API routes
pub fn routes() -> Router<ConversationsState> {
    Router::new()
        .merge(conversation_routes())
        .merge(message_routes())
}
