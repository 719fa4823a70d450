//! Domain entities for Conversations domain
//!
//! Conversations own an ordered list of messages. Identifiers are assigned by
//! the store; `created_at` on messages is the only history ordering key.

use chrono::{DateTime, Duration, Utc};
use parley_llm::LlmRole;
use serde::{Deserialize, Serialize};

/// Role stored on messages written by the user side
pub const ROLE_USER: &str = "user";

/// Role stored on generated replies
pub const ROLE_ASSISTANT: &str = "assistant";

/// Role of a message as seen by the LLM.
///
/// Stored roles are free text; anything other than `"assistant"` is
/// presented to the model as `User`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    User,
    Assistant,
}

impl MessageRole {
    pub fn from_stored(role: &str) -> Self {
        match role {
            ROLE_ASSISTANT => MessageRole::Assistant,
            _ => MessageRole::User,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            MessageRole::User => ROLE_USER,
            MessageRole::Assistant => ROLE_ASSISTANT,
        }
    }
}

impl std::fmt::Display for MessageRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<MessageRole> for LlmRole {
    fn from(role: MessageRole) -> Self {
        match role {
            MessageRole::User => LlmRole::User,
            MessageRole::Assistant => LlmRole::Assistant,
        }
    }
}

/// Conversation entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Conversation {
    pub id: i64,
    pub title: String,
    pub created_at: DateTime<Utc>,
}

impl Conversation {
    /// Title given to conversations created without one
    pub fn default_title(id: i64) -> String {
        format!("Conversation {}", id)
    }

    /// Requested title as stored; `None` and `""` both mean "use the default"
    pub fn requested_title(title: Option<String>) -> Option<String> {
        title.filter(|t| !t.is_empty())
    }
}

/// Message entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Message {
    pub id: i64,
    pub conversation_id: i64,
    pub role: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

impl Message {
    /// Role presented to the LLM for this message; the stored role is left as is
    pub fn outbound_role(&self) -> MessageRole {
        MessageRole::from_stored(&self.role)
    }
}

/// A message that has not been persisted yet
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewMessage {
    pub conversation_id: i64,
    pub role: String,
    pub content: String,
}

impl NewMessage {
    /// Message posted by a client. A missing role defaults to `"user"`;
    /// any other role is kept as sent.
    pub fn posted(conversation_id: i64, role: Option<String>, content: String) -> Self {
        Self {
            conversation_id,
            role: role.unwrap_or_else(|| ROLE_USER.to_string()),
            content,
        }
    }

    /// Generated reply
    pub fn assistant(conversation_id: i64, content: String) -> Self {
        Self {
            conversation_id,
            role: ROLE_ASSISTANT.to_string(),
            content,
        }
    }
}

/// Timestamp for the next message of a conversation.
///
/// Strictly later than `previous` so that ordering by `created_at` replays
/// insertion order even when the wall clock stalls or steps back.
pub fn next_created_at(previous: Option<DateTime<Utc>>, now: DateTime<Utc>) -> DateTime<Utc> {
    match previous {
        Some(prev) if now <= prev => prev + Duration::microseconds(1),
        _ => now,
    }
}
