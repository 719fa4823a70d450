//! Message repository

use chrono::Utc;
use parley_common::Result;
use sqlx::SqlitePool;

use super::transactions::{insert_message_tx, last_created_at_tx};
use crate::domain::entities::{next_created_at, Message, NewMessage};

#[derive(Clone)]
pub struct MessageRepository {
    pool: SqlitePool,
}

impl MessageRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// List messages for a conversation, ordered by created_at ASC
    pub async fn list_by_conversation(&self, conversation_id: i64) -> Result<Vec<Message>> {
        let messages = sqlx::query_as::<_, Message>(
            r#"
            SELECT id, conversation_id, role, content, created_at
            FROM messages
            WHERE conversation_id = ?1
            ORDER BY created_at ASC, id ASC
            "#,
        )
        .bind(conversation_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(messages)
    }

    /// Append a message to its conversation.
    ///
    /// `created_at` is assigned here, strictly after the conversation's
    /// latest message. The write lock is taken at BEGIN; upgrading a read
    /// transaction fails with SQLITE_BUSY while another writer is active.
    pub async fn create(&self, msg: &NewMessage) -> Result<Message> {
        let mut tx = self.pool.begin_with("BEGIN IMMEDIATE").await?;

        let previous = last_created_at_tx(&mut tx, msg.conversation_id).await?;
        let created_at = next_created_at(previous, Utc::now());
        let created = insert_message_tx(&mut tx, msg, created_at).await?;

        tx.commit().await?;
        Ok(created)
    }
}
