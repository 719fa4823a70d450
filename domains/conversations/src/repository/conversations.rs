//! Conversation repository

use chrono::Utc;
use parley_common::Result;
use sqlx::SqlitePool;

use super::transactions::{delete_messages_tx, insert_conversation_tx, set_title_tx};
use crate::domain::entities::Conversation;

#[derive(Clone)]
pub struct ConversationRepository {
    pool: SqlitePool,
}

impl ConversationRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Find conversation by ID
    pub async fn find(&self, id: i64) -> Result<Option<Conversation>> {
        let conv = sqlx::query_as::<_, Conversation>(
            r#"
            SELECT id, title, created_at
            FROM conversations
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(conv)
    }

    /// List a page of conversations in insertion order
    pub async fn list(&self, offset: i64, limit: i64) -> Result<Vec<Conversation>> {
        let convs = sqlx::query_as::<_, Conversation>(
            r#"
            SELECT id, title, created_at
            FROM conversations
            ORDER BY id ASC
            LIMIT ?1 OFFSET ?2
            "#,
        )
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;

        Ok(convs)
    }

    /// Create a conversation.
    ///
    /// Without a title, the row is first stored untitled and then renamed to
    /// `"Conversation {id}"` once the id is known; both writes share a transaction.
    pub async fn create(&self, title: Option<&str>) -> Result<Conversation> {
        let mut tx = self.pool.begin_with("BEGIN IMMEDIATE").await?;

        let mut created = insert_conversation_tx(&mut tx, title.unwrap_or(""), Utc::now()).await?;

        if created.title.is_empty() {
            let default_title = Conversation::default_title(created.id);
            created = set_title_tx(&mut tx, created.id, &default_title).await?;
        }

        tx.commit().await?;

        tracing::debug!(conversation_id = created.id, "Conversation created");
        Ok(created)
    }

    /// Delete a conversation together with its messages.
    ///
    /// Returns `false` when no conversation had this id.
    pub async fn delete(&self, id: i64) -> Result<bool> {
        let mut tx = self.pool.begin_with("BEGIN IMMEDIATE").await?;

        let removed_messages = delete_messages_tx(&mut tx, id).await?;
        let result = sqlx::query("DELETE FROM conversations WHERE id = ?1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        let deleted = result.rows_affected() > 0;
        if deleted {
            tracing::debug!(
                conversation_id = id,
                removed_messages,
                "Conversation deleted"
            );
        }
        Ok(deleted)
    }

    /// Number of stored conversations
    pub async fn count(&self) -> Result<i64> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM conversations")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }
}
