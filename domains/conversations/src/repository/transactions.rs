//! Transactional free functions for Conversations domain

use chrono::{DateTime, Utc};
use sqlx::{Sqlite, Transaction};

use crate::domain::entities::{Conversation, Message, NewMessage};

/// Insert a conversation within an existing transaction.
pub async fn insert_conversation_tx(
    transaction: &mut Transaction<'_, Sqlite>,
    title: &str,
    created_at: DateTime<Utc>,
) -> std::result::Result<Conversation, sqlx::Error> {
    sqlx::query_as::<_, Conversation>(
        r#"
        INSERT INTO conversations (title, created_at)
        VALUES (?1, ?2)
        RETURNING id, title, created_at
        "#,
    )
    .bind(title)
    .bind(created_at)
    .fetch_one(&mut **transaction)
    .await
}

/// Overwrite a conversation title within an existing transaction.
pub async fn set_title_tx(
    transaction: &mut Transaction<'_, Sqlite>,
    id: i64,
    title: &str,
) -> std::result::Result<Conversation, sqlx::Error> {
    sqlx::query_as::<_, Conversation>(
        r#"
        UPDATE conversations SET title = ?2
        WHERE id = ?1
        RETURNING id, title, created_at
        "#,
    )
    .bind(id)
    .bind(title)
    .fetch_one(&mut **transaction)
    .await
}

/// Delete every message of a conversation within an existing transaction.
pub async fn delete_messages_tx(
    transaction: &mut Transaction<'_, Sqlite>,
    conversation_id: i64,
) -> std::result::Result<u64, sqlx::Error> {
    let result = sqlx::query("DELETE FROM messages WHERE conversation_id = ?1")
        .bind(conversation_id)
        .execute(&mut **transaction)
        .await?;
    Ok(result.rows_affected())
}

/// Latest `created_at` among a conversation's messages, within an existing transaction.
pub async fn last_created_at_tx(
    transaction: &mut Transaction<'_, Sqlite>,
    conversation_id: i64,
) -> std::result::Result<Option<DateTime<Utc>>, sqlx::Error> {
    sqlx::query_scalar::<_, DateTime<Utc>>(
        r#"
        SELECT created_at FROM messages
        WHERE conversation_id = ?1
        ORDER BY created_at DESC, id DESC
        LIMIT 1
        "#,
    )
    .bind(conversation_id)
    .fetch_optional(&mut **transaction)
    .await
}

/// Insert a message with an explicit timestamp within an existing transaction.
pub async fn insert_message_tx(
    transaction: &mut Transaction<'_, Sqlite>,
    message: &NewMessage,
    created_at: DateTime<Utc>,
) -> std::result::Result<Message, sqlx::Error> {
    sqlx::query_as::<_, Message>(
        r#"
        INSERT INTO messages (conversation_id, role, content, created_at)
        VALUES (?1, ?2, ?3, ?4)
        RETURNING id, conversation_id, role, content, created_at
        "#,
    )
    .bind(message.conversation_id)
    .bind(&message.role)
    .bind(&message.content)
    .bind(created_at)
    .fetch_one(&mut **transaction)
    .await
}
