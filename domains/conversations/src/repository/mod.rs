//! Repository implementations for Conversations domain

pub mod conversations;
pub mod messages;
pub mod seed;
pub mod transactions;

use sqlx::SqlitePool;

pub use conversations::ConversationRepository;
pub use messages::MessageRepository;

/// Combined repository access for the Conversations domain
#[derive(Clone)]
pub struct ConversationsRepositories {
    pool: SqlitePool,
    pub conversations: ConversationRepository,
    pub messages: MessageRepository,
}

impl ConversationsRepositories {
    pub fn new(pool: SqlitePool) -> Self {
        Self {
            conversations: ConversationRepository::new(pool.clone()),
            messages: MessageRepository::new(pool.clone()),
            pool,
        }
    }

    /// Get a reference to the underlying pool
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}
