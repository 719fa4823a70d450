//! Conversations domain: chat threads, messages, assistant replies

pub mod api;
pub mod domain;
pub mod repository;

// Re-export domain types at the crate root for convenience
pub use domain::entities::{Conversation, Message, MessageRole, NewMessage};
pub use domain::history::assemble_history;
pub use domain::reply::AssistantReply;

// Re-export repository types
pub use repository::seed::seed_if_empty;
pub use repository::{ConversationRepository, ConversationsRepositories, MessageRepository};

// Re-export API types
pub use api::routes;
pub use api::ConversationsState;
