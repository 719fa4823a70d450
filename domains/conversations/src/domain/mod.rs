//! Domain layer for Conversations: entities, history assembly, reply policy

pub mod entities;
pub mod history;
pub mod reply;
