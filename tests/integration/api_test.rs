//! API endpoint integration tests
//!
//! Drives the composed router end to end over an in-memory store.

mod common;
mod conversations;
mod messages;
