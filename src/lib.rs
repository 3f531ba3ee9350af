//! Local SQLite-backed memory store for LLM chat sessions.
//!
//! The store keeps tagged, importance-weighted memory entries in a single
//! database file and exposes a session-scoped chat-history adapter on top,
//! so orchestration code can read, append, and clear a conversation without
//! knowing anything about the storage underneath.

pub mod constants;
mod error;
mod helpers;
pub mod history;
pub mod store;

pub use error::MemoryError;
pub use history::{
    generate_session_id, render_transcript, session_tag, ChatHistory, ChatMessage, MessageRole,
    SessionChatHistory,
};
pub use store::{default_db_path, inject_context, MemoryEntry, MemoryStore, StoreStatus};
