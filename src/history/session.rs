use std::path::PathBuf;

use tracing::{info, warn};

use crate::constants::CHAT_HISTORY_IMPORTANCE;
use crate::error::MemoryError;
use crate::store::MemoryStore;

use super::message::{session_tag, ChatMessage};

/// The chat-history interface orchestration code programs against.
#[cfg_attr(test, mockall::automock)]
pub trait ChatHistory: Send + Sync {
    /// The session's messages, oldest first.
    fn messages(&self) -> Result<Vec<ChatMessage>, MemoryError>;
    /// Append messages to the session.
    fn append(&self, messages: &[ChatMessage]) -> Result<(), MemoryError>;
    /// Delete the session's messages. Returns how many were removed.
    fn clear(&self) -> Result<usize, MemoryError>;
}

pub fn generate_session_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

/// Per-session view over a [`MemoryStore`]. Entries are tagged with the
/// session tag, so sessions sharing one database never see each other.
pub struct SessionChatHistory {
    session_id: String,
    tag: String,
    store: MemoryStore,
}

impl std::fmt::Debug for SessionChatHistory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionChatHistory")
            .field("session_id", &self.session_id)
            .field("tag", &self.tag)
            .finish_non_exhaustive()
    }
}

impl SessionChatHistory {
    /// Open against the default database location.
    pub fn new(session_id: &str) -> Result<Self, MemoryError> {
        Self::with_store(session_id, MemoryStore::open_default()?)
    }

    /// Open against an explicit database file.
    pub fn at(session_id: &str, db_path: impl Into<PathBuf>) -> Result<Self, MemoryError> {
        Self::with_store(session_id, MemoryStore::open(db_path)?)
    }

    pub fn with_store(session_id: &str, store: MemoryStore) -> Result<Self, MemoryError> {
        if session_id.trim().is_empty() {
            return Err(MemoryError::InvalidInput(
                "session id must not be empty".to_string(),
            ));
        }
        Ok(Self {
            tag: session_tag(session_id),
            session_id: session_id.to_string(),
            store,
        })
    }

    pub fn session_id(&self) -> &str {
        &self.session_id
    }

    pub fn store(&self) -> &MemoryStore {
        &self.store
    }
}

impl ChatHistory for SessionChatHistory {
    fn messages(&self) -> Result<Vec<ChatMessage>, MemoryError> {
        let entries = self.store.entries_for_tag(&self.tag)?;
        let mut messages = Vec::with_capacity(entries.len());
        for entry in entries {
            match ChatMessage::from_record(&entry.content) {
                Ok(message) => messages.push(message),
                Err(error) => {
                    warn!(id = entry.id, %error, "Skipping unparsable history entry");
                }
            }
        }
        Ok(messages)
    }

    fn append(&self, messages: &[ChatMessage]) -> Result<(), MemoryError> {
        if messages.is_empty() {
            return Ok(());
        }
        let records = messages
            .iter()
            .map(ChatMessage::to_record)
            .collect::<Result<Vec<_>, _>>()?;
        self.store
            .remember_all(&records, &self.tag, CHAT_HISTORY_IMPORTANCE)
    }

    fn clear(&self) -> Result<usize, MemoryError> {
        let removed = self.store.delete_tag(&self.tag)?;
        info!(session_id = %self.session_id, removed, "Cleared session history");
        Ok(removed)
    }
}

/// Render a conversation as `role: content` lines.
pub fn render_transcript(history: &dyn ChatHistory) -> Result<String, MemoryError> {
    let messages = history.messages()?;
    Ok(messages
        .iter()
        .map(|m| format!("{}: {}", m.role, m.content))
        .collect::<Vec<_>>()
        .join("\n"))
}
