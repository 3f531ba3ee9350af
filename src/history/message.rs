use std::fmt;

use serde::{Deserialize, Serialize};

use crate::constants::SESSION_TAG_PREFIX;
use crate::error::MemoryError;

/// Role variants mirror the message types of the orchestration libraries
/// this store plugs into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    Human,
    Ai,
    System,
    Function,
    Tool,
}

impl MessageRole {
    pub fn as_str(self) -> &'static str {
        match self {
            MessageRole::Human => "human",
            MessageRole::Ai => "ai",
            MessageRole::System => "system",
            MessageRole::Function => "function",
            MessageRole::Tool => "tool",
        }
    }
}

impl fmt::Display for MessageRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: MessageRole,
    pub content: String,
}

impl ChatMessage {
    pub fn new(role: MessageRole, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
        }
    }

    pub fn human(content: impl Into<String>) -> Self {
        Self::new(MessageRole::Human, content)
    }

    pub fn ai(content: impl Into<String>) -> Self {
        Self::new(MessageRole::Ai, content)
    }

    pub fn system(content: impl Into<String>) -> Self {
        Self::new(MessageRole::System, content)
    }

    /// Serialized form stored in a memory entry's content field.
    pub(crate) fn to_record(&self) -> Result<String, MemoryError> {
        Ok(serde_json::to_string(self)?)
    }

    pub(crate) fn from_record(record: &str) -> Result<Self, MemoryError> {
        Ok(serde_json::from_str(record)?)
    }
}

pub fn session_tag(session_id: &str) -> String {
    format!("{SESSION_TAG_PREFIX}{session_id}")
}
