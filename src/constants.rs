/// Tag prefix that scopes a memory entry to one chat session.
pub const SESSION_TAG_PREFIX: &str = "langchain:session:";

/// Importance assigned to chat-history entries. Kept low so transcript
/// lines rank below deliberately saved memories in search results.
pub const CHAT_HISTORY_IMPORTANCE: f64 = 0.25;

/// Importance for entries saved without an explicit weight.
pub const DEFAULT_IMPORTANCE: f64 = 1.0;

pub const DEFAULT_SEARCH_LIMIT: usize = 5;

/// How many trailing session messages the recall block includes.
pub const RECALL_MESSAGE_COUNT: usize = 5;

/// Preview length for search results and transcripts.
pub const PREVIEW_LEN: usize = 100;

pub const SECS_PER_DAY: i64 = 86_400;

pub const BUSY_TIMEOUT_MS: u64 = 5_000;

pub const DB_DIR_NAME: &str = ".localmem";
pub const DB_FILE_NAME: &str = "memory.db";
