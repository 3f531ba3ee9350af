mod message;
mod session;

pub use message::{session_tag, ChatMessage, MessageRole};
pub use session::{generate_session_id, render_transcript, ChatHistory, SessionChatHistory};
