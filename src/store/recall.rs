use tracing::warn;

use crate::constants::{DEFAULT_SEARCH_LIMIT, PREVIEW_LEN, RECALL_MESSAGE_COUNT};
use crate::helpers::truncate;
use crate::history::{session_tag, ChatMessage};

use super::entries::MemoryEntry;
use super::MemoryStore;

/// Prefix `text` with a context block recalled from the store: recent
/// messages from this session plus importance-weighted search hits from
/// other tags. Returns `text` unchanged when there is nothing to add.
pub fn inject_context(store: &MemoryStore, session_id: &str, text: &str) -> String {
    let tag = session_tag(session_id);

    let recent = match store.entries_for_tag(&tag) {
        Ok(entries) => entries,
        Err(error) => {
            warn!(%error, "Failed to read session history for recall");
            return text.to_string();
        }
    };

    let hits: Vec<MemoryEntry> = match store.search(text, DEFAULT_SEARCH_LIMIT) {
        Ok(hits) => hits.into_iter().filter(|e| e.tag != tag).collect(),
        Err(error) => {
            warn!(%error, "Memory search failed during recall");
            Vec::new()
        }
    };

    if recent.is_empty() && hits.is_empty() {
        return text.to_string();
    }

    let mut ctx = String::new();

    if !hits.is_empty() {
        ctx.push_str("Relevant memories:\n");
        for entry in &hits {
            let (_, preview) = display_parts(entry);
            ctx.push_str(&format!(
                "- [{}] {}: {preview}\n",
                entry.tag,
                entry.created_date()
            ));
        }
    }

    if !recent.is_empty() {
        if !ctx.is_empty() {
            ctx.push('\n');
        }
        ctx.push_str("Recent messages in this session:\n");
        let start = recent.len().saturating_sub(RECALL_MESSAGE_COUNT);
        for entry in &recent[start..] {
            let (role, preview) = display_parts(entry);
            ctx.push_str(&format!("- [{role}]: {preview}\n"));
        }
    }

    ctx.push_str("---\n");
    ctx.push_str(text);
    ctx
}

/// Chat entries hold a JSON message record; show its role and content.
/// Anything else is shown raw.
fn display_parts(entry: &MemoryEntry) -> (String, String) {
    let (role, content) = match ChatMessage::from_record(&entry.content) {
        Ok(message) => (message.role.to_string(), message.content),
        Err(_) => ("note".to_string(), entry.content.clone()),
    };
    (role, truncate(&content, PREVIEW_LEN).replace('\n', " "))
}

#[cfg(test)]
mod tests {
    use super::super::schema::tests::fresh_store;
    use super::*;
    use crate::history::{ChatHistory, SessionChatHistory};

    #[test]
    fn test_inject_context_no_memory() {
        let store = fresh_store("recall_empty");
        let result = inject_context(&store, "s1", "Hello");
        assert_eq!(result, "Hello");
    }

    #[test]
    fn test_inject_context_with_session_messages() {
        let store = fresh_store("recall_session");
        let history = SessionChatHistory::with_store("s1", store.clone()).unwrap();
        history
            .append(&[
                ChatMessage::human("How do I configure nginx?"),
                ChatMessage::ai("Edit /etc/nginx/nginx.conf for the main config."),
            ])
            .unwrap();
        let result = inject_context(&store, "s1", "And for TLS?");
        assert!(result.contains("Recent messages in this session:"));
        assert!(result.contains("[human]"));
        assert!(result.contains("nginx"));
        assert!(result.ends_with("And for TLS?"));
    }

    #[test]
    fn test_inject_context_with_cross_tag_hits() {
        let store = fresh_store("recall_hits");
        store
            .remember("The staging database lives on host db-stage-2", "note", 1.0)
            .unwrap();
        let result = inject_context(&store, "s1", "which host runs the staging database?");
        assert!(result.contains("Relevant memories:"));
        assert!(result.contains("db-stage-2"));
    }

    #[test]
    fn test_inject_context_excludes_own_session_from_hits() {
        let store = fresh_store("recall_own");
        let history = SessionChatHistory::with_store("s1", store.clone()).unwrap();
        history
            .append(&[ChatMessage::human("remember the zebra password")])
            .unwrap();
        let result = inject_context(&store, "s1", "zebra password");
        // own messages appear as recent history, never as search hits
        assert!(!result.contains("Relevant memories:"));
        assert!(result.contains("Recent messages in this session:"));
    }

    #[test]
    fn test_inject_context_limits_recent_messages() {
        let store = fresh_store("recall_limit");
        let history = SessionChatHistory::with_store("s1", store.clone()).unwrap();
        let messages: Vec<ChatMessage> = (0..12)
            .map(|i| ChatMessage::human(format!("message number {i}")))
            .collect();
        history.append(&messages).unwrap();
        let result = inject_context(&store, "s1", "qq");
        assert!(!result.contains("message number 0"));
        assert!(result.contains("message number 11"));
    }
}
