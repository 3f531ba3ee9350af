use serde::Serialize;

use crate::error::MemoryError;
use crate::helpers::format_epoch;

use super::MemoryStore;

#[derive(Debug, Clone, Serialize)]
pub struct StoreStatus {
    pub entries: i64,
    pub sessions: usize,
    pub oldest: Option<i64>,
    pub db_size_bytes: u64,
}

impl StoreStatus {
    pub fn render(&self) -> String {
        if self.entries == 0 {
            return "The memory store is empty.".to_string();
        }
        let mut out = format!(
            "Memory store:\n  Entries: {}\n  Sessions: {}",
            self.entries, self.sessions
        );
        if let Some(oldest) = self.oldest {
            out.push_str(&format!(
                "\n  Oldest entry: {}",
                format_epoch(oldest.max(0) as u64)
            ));
        }
        out.push_str(&format!("\n  Database size: {} bytes", self.db_size_bytes));
        out
    }
}

impl MemoryStore {
    pub fn status(&self) -> Result<StoreStatus, MemoryError> {
        let entries = self.count()?;
        let sessions = self.session_ids()?.len();
        let oldest = self.oldest_created_at()?;
        let db_size_bytes = std::fs::metadata(self.path()).map(|m| m.len()).unwrap_or(0);
        Ok(StoreStatus {
            entries,
            sessions,
            oldest,
            db_size_bytes,
        })
    }
}
