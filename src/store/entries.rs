use rusqlite::{params, Row};
use serde::Serialize;
use tracing::debug;

use crate::constants::SESSION_TAG_PREFIX;
use crate::error::MemoryError;
use crate::helpers::{epoch_now, fts_match_expr};

use super::MemoryStore;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MemoryEntry {
    pub id: i64,
    pub content: String,
    pub tag: String,
    pub importance: f64,
    pub created_at: i64,
}

impl MemoryEntry {
    /// Creation date as YYYY-MM-DD.
    pub fn created_date(&self) -> String {
        crate::helpers::format_epoch(self.created_at.max(0) as u64)
    }
}

fn row_to_entry(row: &Row<'_>) -> rusqlite::Result<MemoryEntry> {
    Ok(MemoryEntry {
        id: row.get(0)?,
        content: row.get(1)?,
        tag: row.get(2)?,
        importance: row.get(3)?,
        created_at: row.get(4)?,
    })
}

fn validate_importance(importance: f64) -> Result<(), MemoryError> {
    if importance > 0.0 && importance <= 1.0 {
        Ok(())
    } else {
        Err(MemoryError::InvalidInput(format!(
            "importance must be in (0.0, 1.0], got {importance}"
        )))
    }
}

impl MemoryStore {
    /// Store one entry. Returns its rowid.
    pub fn remember(&self, content: &str, tag: &str, importance: f64) -> Result<i64, MemoryError> {
        validate_importance(importance)?;
        let conn = self.lock();
        conn.execute(
            "INSERT INTO entries (content, tag, importance, created_at) VALUES (?1, ?2, ?3, ?4)",
            params![content, tag, importance, epoch_now()],
        )?;
        Ok(conn.last_insert_rowid())
    }

    /// Store a batch of entries under one tag in a single transaction, so
    /// a partially written batch is never observable.
    pub fn remember_all(
        &self,
        contents: &[String],
        tag: &str,
        importance: f64,
    ) -> Result<(), MemoryError> {
        validate_importance(importance)?;
        if contents.is_empty() {
            return Ok(());
        }
        let mut conn = self.lock();
        let tx = conn.transaction()?;
        let now = epoch_now();
        {
            let mut stmt = tx.prepare(
                "INSERT INTO entries (content, tag, importance, created_at) VALUES (?1, ?2, ?3, ?4)",
            )?;
            for content in contents {
                stmt.execute(params![content, tag, importance, now])?;
            }
        }
        tx.commit()?;
        debug!(count = contents.len(), tag = %tag, "Stored entry batch");
        Ok(())
    }

    /// Full-text search across all entries. Results are ordered by FTS5
    /// rank scaled by importance: rank is negative, so a smaller
    /// importance shrinks its magnitude and demotes the entry.
    pub fn search(&self, query: &str, limit: usize) -> Result<Vec<MemoryEntry>, MemoryError> {
        let Some(match_expr) = fts_match_expr(query) else {
            return Ok(Vec::new());
        };
        let conn = self.lock();
        let mut stmt = conn.prepare(
            "SELECT e.id, e.content, e.tag, e.importance, e.created_at
             FROM entries e JOIN entries_fts f ON e.id = f.rowid
             WHERE entries_fts MATCH ?1
             ORDER BY f.rank * e.importance
             LIMIT ?2",
        )?;
        let rows = stmt.query_map(params![match_expr, limit as i64], row_to_entry)?;
        Ok(rows.collect::<rusqlite::Result<Vec<_>>>()?)
    }

    /// All entries for one tag, oldest first. Rowid breaks ties between
    /// same-second inserts so insertion order is preserved.
    pub fn entries_for_tag(&self, tag: &str) -> Result<Vec<MemoryEntry>, MemoryError> {
        let conn = self.lock();
        let mut stmt = conn.prepare(
            "SELECT id, content, tag, importance, created_at
             FROM entries WHERE tag = ?1
             ORDER BY created_at, id",
        )?;
        let rows = stmt.query_map(params![tag], row_to_entry)?;
        Ok(rows.collect::<rusqlite::Result<Vec<_>>>()?)
    }

    /// Delete every entry carrying the tag. Returns how many were removed.
    pub fn delete_tag(&self, tag: &str) -> Result<usize, MemoryError> {
        let conn = self.lock();
        let removed = conn.execute("DELETE FROM entries WHERE tag = ?1", params![tag])?;
        Ok(removed)
    }

    pub fn count(&self) -> Result<i64, MemoryError> {
        let conn = self.lock();
        Ok(conn.query_row("SELECT COUNT(*) FROM entries", [], |row| row.get(0))?)
    }

    pub fn count_tag(&self, tag: &str) -> Result<i64, MemoryError> {
        let conn = self.lock();
        Ok(conn.query_row(
            "SELECT COUNT(*) FROM entries WHERE tag = ?1",
            params![tag],
            |row| row.get(0),
        )?)
    }

    /// Session ids recovered from session tags, sorted.
    pub fn session_ids(&self) -> Result<Vec<String>, MemoryError> {
        let conn = self.lock();
        let mut stmt = conn.prepare(
            "SELECT DISTINCT tag FROM entries WHERE tag LIKE ?1 ORDER BY tag",
        )?;
        let pattern = format!("{SESSION_TAG_PREFIX}%");
        let rows = stmt.query_map(params![pattern], |row| row.get::<_, String>(0))?;
        let mut ids = Vec::new();
        for tag in rows {
            let tag = tag?;
            if let Some(id) = tag.strip_prefix(SESSION_TAG_PREFIX) {
                ids.push(id.to_string());
            }
        }
        Ok(ids)
    }

    pub(crate) fn oldest_created_at(&self) -> Result<Option<i64>, MemoryError> {
        let conn = self.lock();
        Ok(conn.query_row("SELECT MIN(created_at) FROM entries", [], |row| {
            row.get::<_, Option<i64>>(0)
        })?)
    }

    /// Retention sweep: drop entries older than the given number of days.
    pub fn purge_older_than(&self, days: u32) -> Result<usize, MemoryError> {
        let cutoff = epoch_now() - days as i64 * crate::constants::SECS_PER_DAY;
        let conn = self.lock();
        let removed = conn.execute(
            "DELETE FROM entries WHERE created_at < ?1",
            params![cutoff],
        )?;
        Ok(removed)
    }

    /// Every entry in the store, oldest first. Used by the export command.
    pub fn all_entries(&self) -> Result<Vec<MemoryEntry>, MemoryError> {
        let conn = self.lock();
        let mut stmt = conn.prepare(
            "SELECT id, content, tag, importance, created_at
             FROM entries ORDER BY created_at, id",
        )?;
        let rows = stmt.query_map([], row_to_entry)?;
        Ok(rows.collect::<rusqlite::Result<Vec<_>>>()?)
    }
}
