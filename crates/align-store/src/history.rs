//! Sync history

use crate::db::{SqliteStore, new_id};
use crate::{Error, Result};
use align_meta::{SyncHistoryEntry, SyncKind};
use chrono::Utc;
use rusqlite::types::Type;
use rusqlite::{OptionalExtension, Row, params};

const HISTORY_COLUMNS: &str = "id, kind, tool_id, source_id, status, message, created_at";

fn row_to_entry(row: &Row<'_>) -> rusqlite::Result<SyncHistoryEntry> {
    let kind: String = row.get("kind")?;
    let kind = SyncKind::parse(&kind).ok_or_else(|| {
        rusqlite::Error::FromSqlConversionFailure(
            1,
            Type::Text,
            format!("unknown sync kind '{kind}'").into(),
        )
    })?;

    Ok(SyncHistoryEntry {
        id: row.get("id")?,
        kind,
        tool_id: row.get("tool_id")?,
        source_id: row.get("source_id")?,
        status: row.get("status")?,
        message: row.get("message")?,
        created_at: row.get("created_at")?,
    })
}

impl SqliteStore {
    /// Append a history entry and return it with its id and timestamp.
    pub fn record_history(
        &self,
        kind: SyncKind,
        tool_id: &str,
        source_id: Option<&str>,
        status: &str,
        message: Option<&str>,
    ) -> Result<SyncHistoryEntry> {
        let entry = SyncHistoryEntry {
            id: new_id(),
            kind,
            tool_id: tool_id.to_string(),
            source_id: source_id.map(String::from),
            status: status.to_string(),
            message: message.map(String::from),
            created_at: Utc::now(),
        };
        self.conn.execute(
            &format!("INSERT INTO sync_history ({HISTORY_COLUMNS}) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)"),
            params![
                entry.id,
                entry.kind.as_str(),
                entry.tool_id,
                entry.source_id,
                entry.status,
                entry.message,
                entry.created_at
            ],
        )?;
        Ok(entry)
    }

    /// Most recent entries first.
    pub fn list_history(&self, limit: usize) -> Result<Vec<SyncHistoryEntry>> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {HISTORY_COLUMNS} FROM sync_history ORDER BY created_at DESC, rowid DESC LIMIT ?1"
        ))?;
        let limit = i64::try_from(limit).unwrap_or(i64::MAX);
        let entries = stmt
            .query_map(params![limit], row_to_entry)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(entries)
    }

    pub fn get_history(&self, id: &str) -> Result<SyncHistoryEntry> {
        self.conn
            .query_row(
                &format!("SELECT {HISTORY_COLUMNS} FROM sync_history WHERE id = ?1"),
                params![id],
                row_to_entry,
            )
            .optional()?
            .ok_or_else(|| Error::not_found("History entry", id))
    }
}
