//! Connection setup and schema

use crate::{Error, Result};
use rusqlite::{Connection, ErrorCode, Row, types::Type};
use serde::de::DeserializeOwned;
use std::path::Path;
use std::time::Duration;

const BUSY_TIMEOUT: Duration = Duration::from_millis(2000);

const SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS rules (
  id          TEXT PRIMARY KEY,
  name        TEXT NOT NULL,
  content     TEXT NOT NULL,
  is_active   INTEGER NOT NULL DEFAULT 0,
  is_archived INTEGER NOT NULL DEFAULT 0,
  order_index INTEGER NOT NULL DEFAULT 0,
  created_at  TEXT NOT NULL,
  updated_at  TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS mcp_definitions (
  id              TEXT PRIMARY KEY,
  name            TEXT NOT NULL UNIQUE,
  definition_json TEXT NOT NULL,
  created_at      TEXT NOT NULL,
  updated_at      TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS mcp_sets (
  id          TEXT PRIMARY KEY,
  name        TEXT NOT NULL,
  description TEXT,
  items_json  TEXT NOT NULL DEFAULT '[]',
  is_active   INTEGER NOT NULL DEFAULT 0,
  is_archived INTEGER NOT NULL DEFAULT 0,
  order_index INTEGER NOT NULL DEFAULT 0,
  created_at  TEXT NOT NULL,
  updated_at  TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS sync_configs (
  kind        TEXT NOT NULL CHECK (kind IN ('mcp', 'rules')),
  tool_id     TEXT NOT NULL,
  config_json TEXT NOT NULL,
  PRIMARY KEY (kind, tool_id)
);

CREATE TABLE IF NOT EXISTS sync_history (
  id         TEXT PRIMARY KEY,
  kind       TEXT NOT NULL,
  tool_id    TEXT NOT NULL,
  source_id  TEXT,
  status     TEXT NOT NULL,
  message    TEXT,
  created_at TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_sync_history_created ON sync_history (created_at DESC);
"#;

/// SQLite-backed store.
///
/// Holds one connection; all methods take `&self`. Multi-statement writes
/// run inside a transaction.
pub struct SqliteStore {
    pub(crate) conn: Connection,
}

impl SqliteStore {
    /// Open (or create) the database file and apply the schema.
    pub fn open(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent).map_err(|source| Error::Open {
                path: path.to_path_buf(),
                source,
            })?;
        }

        let conn = Connection::open(path)?;
        conn.busy_timeout(BUSY_TIMEOUT)?;
        conn.query_row("PRAGMA journal_mode=WAL;", [], |_| Ok(()))?;
        tracing::debug!(path = %path.display(), "Opened store");
        Self::init(conn)
    }

    /// Open a private in-memory database.
    pub fn open_in_memory() -> Result<Self> {
        Self::init(Connection::open_in_memory()?)
    }

    fn init(conn: Connection) -> Result<Self> {
        conn.execute_batch("PRAGMA foreign_keys = ON;")?;
        conn.execute_batch(SCHEMA)?;
        Ok(Self { conn })
    }
}

/// Decode a JSON text column inside a row mapper.
pub(crate) fn json_column<T: DeserializeOwned>(row: &Row<'_>, idx: &str) -> rusqlite::Result<T> {
    let text: String = row.get(idx)?;
    serde_json::from_str(&text).map_err(|e| {
        let column = row.as_ref().column_index(idx).unwrap_or_default();
        rusqlite::Error::FromSqlConversionFailure(column, Type::Text, Box::new(e))
    })
}

/// Turn a unique-constraint failure into [`Error::Conflict`].
pub(crate) fn conflict_or(err: rusqlite::Error, kind: &'static str, name: &str) -> Error {
    match &err {
        rusqlite::Error::SqliteFailure(code, _) if code.code == ErrorCode::ConstraintViolation => {
            Error::Conflict {
                kind,
                name: name.to_string(),
            }
        }
        _ => Error::Sqlite(err),
    }
}

pub(crate) fn new_id() -> String {
    uuid::Uuid::new_v4().to_string()
}
