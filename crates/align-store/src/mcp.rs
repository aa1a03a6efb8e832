//! MCP definitions pool and sets

use crate::db::{SqliteStore, conflict_or, json_column, new_id};
use crate::{Error, Result};
use align_meta::{McpDefinition, McpSet, McpSetItem};
use chrono::Utc;
use rusqlite::{OptionalExtension, Row, params};

const SET_COLUMNS: &str =
    "id, name, description, items_json, is_active, is_archived, order_index, created_at, updated_at";

fn row_to_set(row: &Row<'_>) -> rusqlite::Result<McpSet> {
    Ok(McpSet {
        id: row.get("id")?,
        name: row.get("name")?,
        description: row.get("description")?,
        items: json_column(row, "items_json")?,
        is_active: row.get("is_active")?,
        is_archived: row.get("is_archived")?,
        order_index: row.get("order_index")?,
        created_at: row.get("created_at")?,
        updated_at: row.get("updated_at")?,
    })
}

impl SqliteStore {
    // Definitions

    /// Add a definition to the pool. An empty id is replaced by a fresh one.
    pub fn create_definition(&self, mut def: McpDefinition) -> Result<McpDefinition> {
        if def.id.is_empty() {
            def.id = new_id();
        }
        let now = Utc::now();
        self.conn
            .execute(
                "INSERT INTO mcp_definitions (id, name, definition_json, created_at, updated_at)
                 VALUES (?1, ?2, ?3, ?4, ?4)",
                params![def.id, def.name, serde_json::to_string(&def)?, now],
            )
            .map_err(|e| conflict_or(e, "MCP definition", &def.name))?;
        tracing::debug!(id = %def.id, name = %def.name, "Created MCP definition");
        Ok(def)
    }

    /// Replace a stored definition, keyed by its id.
    pub fn update_definition(&self, def: &McpDefinition) -> Result<()> {
        let changed = self
            .conn
            .execute(
                "UPDATE mcp_definitions SET name = ?2, definition_json = ?3, updated_at = ?4
                 WHERE id = ?1",
                params![def.id, def.name, serde_json::to_string(def)?, Utc::now()],
            )
            .map_err(|e| conflict_or(e, "MCP definition", &def.name))?;
        if changed == 0 {
            return Err(Error::not_found("MCP definition", &def.id));
        }
        Ok(())
    }

    pub fn find_definition(&self, id: &str) -> Result<Option<McpDefinition>> {
        Ok(self
            .conn
            .query_row(
                "SELECT definition_json FROM mcp_definitions WHERE id = ?1",
                params![id],
                |row| json_column(row, "definition_json"),
            )
            .optional()?)
    }

    /// All definitions in creation order.
    pub fn list_definitions(&self) -> Result<Vec<McpDefinition>> {
        let mut stmt = self.conn.prepare(
            "SELECT definition_json FROM mcp_definitions ORDER BY created_at ASC, rowid ASC",
        )?;
        let defs = stmt
            .query_map([], |row| json_column(row, "definition_json"))?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(defs)
    }

    /// Delete a definition. Sets that reference it keep the dangling item;
    /// sync skips it.
    pub fn delete_definition(&self, id: &str) -> Result<()> {
        let changed = self
            .conn
            .execute("DELETE FROM mcp_definitions WHERE id = ?1", params![id])?;
        if changed == 0 {
            return Err(Error::not_found("MCP definition", id));
        }
        Ok(())
    }

    // Sets

    pub fn create_set(
        &self,
        name: &str,
        description: Option<&str>,
        items: Vec<McpSetItem>,
    ) -> Result<McpSet> {
        let order_index: i64 = self.conn.query_row(
            "SELECT COALESCE(MAX(order_index) + 1, 0) FROM mcp_sets",
            [],
            |row| row.get(0),
        )?;

        let mut set = McpSet::new(new_id(), name, items);
        set.description = description.map(String::from);
        set.order_index = order_index;
        self.insert_set(&set)?;
        tracing::debug!(id = %set.id, name = %set.name, items = set.items.len(), "Created MCP set");
        Ok(set)
    }

    fn insert_set(&self, set: &McpSet) -> Result<()> {
        self.conn.execute(
            &format!(
                "INSERT INTO mcp_sets ({SET_COLUMNS}) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)"
            ),
            params![
                set.id,
                set.name,
                set.description,
                serde_json::to_string(&set.items)?,
                set.is_active,
                set.is_archived,
                set.order_index,
                set.created_at,
                set.updated_at
            ],
        )?;
        Ok(())
    }

    /// Replace name, description and items of a set.
    pub fn update_set(&self, set: &McpSet) -> Result<McpSet> {
        let mut updated = set.clone();
        updated.updated_at = Utc::now();
        let changed = self.conn.execute(
            "UPDATE mcp_sets SET name = ?2, description = ?3, items_json = ?4, is_archived = ?5,
                 order_index = ?6, updated_at = ?7
             WHERE id = ?1",
            params![
                updated.id,
                updated.name,
                updated.description,
                serde_json::to_string(&updated.items)?,
                updated.is_archived,
                updated.order_index,
                updated.updated_at
            ],
        )?;
        if changed == 0 {
            return Err(Error::not_found("MCP set", &set.id));
        }
        Ok(updated)
    }

    pub fn find_set(&self, id: &str) -> Result<Option<McpSet>> {
        Ok(self
            .conn
            .query_row(
                &format!("SELECT {SET_COLUMNS} FROM mcp_sets WHERE id = ?1"),
                params![id],
                row_to_set,
            )
            .optional()?)
    }

    pub fn list_sets(&self) -> Result<Vec<McpSet>> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {SET_COLUMNS} FROM mcp_sets ORDER BY order_index ASC, created_at ASC"
        ))?;
        let sets = stmt
            .query_map([], row_to_set)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(sets)
    }

    pub fn active_set(&self) -> Result<Option<McpSet>> {
        Ok(self
            .conn
            .query_row(
                &format!("SELECT {SET_COLUMNS} FROM mcp_sets WHERE is_active = 1 LIMIT 1"),
                [],
                row_to_set,
            )
            .optional()?)
    }

    pub fn delete_set(&self, id: &str) -> Result<()> {
        let changed = self
            .conn
            .execute("DELETE FROM mcp_sets WHERE id = ?1", params![id])?;
        if changed == 0 {
            return Err(Error::not_found("MCP set", id));
        }
        Ok(())
    }

    /// Make `id` the only active set.
    pub fn set_active_set(&self, id: &str) -> Result<()> {
        let tx = self.conn.unchecked_transaction()?;
        tx.execute("UPDATE mcp_sets SET is_active = 0 WHERE is_active = 1", [])?;
        let changed = tx.execute(
            "UPDATE mcp_sets SET is_active = 1, updated_at = ?2 WHERE id = ?1",
            params![id, Utc::now()],
        )?;
        if changed == 0 {
            return Err(Error::not_found("MCP set", id));
        }
        tx.commit()?;
        Ok(())
    }
}
