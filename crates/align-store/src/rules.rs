//! Rule documents

use crate::db::{SqliteStore, new_id};
use crate::{Error, Result};
use align_meta::Rule;
use chrono::Utc;
use rusqlite::{OptionalExtension, Row, params};

const RULE_COLUMNS: &str =
    "id, name, content, is_active, is_archived, order_index, created_at, updated_at";

fn row_to_rule(row: &Row<'_>) -> rusqlite::Result<Rule> {
    Ok(Rule {
        id: row.get("id")?,
        name: row.get("name")?,
        content: row.get("content")?,
        is_active: row.get("is_active")?,
        is_archived: row.get("is_archived")?,
        order_index: row.get("order_index")?,
        created_at: row.get("created_at")?,
        updated_at: row.get("updated_at")?,
    })
}

impl SqliteStore {
    /// Create a rule at the end of the list.
    pub fn create_rule(&self, name: &str, content: &str) -> Result<Rule> {
        let order_index: i64 = self.conn.query_row(
            "SELECT COALESCE(MAX(order_index) + 1, 0) FROM rules",
            [],
            |row| row.get(0),
        )?;

        let mut rule = Rule::new(new_id(), name, content);
        rule.order_index = order_index;

        self.conn.execute(
            &format!("INSERT INTO rules ({RULE_COLUMNS}) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)"),
            params![
                rule.id,
                rule.name,
                rule.content,
                rule.is_active,
                rule.is_archived,
                rule.order_index,
                rule.created_at,
                rule.updated_at
            ],
        )?;
        tracing::debug!(id = %rule.id, name = %rule.name, "Created rule");
        Ok(rule)
    }

    /// Get a rule by id.
    pub fn find_rule(&self, id: &str) -> Result<Option<Rule>> {
        Ok(self
            .conn
            .query_row(
                &format!("SELECT {RULE_COLUMNS} FROM rules WHERE id = ?1"),
                params![id],
                row_to_rule,
            )
            .optional()?)
    }

    /// All rules, archived ones included, by `order_index`.
    pub fn list_rules(&self) -> Result<Vec<Rule>> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {RULE_COLUMNS} FROM rules ORDER BY order_index ASC, created_at ASC"
        ))?;
        let rules = stmt
            .query_map([], row_to_rule)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rules)
    }

    /// The active rule, if any.
    pub fn active_rule(&self) -> Result<Option<Rule>> {
        Ok(self
            .conn
            .query_row(
                &format!("SELECT {RULE_COLUMNS} FROM rules WHERE is_active = 1 LIMIT 1"),
                [],
                row_to_rule,
            )
            .optional()?)
    }

    /// Update name and/or content in place.
    pub fn update_rule(&self, id: &str, name: Option<&str>, content: Option<&str>) -> Result<Rule> {
        let mut rule = self
            .find_rule(id)?
            .ok_or_else(|| Error::not_found("Rule", id))?;
        if let Some(name) = name {
            rule.name = name.to_string();
        }
        if let Some(content) = content {
            rule.content = content.to_string();
        }
        rule.updated_at = Utc::now();

        self.conn.execute(
            "UPDATE rules SET name = ?2, content = ?3, updated_at = ?4 WHERE id = ?1",
            params![rule.id, rule.name, rule.content, rule.updated_at],
        )?;
        Ok(rule)
    }

    /// Set or clear the archived flag.
    pub fn archive_rule(&self, id: &str, archived: bool) -> Result<()> {
        let changed = self.conn.execute(
            "UPDATE rules SET is_archived = ?2, updated_at = ?3 WHERE id = ?1",
            params![id, archived, Utc::now()],
        )?;
        if changed == 0 {
            return Err(Error::not_found("Rule", id));
        }
        Ok(())
    }

    pub fn delete_rule(&self, id: &str) -> Result<()> {
        let changed = self
            .conn
            .execute("DELETE FROM rules WHERE id = ?1", params![id])?;
        if changed == 0 {
            return Err(Error::not_found("Rule", id));
        }
        Ok(())
    }

    /// Make `id` the only active rule.
    pub fn set_active_rule(&self, id: &str) -> Result<()> {
        let tx = self.conn.unchecked_transaction()?;
        tx.execute("UPDATE rules SET is_active = 0 WHERE is_active = 1", [])?;
        let changed = tx.execute(
            "UPDATE rules SET is_active = 1, updated_at = ?2 WHERE id = ?1",
            params![id, Utc::now()],
        )?;
        if changed == 0 {
            // Dropping the transaction rolls back the deactivation
            return Err(Error::not_found("Rule", id));
        }
        tx.commit()?;
        Ok(())
    }
}
