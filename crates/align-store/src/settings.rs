//! Per-tool sync settings and the `align_meta::store` trait impls

use crate::Result;
use crate::db::{SqliteStore, json_column};
use align_meta::{
    McpDefinition, McpSet, McpStore, McpSyncConfig, Rule, RuleStore, RulesSyncConfig,
    SyncConfigStore,
};
use rusqlite::params;
use serde::{Serialize, de::DeserializeOwned};
use std::collections::BTreeMap;

const MCP_KIND: &str = "mcp";
const RULES_KIND: &str = "rules";

impl SqliteStore {
    fn load_configs<T: DeserializeOwned>(&self, kind: &str) -> Result<BTreeMap<String, T>> {
        let mut stmt = self
            .conn
            .prepare("SELECT tool_id, config_json FROM sync_configs WHERE kind = ?1")?;
        let entries = stmt
            .query_map(params![kind], |row| {
                Ok((row.get::<_, String>("tool_id")?, json_column(row, "config_json")?))
            })?
            .collect::<rusqlite::Result<BTreeMap<_, _>>>()?;
        Ok(entries)
    }

    /// Replace the whole map for `kind` in one transaction.
    fn save_configs<T: Serialize>(&self, kind: &str, configs: &BTreeMap<String, T>) -> Result<()> {
        let tx = self.conn.unchecked_transaction()?;
        tx.execute("DELETE FROM sync_configs WHERE kind = ?1", params![kind])?;
        {
            let mut insert = tx.prepare(
                "INSERT INTO sync_configs (kind, tool_id, config_json) VALUES (?1, ?2, ?3)",
            )?;
            for (tool_id, config) in configs {
                insert.execute(params![kind, tool_id, serde_json::to_string(config)?])?;
            }
        }
        tx.commit()?;
        tracing::debug!(kind, tools = configs.len(), "Saved sync config");
        Ok(())
    }

    pub fn load_mcp_sync_config(&self) -> Result<McpSyncConfig> {
        self.load_configs(MCP_KIND)
    }

    pub fn save_mcp_sync_config(&self, config: &McpSyncConfig) -> Result<()> {
        self.save_configs(MCP_KIND, config)
    }

    pub fn load_rules_sync_config(&self) -> Result<RulesSyncConfig> {
        self.load_configs(RULES_KIND)
    }

    pub fn save_rules_sync_config(&self, config: &RulesSyncConfig) -> Result<()> {
        self.save_configs(RULES_KIND, config)
    }
}

impl RuleStore for SqliteStore {
    fn get_rule(&self, id: &str) -> align_meta::Result<Option<Rule>> {
        Ok(self.find_rule(id)?)
    }
}

impl McpStore for SqliteStore {
    fn get_mcp_set(&self, id: &str) -> align_meta::Result<Option<McpSet>> {
        Ok(self.find_set(id)?)
    }

    fn get_mcp_definitions(&self) -> align_meta::Result<Vec<McpDefinition>> {
        Ok(self.list_definitions()?)
    }
}

impl SyncConfigStore for SqliteStore {
    fn mcp_sync_config(&self) -> align_meta::Result<McpSyncConfig> {
        Ok(self.load_mcp_sync_config()?)
    }

    fn rules_sync_config(&self) -> align_meta::Result<RulesSyncConfig> {
        Ok(self.load_rules_sync_config()?)
    }
}
