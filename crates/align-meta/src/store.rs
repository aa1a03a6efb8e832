//! Store interfaces consumed by the sync core.
//!
//! These are the read paths the orchestrators need. The SQLite store in
//! `align-store` implements them; tests use in-memory fakes.

use crate::Result;
use crate::schema::{McpDefinition, McpSet, McpSyncConfig, Rule, RulesSyncConfig};

/// Source of rule documents.
pub trait RuleStore {
    fn get_rule(&self, id: &str) -> Result<Option<Rule>>;
}

/// Source of MCP definitions and sets.
pub trait McpStore {
    fn get_mcp_set(&self, id: &str) -> Result<Option<McpSet>>;

    /// All definitions in the pool, in stable order.
    fn get_mcp_definitions(&self) -> Result<Vec<McpDefinition>>;
}

/// Per-tool sync settings.
pub trait SyncConfigStore {
    fn mcp_sync_config(&self) -> Result<McpSyncConfig>;

    fn rules_sync_config(&self) -> Result<RulesSyncConfig>;
}
