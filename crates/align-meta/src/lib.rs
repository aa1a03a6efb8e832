//! Data model and store interfaces for align-agents.
//!
//! The schema types describe what gets synced (rules, MCP definitions and
//! sets), where it goes (tool metadata) and which tools take part (sync
//! configs). The [`store`] traits are the seam between the sync core and
//! whatever persists those records.

pub mod error;
pub mod schema;
pub mod store;

pub use error::{Error, Result};
pub use schema::{
    McpDefinition, McpSet, McpSetItem, McpSyncConfig, McpToolSyncConfig, McpTransport, Rule,
    RulesSyncConfig, RulesToolSyncConfig, SyncHistoryEntry, SyncKind, ToolCategory, ToolFormat,
    ToolMetadata,
};
pub use store::{McpStore, RuleStore, SyncConfigStore};
