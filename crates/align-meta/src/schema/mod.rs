//! Schema definitions for rules, MCP servers, tools and sync configuration
//!
//! All records serialize with camelCase keys, matching the JSON the store
//! and the user tool-override file use.

pub mod history;
pub mod mcp;
pub mod rule;
pub mod sync_config;
pub mod tool;

pub use history::{SyncHistoryEntry, SyncKind};
pub use mcp::{McpDefinition, McpSet, McpSetItem, McpTransport};
pub use rule::Rule;
pub use sync_config::{McpSyncConfig, McpToolSyncConfig, RulesSyncConfig, RulesToolSyncConfig};
pub use tool::{ToolCategory, ToolFormat, ToolMetadata};
