//! Per-tool sync configuration

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

fn enabled_by_default() -> bool {
    true
}

/// MCP sync settings for one tool.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct McpToolSyncConfig {
    #[serde(default = "enabled_by_default")]
    pub enabled: bool,
    /// Explicit definition ids; `None` means every definition.
    #[serde(default)]
    pub servers: Option<Vec<String>>,
}

impl Default for McpToolSyncConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            servers: None,
        }
    }
}

/// Rules sync settings for one tool.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RulesToolSyncConfig {
    #[serde(default = "enabled_by_default")]
    pub enabled: bool,
    #[serde(default)]
    pub target_path: Option<String>,
    #[serde(default)]
    pub global: bool,
}

impl Default for RulesToolSyncConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            target_path: None,
            global: false,
        }
    }
}

/// Tool id to MCP settings. Tools without an entry are enabled.
pub type McpSyncConfig = BTreeMap<String, McpToolSyncConfig>;

/// Tool id to rules settings. Tools without an entry are enabled.
pub type RulesSyncConfig = BTreeMap<String, RulesToolSyncConfig>;
