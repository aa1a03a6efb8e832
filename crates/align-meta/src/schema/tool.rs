//! Tool metadata schema
//!
//! A registry entry describes where an external tool keeps its config and
//! which of the two sync kinds it accepts.
//!
//! # Example JSON (user `tools.json` entry)
//!
//! ```json
//! {
//!   "id": "my-agent",
//!   "name": "My Agent",
//!   "category": "cli-agent",
//!   "configPaths": ["~/.my-agent/settings.json"],
//!   "format": "json",
//!   "supportsMcp": true,
//!   "rulesFilename": "AGENT.md",
//!   "globalRulesDir": "~/.my-agent"
//! }
//! ```

use serde::{Deserialize, Serialize};

/// Broad grouping used for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ToolCategory {
    Ide,
    #[default]
    CliAgent,
    Desktop,
}

impl ToolCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Ide => "ide",
            Self::CliAgent => "cli-agent",
            Self::Desktop => "desktop",
        }
    }
}

/// Native format of a tool's config file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ToolFormat {
    #[default]
    Json,
    Toml,
}

impl ToolFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Toml => "toml",
        }
    }
}

/// Registry entry for one external tool.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolMetadata {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub category: ToolCategory,
    /// Candidate config file locations, most preferred first.
    #[serde(default)]
    pub config_paths: Vec<String>,
    #[serde(default)]
    pub format: ToolFormat,
    #[serde(default)]
    pub supports_mcp: bool,
    /// Rules file name; tools without one do not take rules.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rules_filename: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub global_rules_dir: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub app_path: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cli_command: Option<String>,
    /// MCP config file when it differs from the first config path.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mcp_config_path: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mcp_servers_key: Option<String>,
}

impl ToolMetadata {
    /// Create a minimal JSON-format entry.
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            category: ToolCategory::default(),
            config_paths: Vec::new(),
            format: ToolFormat::default(),
            supports_mcp: false,
            rules_filename: None,
            global_rules_dir: None,
            app_path: None,
            cli_command: None,
            mcp_config_path: None,
            mcp_servers_key: None,
        }
    }

    /// Key of the server map inside the tool's config.
    pub fn servers_key(&self) -> &str {
        match (&self.mcp_servers_key, self.format) {
            (Some(key), _) => key,
            (None, ToolFormat::Json) => "mcpServers",
            (None, ToolFormat::Toml) => "mcp_servers",
        }
    }

    /// The file MCP servers are written to, before home expansion.
    pub fn mcp_target(&self) -> Option<&str> {
        self.mcp_config_path
            .as_deref()
            .or_else(|| self.config_paths.first().map(String::as_str))
    }

    pub fn supports_rules(&self) -> bool {
        self.rules_filename.is_some()
    }
}
