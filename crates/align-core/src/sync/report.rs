//! Per-tool batch results

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Skip reason when the tool's config file was not found at scan time.
pub const SKIP_NOT_INSTALLED: &str = "도구 미설치";

/// Skip reason when the tool's sync config has `enabled = false`.
pub const SKIP_DISABLED: &str = "동기화 비활성화";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RulesSyncStatus {
    Success,
    Skipped,
    Error,
    NotSupported,
}

impl RulesSyncStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Skipped => "skipped",
            Self::Error => "error",
            Self::NotSupported => "not-supported",
        }
    }
}

/// Outcome of syncing rules to one tool.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RulesSyncResult {
    pub tool_id: String,
    pub status: RulesSyncStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_path: Option<PathBuf>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum McpSyncStatus {
    Success,
    Skipped,
    Unsupported,
    Error,
}

impl McpSyncStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Skipped => "skipped",
            Self::Unsupported => "unsupported",
            Self::Error => "error",
        }
    }
}

/// Outcome of syncing MCP servers to one tool.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct McpSyncResult {
    pub tool_id: String,
    pub status: McpSyncStatus,
    /// Server names written; empty unless `status` is success.
    #[serde(default)]
    pub servers: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub config_path: Option<PathBuf>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl McpSyncResult {
    pub(crate) fn new(tool_id: &str, status: McpSyncStatus) -> Self {
        Self {
            tool_id: tool_id.to_string(),
            status,
            servers: Vec::new(),
            config_path: None,
            message: None,
        }
    }

    pub(crate) fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }
}
