//! Installed-tool detection
//!
//! A tool counts as installed when one of its candidate config files exists.
//! No process probing or application scanning is done.

use crate::ToolRegistry;
use align_meta::ToolMetadata;
use std::path::PathBuf;

/// Result of scanning one tool.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetectedTool {
    pub id: String,
    /// First existing config path, or `None` when nothing was found.
    pub config_path: Option<PathBuf>,
}

impl DetectedTool {
    pub fn is_installed(&self) -> bool {
        self.config_path.is_some()
    }
}

/// Scans the filesystem for tool config files.
#[derive(Debug, Default, Clone, Copy)]
pub struct ToolDetector;

impl ToolDetector {
    pub fn new() -> Self {
        Self
    }

    /// Detect every tool in the registry, in registry order.
    pub fn detect(&self, registry: &ToolRegistry) -> Vec<DetectedTool> {
        registry.iter().map(|tool| self.detect_tool(tool)).collect()
    }

    /// Detect a single tool. The MCP config path is checked before the
    /// general candidates.
    pub fn detect_tool(&self, tool: &ToolMetadata) -> DetectedTool {
        let config_path = tool
            .mcp_config_path
            .iter()
            .chain(tool.config_paths.iter())
            .map(PathBuf::from)
            .find(|path| path.is_file());

        tracing::debug!(tool = %tool.id, found = ?config_path, "Scanned tool config");
        DetectedTool {
            id: tool.id.clone(),
            config_path,
        }
    }
}
