//! Tool registry storage

use super::{builtins, loader};
use crate::Result;
use align_fs::expand_home;
use align_meta::ToolMetadata;
use std::path::Path;

/// Ordered lookup of tool metadata.
///
/// Iteration order is registration order: built-ins first in declaration
/// order, then user-defined tools. Re-registering an id replaces the entry
/// in place.
#[derive(Debug, Clone, Default)]
pub struct ToolRegistry {
    tools: Vec<ToolMetadata>,
}

impl ToolRegistry {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self { tools: Vec::new() }
    }

    /// Create a registry pre-populated with all built-in tools.
    ///
    /// Paths are left unexpanded.
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        for tool in builtins::builtin_tools() {
            registry.register(tool);
        }
        registry
    }

    /// Build the runtime registry: built-ins, then entries from
    /// `user_tools_file` (if it exists), with home references expanded.
    pub fn load(user_tools_file: Option<&Path>, home: &Path) -> Result<Self> {
        let mut registry = Self::with_builtins();
        if let Some(path) = user_tools_file {
            let user_tools = loader::load_user_tools(path)?;
            tracing::debug!(count = user_tools.len(), path = %path.display(), "Loaded user tools");
            for tool in user_tools {
                registry.register(tool);
            }
        }
        registry.expand_paths(home);
        Ok(registry)
    }

    /// Register a tool, replacing any entry with the same id.
    pub fn register(&mut self, tool: ToolMetadata) {
        match self.tools.iter_mut().find(|t| t.id == tool.id) {
            Some(existing) => *existing = tool,
            None => self.tools.push(tool),
        }
    }

    /// Expand `~` and home placeholders in every path field.
    pub fn expand_paths(&mut self, home: &Path) {
        let expand = |raw: &mut String| {
            *raw = expand_home(raw, home).to_string_lossy().into_owned();
        };
        for tool in &mut self.tools {
            tool.config_paths.iter_mut().for_each(expand);
            for field in [
                &mut tool.global_rules_dir,
                &mut tool.app_path,
                &mut tool.mcp_config_path,
            ] {
                if let Some(raw) = field.as_mut() {
                    expand(raw);
                }
            }
        }
    }

    /// Get a tool by id.
    pub fn get(&self, id: &str) -> Option<&ToolMetadata> {
        self.tools.iter().find(|t| t.id == id)
    }

    /// Check if a tool is registered.
    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    /// Get the number of registered tools.
    pub fn len(&self) -> usize {
        self.tools.len()
    }

    /// Check if the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }

    /// List all tool ids in registry order.
    pub fn ids(&self) -> Vec<&str> {
        self.tools.iter().map(|t| t.id.as_str()).collect()
    }

    /// Tools that declare a rules filename.
    pub fn rules_capable_tools(&self) -> Vec<&ToolMetadata> {
        self.tools.iter().filter(|t| t.supports_rules()).collect()
    }

    /// Iterate over all tools in registry order.
    pub fn iter(&self) -> impl Iterator<Item = &ToolMetadata> {
        self.tools.iter()
    }

    /// Get all tools as a slice.
    pub fn all(&self) -> &[ToolMetadata] {
        &self.tools
    }
}

impl FromIterator<ToolMetadata> for ToolRegistry {
    fn from_iter<I: IntoIterator<Item = ToolMetadata>>(iter: I) -> Self {
        let mut registry = Self::new();
        for tool in iter {
            registry.register(tool);
        }
        registry
    }
}
