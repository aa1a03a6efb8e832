//! MCP server synchronization
//!
//! Resolves the effective server list (from a set, an id filter, or the
//! whole definitions pool), translates it to the tool's server object shape
//! and merges it into the tool's config file under its servers key.

use super::report::{McpSyncResult, McpSyncStatus, SKIP_DISABLED, SKIP_NOT_INSTALLED};
use super::target::TargetWriter;
use crate::backup::BackupOptions;
use crate::events::{EventSink, SyncEvent};
use crate::state::SyncStateStore;
use crate::{Error, Result};
use align_blocks::{SyncStrategy, merge_mcp_servers};
use align_meta::{McpDefinition, McpStore, SyncConfigStore, ToolMetadata};
use align_tools::{DetectedTool, ToolDetector, ToolRegistry, servers_map, update_servers};
use std::path::{Path, PathBuf};

/// Synchronizes MCP server definitions to tool configs.
pub struct McpSyncer<'a> {
    registry: &'a ToolRegistry,
    mcp: &'a dyn McpStore,
    configs: &'a dyn SyncConfigStore,
    state: &'a SyncStateStore,
    events: &'a dyn EventSink,
    strategy: SyncStrategy,
    backup: BackupOptions,
}

impl<'a> McpSyncer<'a> {
    pub fn new(
        registry: &'a ToolRegistry,
        mcp: &'a dyn McpStore,
        configs: &'a dyn SyncConfigStore,
        state: &'a SyncStateStore,
        events: &'a dyn EventSink,
    ) -> Self {
        Self {
            registry,
            mcp,
            configs,
            state,
            events,
            strategy: SyncStrategy::default(),
            backup: BackupOptions::default(),
        }
    }

    /// Strategy used by [`Self::sync_all_tools`].
    pub fn with_strategy(mut self, strategy: SyncStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// Backup options used when a call does not pass its own.
    pub fn with_backup_options(mut self, backup: BackupOptions) -> Self {
        self.backup = backup;
        self
    }

    /// The definitions to sync, in order.
    ///
    /// With a set id, the set's enabled items in set order; items whose
    /// definition no longer exists are skipped. Otherwise the pool filtered
    /// by `server_ids`, or the whole pool.
    pub fn resolve_definitions(
        &self,
        source_id: Option<&str>,
        server_ids: Option<&[String]>,
    ) -> Result<Vec<McpDefinition>> {
        let pool = self.mcp.get_mcp_definitions()?;

        if let Some(set_id) = source_id {
            let set = self
                .mcp
                .get_mcp_set(set_id)?
                .ok_or_else(|| Error::not_found("MCP set", set_id))?;

            let mut resolved = Vec::new();
            for server_id in set.enabled_server_ids() {
                match pool.iter().find(|def| def.id == server_id) {
                    Some(def) => resolved.push(def.clone()),
                    None => {
                        tracing::warn!(set = %set.name, server_id, "Set item references a missing definition")
                    }
                }
            }
            return Ok(resolved);
        }

        Ok(match server_ids {
            Some(ids) => pool
                .into_iter()
                .filter(|def| ids.iter().any(|id| *id == def.id))
                .collect(),
            None => pool,
        })
    }

    fn default_config_path(tool: &ToolMetadata) -> Result<PathBuf> {
        tool.mcp_target()
            .map(PathBuf::from)
            .ok_or_else(|| Error::validation(format!("tool '{}' has no MCP config path", tool.id)))
    }

    /// Sync MCP servers into one tool's config file.
    ///
    /// `config_path` defaults to the tool's MCP config path. Returns the
    /// names of the servers written.
    pub fn sync_tool_mcp(
        &self,
        tool_id: &str,
        config_path: Option<&Path>,
        server_ids: Option<&[String]>,
        strategy: SyncStrategy,
        backup: Option<&BackupOptions>,
        source_id: Option<&str>,
    ) -> Result<Vec<String>> {
        let tool = self
            .registry
            .get(tool_id)
            .ok_or_else(|| Error::not_found("Tool", tool_id))?;
        if !tool.supports_mcp {
            return Err(Error::NotSupported {
                tool: tool.id.clone(),
                feature: "MCP servers",
            });
        }
        let path = match config_path {
            Some(path) => path.to_path_buf(),
            None => Self::default_config_path(tool)?,
        };

        let definitions = self.resolve_definitions(source_id, server_ids)?;
        let applied: Vec<String> = definitions.iter().map(|def| def.name.clone()).collect();
        let incoming = servers_map(&definitions);

        tracing::debug!(
            tool = tool_id,
            config = %path.display(),
            %strategy,
            servers = applied.len(),
            "Syncing MCP servers"
        );

        let writer = TargetWriter {
            state: self.state,
            events: self.events,
        };
        writer.write(tool_id, &path, backup.unwrap_or(&self.backup), |current| {
            update_servers(current, tool.format, tool.servers_key(), &path, |existing| {
                merge_mcp_servers(strategy, existing, &incoming)
            })
            .map_err(|e| Error::sync(e.to_string()))
        })?;

        Ok(applied)
    }

    /// Sync MCP servers to every registered tool.
    ///
    /// Tools are classified in registry order: unsupported when the tool
    /// takes no MCP servers, skipped when its config was not detected or its
    /// sync config is disabled, otherwise synced. `tools_override` replaces
    /// the filesystem scan. Never fails; one result per tool.
    pub fn sync_all_tools(
        &self,
        source_id: Option<&str>,
        tools_override: Option<&[DetectedTool]>,
    ) -> Vec<McpSyncResult> {
        let detected = match tools_override {
            Some(tools) => tools.to_vec(),
            None => ToolDetector::new().detect(self.registry),
        };

        let configs = match self.configs.mcp_sync_config() {
            Ok(configs) => configs,
            Err(e) => {
                tracing::warn!(error = %e, "Could not load MCP sync config; using defaults");
                Default::default()
            }
        };

        self.registry
            .iter()
            .map(|tool| {
                if !tool.supports_mcp {
                    return McpSyncResult::new(&tool.id, McpSyncStatus::Unsupported);
                }

                let config_path = detected
                    .iter()
                    .find(|d| d.id == tool.id)
                    .and_then(|d| d.config_path.clone());
                let Some(config_path) = config_path else {
                    return self.skipped(&tool.id, SKIP_NOT_INSTALLED);
                };

                let tool_config = configs.get(&tool.id).cloned().unwrap_or_default();
                if !tool_config.enabled {
                    return self.skipped(&tool.id, SKIP_DISABLED);
                }

                match self.sync_tool_mcp(
                    &tool.id,
                    Some(&config_path),
                    tool_config.servers.as_deref(),
                    self.strategy,
                    None,
                    source_id,
                ) {
                    Ok(servers) => McpSyncResult {
                        servers,
                        config_path: Some(config_path),
                        ..McpSyncResult::new(&tool.id, McpSyncStatus::Success)
                    },
                    Err(e) => {
                        self.events.emit(SyncEvent::ToolFailed {
                            tool: tool.id.clone(),
                            message: e.to_string(),
                        });
                        McpSyncResult {
                            config_path: Some(config_path),
                            ..McpSyncResult::new(&tool.id, McpSyncStatus::Error)
                        }
                        .with_message(e.to_string())
                    }
                }
            })
            .collect()
    }

    fn skipped(&self, tool_id: &str, reason: &str) -> McpSyncResult {
        self.events.emit(SyncEvent::ToolSkipped {
            tool: tool_id.to_string(),
            reason: reason.to_string(),
        });
        McpSyncResult::new(tool_id, McpSyncStatus::Skipped).with_message(reason)
    }
}
