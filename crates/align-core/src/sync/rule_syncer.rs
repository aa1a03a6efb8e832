//! Rules synchronization
//!
//! Writes the content of one stored rule into each tool's rules file,
//! either under a project directory or in the tool's global rules directory.

use super::report::{RulesSyncResult, RulesSyncStatus, SKIP_DISABLED};
use super::target::TargetWriter;
use crate::backup::BackupOptions;
use crate::events::{EventSink, SyncEvent};
use crate::state::SyncStateStore;
use crate::{Error, Result};
use align_blocks::SyncStrategy;
use align_fs::expand_home;
use align_meta::{RuleStore, SyncConfigStore, ToolMetadata};
use align_tools::ToolRegistry;
use std::path::{Path, PathBuf};

/// Synchronizes rule documents to tool rules files.
pub struct RuleSyncer<'a> {
    registry: &'a ToolRegistry,
    rules: &'a dyn RuleStore,
    configs: &'a dyn SyncConfigStore,
    state: &'a SyncStateStore,
    events: &'a dyn EventSink,
    backup: BackupOptions,
    home: Option<PathBuf>,
}

impl<'a> RuleSyncer<'a> {
    pub fn new(
        registry: &'a ToolRegistry,
        rules: &'a dyn RuleStore,
        configs: &'a dyn SyncConfigStore,
        state: &'a SyncStateStore,
        events: &'a dyn EventSink,
    ) -> Self {
        Self {
            registry,
            rules,
            configs,
            state,
            events,
            backup: BackupOptions::default(),
            home: None,
        }
    }

    /// Backup options used when a call does not pass its own.
    pub fn with_backup_options(mut self, backup: BackupOptions) -> Self {
        self.backup = backup;
        self
    }

    /// Home directory for `~` in per-tool target paths.
    pub fn with_home(mut self, home: &Path) -> Self {
        self.home = Some(home.to_path_buf());
        self
    }

    fn configured_path(&self, raw: &str) -> PathBuf {
        match &self.home {
            Some(home) => expand_home(raw, home),
            None => PathBuf::from(raw),
        }
    }

    /// Resolve the rules file a sync would write.
    ///
    /// `global` selects the tool's global rules directory; otherwise the file
    /// goes directly under `project`.
    pub fn resolve_target(
        &self,
        tool: &ToolMetadata,
        project: Option<&Path>,
        global: bool,
    ) -> Result<PathBuf> {
        let filename = tool
            .rules_filename
            .as_deref()
            .ok_or_else(|| Error::NotSupported {
                tool: tool.id.clone(),
                feature: "rules",
            })?;

        let dir = if global {
            PathBuf::from(tool.global_rules_dir.as_deref().ok_or_else(|| {
                Error::NotSupported {
                    tool: tool.id.clone(),
                    feature: "global rules",
                }
            })?)
        } else {
            project
                .ok_or_else(|| {
                    Error::validation(format!(
                        "a project path is required to sync rules to {} (or use global)",
                        tool.id
                    ))
                })?
                .to_path_buf()
        };

        Ok(dir.join(filename))
    }

    /// Sync the rule `source_id` into one tool's rules file.
    ///
    /// Returns the path written.
    pub fn sync_tool_rules(
        &self,
        tool_id: &str,
        project: Option<&Path>,
        global: bool,
        strategy: SyncStrategy,
        backup: Option<&BackupOptions>,
        source_id: &str,
    ) -> Result<PathBuf> {
        let tool = self
            .registry
            .get(tool_id)
            .ok_or_else(|| Error::not_found("Tool", tool_id))?;
        let target = self.resolve_target(tool, project, global)?;

        if source_id.trim().is_empty() {
            return Err(Error::validation("a source rule id is required"));
        }
        let rule = self
            .rules
            .get_rule(source_id)?
            .ok_or_else(|| Error::not_found("Rule", source_id))?;

        tracing::debug!(tool = tool_id, target = %target.display(), %strategy, rule = %rule.name, "Syncing rules");

        let writer = TargetWriter {
            state: self.state,
            events: self.events,
        };
        writer.write(tool_id, &target, backup.unwrap_or(&self.backup), |current| {
            Ok(strategy.apply(current, &rule.content))
        })?;

        Ok(target)
    }

    /// Sync the rule `source_id` into every rules-capable tool.
    ///
    /// Each tool's rules config may disable it or override the project path
    /// and the global flag. One result per rules-capable tool, in registry
    /// order; failures are reported, never propagated.
    pub fn sync_all_tools_rules(
        &self,
        project: Option<&Path>,
        strategy: SyncStrategy,
        source_id: &str,
    ) -> Vec<RulesSyncResult> {
        let configs = match self.configs.rules_sync_config() {
            Ok(configs) => configs,
            Err(e) => {
                tracing::warn!(error = %e, "Could not load rules sync config; using defaults");
                Default::default()
            }
        };

        self.registry
            .rules_capable_tools()
            .into_iter()
            .map(|tool| {
                let config = configs.get(&tool.id).cloned().unwrap_or_default();
                if !config.enabled {
                    self.events.emit(SyncEvent::ToolSkipped {
                        tool: tool.id.clone(),
                        reason: SKIP_DISABLED.into(),
                    });
                    return RulesSyncResult {
                        tool_id: tool.id.clone(),
                        status: RulesSyncStatus::Skipped,
                        target_path: None,
                        message: Some(SKIP_DISABLED.into()),
                    };
                }

                let configured = config.target_path.as_deref().map(|raw| self.configured_path(raw));
                let tool_project = configured.as_deref().or(project);
                match self.sync_tool_rules(
                    &tool.id,
                    tool_project,
                    config.global,
                    strategy,
                    None,
                    source_id,
                ) {
                    Ok(path) => RulesSyncResult {
                        tool_id: tool.id.clone(),
                        status: RulesSyncStatus::Success,
                        target_path: Some(path),
                        message: None,
                    },
                    Err(e) => {
                        let status = if e.is_not_supported() {
                            RulesSyncStatus::NotSupported
                        } else {
                            RulesSyncStatus::Error
                        };
                        self.events.emit(SyncEvent::ToolFailed {
                            tool: tool.id.clone(),
                            message: e.to_string(),
                        });
                        RulesSyncResult {
                            tool_id: tool.id.clone(),
                            status,
                            target_path: None,
                            message: Some(e.to_string()),
                        }
                    }
                }
            })
            .collect()
    }
}
