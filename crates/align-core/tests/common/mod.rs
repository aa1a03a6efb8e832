//! Shared fixtures for align-core integration tests

#![allow(dead_code)]

use align_core::{EventSink, SyncEvent, SyncStateStore};
use align_meta::{
    McpDefinition, McpSet, McpStore, McpSyncConfig, Rule, RuleStore, RulesSyncConfig,
    SyncConfigStore, ToolFormat, ToolMetadata,
};
use align_tools::ToolRegistry;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tempfile::TempDir;

/// In-memory implementation of the store traits.
#[derive(Default)]
pub struct FakeStore {
    pub rules: Vec<Rule>,
    pub definitions: Vec<McpDefinition>,
    pub sets: Vec<McpSet>,
    pub mcp_config: McpSyncConfig,
    pub rules_config: RulesSyncConfig,
}

impl RuleStore for FakeStore {
    fn get_rule(&self, id: &str) -> align_meta::Result<Option<Rule>> {
        Ok(self.rules.iter().find(|r| r.id == id).cloned())
    }
}

impl McpStore for FakeStore {
    fn get_mcp_set(&self, id: &str) -> align_meta::Result<Option<McpSet>> {
        Ok(self.sets.iter().find(|s| s.id == id).cloned())
    }

    fn get_mcp_definitions(&self) -> align_meta::Result<Vec<McpDefinition>> {
        Ok(self.definitions.clone())
    }
}

impl SyncConfigStore for FakeStore {
    fn mcp_sync_config(&self) -> align_meta::Result<McpSyncConfig> {
        Ok(self.mcp_config.clone())
    }

    fn rules_sync_config(&self) -> align_meta::Result<RulesSyncConfig> {
        Ok(self.rules_config.clone())
    }
}

/// Collects every emitted event.
#[derive(Default)]
pub struct RecordingSink {
    events: Mutex<Vec<SyncEvent>>,
}

impl RecordingSink {
    pub fn events(&self) -> Vec<SyncEvent> {
        self.events.lock().unwrap().clone()
    }

    pub fn drift_count(&self) -> usize {
        self.events()
            .iter()
            .filter(|e| matches!(e, SyncEvent::DriftDetected { .. }))
            .count()
    }
}

impl EventSink for RecordingSink {
    fn emit(&self, event: SyncEvent) {
        self.events.lock().unwrap().push(event);
    }
}

/// Temp directory with a state store inside it.
pub struct Workspace {
    pub dir: TempDir,
    pub state: SyncStateStore,
}

impl Workspace {
    pub fn new() -> Self {
        let dir = TempDir::new().unwrap();
        let state = SyncStateStore::new(dir.path().join("data/sync-state.json"));
        Self { dir, state }
    }

    pub fn path(&self, rel: &str) -> PathBuf {
        self.dir.path().join(rel)
    }

    pub fn write(&self, rel: &str, content: &str) -> PathBuf {
        let path = self.path(rel);
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(&path, content).unwrap();
        path
    }

    pub fn read(&self, path: &Path) -> String {
        std::fs::read_to_string(path).unwrap()
    }
}

pub fn rules_tool(id: &str, filename: &str, global_dir: Option<&Path>) -> ToolMetadata {
    let mut tool = ToolMetadata::new(id, id);
    tool.rules_filename = Some(filename.to_string());
    tool.global_rules_dir = global_dir.map(|d| d.to_string_lossy().into_owned());
    tool
}

pub fn mcp_tool(id: &str, config: &Path, format: ToolFormat) -> ToolMetadata {
    let mut tool = ToolMetadata::new(id, id);
    tool.supports_mcp = true;
    tool.format = format;
    tool.config_paths = vec![config.to_string_lossy().into_owned()];
    tool
}

pub fn registry(tools: impl IntoIterator<Item = ToolMetadata>) -> ToolRegistry {
    tools.into_iter().collect()
}
