//! Application context
//!
//! Built once at process start and passed by reference. It owns the
//! long-lived services (tool registry, store, state store, event sink) and
//! hands out orchestrators borrowing from it.

use crate::config::{AppConfig, AppPaths, home_dir};
use crate::events::EventSink;
use crate::state::SyncStateStore;
use crate::sync::{McpSyncer, RuleSyncer};
use crate::Result;
use align_store::SqliteStore;
use align_tools::ToolRegistry;
use std::path::{Path, PathBuf};
use std::sync::Arc;

pub struct AppContext {
    pub paths: AppPaths,
    pub config: AppConfig,
    pub registry: ToolRegistry,
    pub store: SqliteStore,
    pub state: SyncStateStore,
    pub events: Arc<dyn EventSink>,
    home: PathBuf,
}

impl AppContext {
    /// Load config, tools and store from `paths`, expanding tool paths
    /// against the current user's home directory.
    pub fn init(paths: AppPaths, events: Arc<dyn EventSink>) -> Result<Self> {
        let home = home_dir()?;
        Self::init_with_home(paths, &home, events)
    }

    /// As [`Self::init`], with an explicit home directory.
    pub fn init_with_home(paths: AppPaths, home: &Path, events: Arc<dyn EventSink>) -> Result<Self> {
        let config = AppConfig::load(&paths)?;
        let registry = ToolRegistry::load(Some(&paths.tools_file()), home)?;
        let store = SqliteStore::open(&paths.database())?;
        let state = SyncStateStore::new(paths.sync_state());
        tracing::debug!(root = %paths.root().display(), tools = registry.len(), "Initialized context");

        Ok(Self {
            paths,
            config,
            registry,
            store,
            state,
            events,
            home: home.to_path_buf(),
        })
    }

    pub fn home(&self) -> &Path {
        &self.home
    }

    /// Rules orchestrator using the configured backup options and home.
    pub fn rule_syncer(&self) -> RuleSyncer<'_> {
        RuleSyncer::new(
            &self.registry,
            &self.store,
            &self.store,
            &self.state,
            self.events.as_ref(),
        )
        .with_backup_options(self.config.sync.backup_options())
        .with_home(&self.home)
    }

    /// MCP orchestrator using the configured strategy and backup options.
    pub fn mcp_syncer(&self) -> McpSyncer<'_> {
        McpSyncer::new(
            &self.registry,
            &self.store,
            &self.store,
            &self.state,
            self.events.as_ref(),
        )
        .with_strategy(self.config.sync.default_strategy)
        .with_backup_options(self.config.sync.backup_options())
    }
}
