//! Application paths and settings
//!
//! Everything lives under one data directory: `$ALIGN_AGENTS_HOME` when set,
//! otherwise `<platform data dir>/align-agents`.
//!
//! # Example `config.toml`
//!
//! ```toml
//! [sync]
//! default_strategy = "smart-update"
//! max_backups = 5
//! skip_backup = false
//! ```

use crate::backup::BackupOptions;
use crate::{Error, Result};
use align_blocks::SyncStrategy;
use align_fs::{ConfigStore, NormalizedPath};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Environment variable overriding the data directory.
pub const HOME_ENV: &str = "ALIGN_AGENTS_HOME";

const APP_DIR: &str = "align-agents";

/// Locations of the files align-agents owns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppPaths {
    root: PathBuf,
}

impl AppPaths {
    /// Use an explicit data directory.
    pub fn at(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Resolve the data directory from the environment.
    pub fn resolve() -> Result<Self> {
        if let Some(root) = std::env::var_os(HOME_ENV).filter(|v| !v.is_empty()) {
            return Ok(Self::at(root));
        }
        dirs::data_dir()
            .map(|dir| Self::at(dir.join(APP_DIR)))
            .ok_or_else(|| Error::validation(format!("cannot determine a data directory; set {HOME_ENV}")))
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// SQLite store.
    pub fn database(&self) -> PathBuf {
        self.root.join("align.db")
    }

    pub fn sync_state(&self) -> PathBuf {
        self.root.join("sync-state.json")
    }

    pub fn config_file(&self) -> PathBuf {
        self.root.join("config.toml")
    }

    /// User tool definitions merged over the built-ins.
    pub fn tools_file(&self) -> PathBuf {
        self.root.join("tools.json")
    }
}

/// The user's home directory, used to expand `~` in tool paths.
pub fn home_dir() -> Result<PathBuf> {
    dirs::home_dir().ok_or_else(|| Error::validation("cannot determine the home directory"))
}

/// `[sync]` table of `config.toml`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SyncSettings {
    pub default_strategy: SyncStrategy,
    pub max_backups: usize,
    pub skip_backup: bool,
}

impl Default for SyncSettings {
    fn default() -> Self {
        let backup = BackupOptions::default();
        Self {
            default_strategy: SyncStrategy::SmartUpdate,
            max_backups: backup.max_backups,
            skip_backup: backup.skip_backup,
        }
    }
}

impl SyncSettings {
    pub fn backup_options(&self) -> BackupOptions {
        BackupOptions {
            max_backups: self.max_backups,
            skip_backup: self.skip_backup,
        }
    }
}

/// Contents of `config.toml`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub sync: SyncSettings,
}

impl AppConfig {
    /// Load `config.toml`, or defaults when it does not exist.
    pub fn load(paths: &AppPaths) -> Result<Self> {
        Ok(ConfigStore::new().load_or_default(&NormalizedPath::new(paths.config_file()))?)
    }

    pub fn save(&self, paths: &AppPaths) -> Result<()> {
        Ok(ConfigStore::new().save(&NormalizedPath::new(paths.config_file()), self)?)
    }
}
