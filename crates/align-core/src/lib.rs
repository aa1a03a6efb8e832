//! Core orchestration layer for align-agents
//!
//! This crate ties the lower crates together:
//!
//! - **Backup Manager**: timestamped sidecar backups with retention
//! - **State Store**: last synced checksum per target file, for drift detection
//! - **Sync orchestrators**: [`RuleSyncer`] and [`McpSyncer`], single-tool and batch
//! - **Events**: the [`EventSink`] seam the orchestrators report through
//! - **App context**: paths, config and the long-lived services, built once
//!
//! # Architecture
//!
//! ```text
//!                      align-cli
//!                          |
//!                     align-core
//!                          |
//!     +----------+---------+---------+-----------+
//!     |          |         |         |           |
//! align-fs align-blocks align-meta align-tools align-store
//! ```

pub mod backup;
pub mod config;
pub mod context;
pub mod error;
pub mod events;
pub mod state;
pub mod sync;

pub use backup::{
    BACKUP_DIR, BackupInfo, BackupOptions, create_backup_at, create_timestamped_backup,
    list_backups, restore_latest_backup,
};
pub use config::{AppConfig, AppPaths, SyncSettings};
pub use context::AppContext;
pub use error::{Error, Result};
pub use events::{BroadcastSink, EventSink, NullSink, SyncEvent, TracingSink};
pub use state::{SyncState, SyncStateStore};
pub use sync::{
    McpSyncResult, McpSyncStatus, McpSyncer, RuleSyncer, RulesSyncResult, RulesSyncStatus,
    SKIP_DISABLED, SKIP_NOT_INSTALLED,
};
