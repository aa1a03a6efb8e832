//! Timestamped backups of sync targets
//!
//! Before a sync overwrites a file, the current file is copied to
//! `<dir>/.backup/<basename>.<YYYYMMDD-HHMMSS>`. There is no index: backups
//! are found by scanning that directory for the basename prefix.

mod timestamped;

pub use timestamped::{
    BACKUP_DIR, BackupInfo, BackupOptions, TIMESTAMP_FORMAT, create_backup_at,
    create_timestamped_backup, list_backups, restore_latest_backup,
};
