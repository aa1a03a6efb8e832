//! Backup creation, listing, pruning and restore

use crate::Result;
use align_fs::{Error as FsError, NormalizedPath, io};
use chrono::{DateTime, Local, NaiveDateTime, Utc};
use std::cmp::Reverse;
use std::fs;
use std::path::{Path, PathBuf};

/// Sibling directory that holds backups.
pub const BACKUP_DIR: &str = ".backup";

/// Second-resolution, lexically sortable timestamp token.
pub const TIMESTAMP_FORMAT: &str = "%Y%m%d-%H%M%S";

const TIMESTAMP_LEN: usize = 15;

/// Backup behaviour for one sync.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BackupOptions {
    /// Backups kept per original file; values below 1 are treated as 1.
    pub max_backups: usize,
    pub skip_backup: bool,
}

impl Default for BackupOptions {
    fn default() -> Self {
        Self {
            max_backups: 5,
            skip_backup: false,
        }
    }
}

/// One backup file on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackupInfo {
    pub path: PathBuf,
    /// Parsed from the file name.
    pub timestamp: NaiveDateTime,
    /// Filesystem modification time.
    pub modified: DateTime<Utc>,
    pub size: u64,
}

fn backup_dir(original: &Path) -> PathBuf {
    original
        .parent()
        .map(|parent| parent.join(BACKUP_DIR))
        .unwrap_or_else(|| PathBuf::from(BACKUP_DIR))
}

fn basename(original: &Path) -> Option<String> {
    original
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
}

/// Back up `path` using the current local time.
///
/// Returns the backup path, or `None` when skipped or when `path` does not
/// exist. Any filesystem failure is returned to the caller.
pub fn create_timestamped_backup(path: &Path, options: &BackupOptions) -> Result<Option<PathBuf>> {
    create_backup_at(path, options, Local::now().naive_local())
}

/// Back up `path` under the timestamp `at`, then prune old backups.
pub fn create_backup_at(
    path: &Path,
    options: &BackupOptions,
    at: NaiveDateTime,
) -> Result<Option<PathBuf>> {
    if options.skip_backup || !path.is_file() {
        return Ok(None);
    }
    let Some(name) = basename(path) else {
        return Ok(None);
    };

    let dir = backup_dir(path);
    fs::create_dir_all(&dir).map_err(|e| FsError::io(&dir, e))?;

    let backup_path = dir.join(format!("{name}.{}", at.format(TIMESTAMP_FORMAT)));
    fs::copy(path, &backup_path).map_err(|e| FsError::io(&backup_path, e))?;
    tracing::debug!(original = %path.display(), backup = %backup_path.display(), "Created backup");

    prune(path, options.max_backups.max(1))?;
    Ok(Some(backup_path))
}

fn prune(path: &Path, keep: usize) -> Result<()> {
    for stale in list_backups(path)?.into_iter().skip(keep) {
        fs::remove_file(&stale.path).map_err(|e| FsError::io(&stale.path, e))?;
        tracing::debug!(backup = %stale.path.display(), "Pruned backup");
    }
    Ok(())
}

/// All backups of `path`, newest first.
///
/// Ordered by modification time, then by the timestamp in the name.
pub fn list_backups(path: &Path) -> Result<Vec<BackupInfo>> {
    let Some(name) = basename(path) else {
        return Ok(Vec::new());
    };
    let dir = backup_dir(path);
    if !dir.is_dir() {
        return Ok(Vec::new());
    }

    let prefix = format!("{name}.");
    let mut backups = Vec::new();
    for entry in fs::read_dir(&dir).map_err(|e| FsError::io(&dir, e))? {
        let entry = entry.map_err(|e| FsError::io(&dir, e))?;
        let file_name = entry.file_name().to_string_lossy().into_owned();

        let Some(token) = file_name.strip_prefix(&prefix) else {
            continue;
        };
        if token.len() != TIMESTAMP_LEN {
            continue;
        }
        let Ok(timestamp) = NaiveDateTime::parse_from_str(token, TIMESTAMP_FORMAT) else {
            continue;
        };

        let entry_path = entry.path();
        let metadata = entry.metadata().map_err(|e| FsError::io(&entry_path, e))?;
        if !metadata.is_file() {
            continue;
        }
        let modified = metadata
            .modified()
            .map_err(|e| FsError::io(&entry_path, e))?;

        backups.push(BackupInfo {
            path: entry_path,
            timestamp,
            modified: DateTime::<Utc>::from(modified),
            size: metadata.len(),
        });
    }

    backups.sort_by_key(|b| Reverse((b.modified, b.timestamp)));
    Ok(backups)
}

/// Copy the newest backup over `path`. Returns `false` when there is none.
pub fn restore_latest_backup(path: &Path) -> Result<bool> {
    let Some(latest) = list_backups(path)?.into_iter().next() else {
        return Ok(false);
    };

    let bytes = fs::read(&latest.path).map_err(|e| FsError::io(&latest.path, e))?;
    io::write_atomic(&NormalizedPath::new(path), &bytes)?;
    tracing::info!(original = %path.display(), backup = %latest.path.display(), "Restored backup");
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use tempfile::TempDir;

    fn at(second: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 3, 14)
            .unwrap()
            .and_hms_opt(9, 26, second)
            .unwrap()
    }

    #[test]
    fn skip_and_missing_produce_nothing() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("CLAUDE.md");

        assert_eq!(create_backup_at(&file, &BackupOptions::default(), at(0)).unwrap(), None);

        fs::write(&file, "x").unwrap();
        let skip = BackupOptions {
            skip_backup: true,
            ..Default::default()
        };
        assert_eq!(create_backup_at(&file, &skip, at(0)).unwrap(), None);
        assert!(!dir.path().join(BACKUP_DIR).exists());
    }

    #[test]
    fn backup_name_format() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("settings.json");
        fs::write(&file, "{}").unwrap();

        let backup = create_backup_at(&file, &BackupOptions::default(), at(5))
            .unwrap()
            .unwrap();
        assert_eq!(
            backup,
            dir.path().join(".backup").join("settings.json.20260314-092605")
        );
        assert_eq!(fs::read_to_string(backup).unwrap(), "{}");
    }

    #[test]
    fn unrelated_files_are_ignored() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("a.md");
        fs::write(&file, "x").unwrap();
        create_backup_at(&file, &BackupOptions::default(), at(1)).unwrap();

        let backups = dir.path().join(BACKUP_DIR);
        fs::write(backups.join("a.md.notes"), "").unwrap();
        fs::write(backups.join("a.md.20260314-0926"), "").unwrap();
        fs::write(backups.join("ab.md.20260314-092601"), "").unwrap();

        assert_eq!(list_backups(&file).unwrap().len(), 1);
    }
}
