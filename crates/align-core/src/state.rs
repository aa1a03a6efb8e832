//! Sync state: the last checksum written to each target file
//!
//! Persisted as one JSON object keyed by normalized absolute target path.
//! Every access takes an advisory lock on a sidecar `<file>.lock`, shared
//! for reads and exclusive for the read-modify-write of [`SyncStateStore::record`].

use crate::Result;
use align_fs::{Error as FsError, NormalizedPath, io};
use chrono::{DateTime, Utc};
use fs2::FileExt;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs::{File, OpenOptions};
use std::path::{Path, PathBuf};

/// Last successful sync of one target.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SyncState {
    pub last_sync_hash: String,
    pub last_sync_time: DateTime<Utc>,
}

type StateMap = BTreeMap<String, SyncState>;

/// File-backed map of target path to [`SyncState`].
#[derive(Debug, Clone)]
pub struct SyncStateStore {
    path: PathBuf,
}

impl SyncStateStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn key(target: &Path) -> String {
        let absolute = std::path::absolute(target).unwrap_or_else(|_| target.to_path_buf());
        NormalizedPath::new(absolute).as_str().to_string()
    }

    fn lock_file(&self) -> Result<File> {
        let mut lock_path = self.path.clone().into_os_string();
        lock_path.push(".lock");
        let lock_path = PathBuf::from(lock_path);

        if let Some(parent) = lock_path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent).map_err(|e| FsError::io(parent, e))?;
        }
        OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(false)
            .open(&lock_path)
            .map_err(|e| FsError::io(&lock_path, e).into())
    }

    fn read_map(&self) -> Result<StateMap> {
        let content = io::read_text_or_empty(&NormalizedPath::new(&self.path))?;
        if content.trim().is_empty() {
            return Ok(StateMap::new());
        }
        Ok(serde_json::from_str(&content)?)
    }

    /// Recorded state for `target`, if it was ever synced.
    pub fn get(&self, target: &Path) -> Result<Option<SyncState>> {
        let lock = self.lock_file()?;
        lock.lock_shared().map_err(|_| FsError::LockFailed {
            path: self.path.clone(),
        })?;
        let mut map = self.read_map()?;
        Ok(map.remove(&Self::key(target)))
    }

    /// Every recorded target.
    pub fn all(&self) -> Result<StateMap> {
        let lock = self.lock_file()?;
        lock.lock_shared().map_err(|_| FsError::LockFailed {
            path: self.path.clone(),
        })?;
        self.read_map()
    }

    /// Record `hash` as the content just written to `target`.
    pub fn record(&self, target: &Path, hash: &str) -> Result<SyncState> {
        let lock = self.lock_file()?;
        lock.lock_exclusive().map_err(|_| FsError::LockFailed {
            path: self.path.clone(),
        })?;

        let mut map = self.read_map()?;
        let state = SyncState {
            last_sync_hash: hash.to_string(),
            last_sync_time: Utc::now(),
        };
        map.insert(Self::key(target), state.clone());

        let content = serde_json::to_string_pretty(&map)?;
        io::write_atomic(&NormalizedPath::new(&self.path), content.as_bytes())?;
        // Lock released when `lock` is dropped
        Ok(state)
    }
}
