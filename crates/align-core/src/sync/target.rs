//! The write path shared by both orchestrators

use crate::Result;
use crate::backup::{BackupOptions, create_timestamped_backup};
use crate::events::{EventSink, SyncEvent};
use crate::state::SyncStateStore;
use align_fs::{NormalizedPath, compute_content_checksum, io};
use std::path::Path;

pub(crate) struct TargetWriter<'a> {
    pub state: &'a SyncStateStore,
    pub events: &'a dyn EventSink,
}

impl TargetWriter<'_> {
    /// Sync one target file.
    ///
    /// `render` receives the current content (empty when the file is
    /// missing) and returns the content to write. The backup is taken
    /// before `render` runs; a failed backup aborts before anything is
    /// written. Once the file is written, failing to record its checksum
    /// only logs a warning.
    pub fn write<F>(&self, tool_id: &str, path: &Path, backup: &BackupOptions, render: F) -> Result<()>
    where
        F: FnOnce(&str) -> Result<String>,
    {
        let target = NormalizedPath::new(path);
        let current = io::read_text_or_empty(&target)?;

        self.check_drift(path, &current);

        if let Some(backup_path) = create_timestamped_backup(path, backup)? {
            self.events.emit(SyncEvent::BackupCreated {
                original: path.to_path_buf(),
                backup: backup_path,
            });
        }

        let content = render(&current)?;
        io::write_text(&target, &content)?;
        if let Err(e) = self.state.record(path, &compute_content_checksum(&content)) {
            tracing::warn!(path = %path.display(), error = %e, "Target written but its checksum was not recorded");
        }

        self.events.emit(SyncEvent::TargetWritten {
            tool: tool_id.to_string(),
            path: path.to_path_buf(),
        });
        Ok(())
    }

    /// Compare the current content with the last recorded checksum.
    ///
    /// Only reports; a failed lookup is logged and ignored.
    fn check_drift(&self, path: &Path, current: &str) {
        let recorded = match self.state.get(path) {
            Ok(Some(state)) => state.last_sync_hash,
            Ok(None) => return,
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "Drift check failed");
                return;
            }
        };

        let current_hash = compute_content_checksum(current);
        if recorded != current_hash {
            self.events.emit(SyncEvent::DriftDetected {
                path: path.to_path_buf(),
                recorded,
                current: current_hash,
            });
        }
    }
}
