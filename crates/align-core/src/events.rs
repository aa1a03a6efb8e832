//! Sync event channel
//!
//! Orchestrators report what they did through [`EventSink`]. The CLI logs
//! events with [`TracingSink`]; a long-running front-end can subscribe to a
//! [`BroadcastSink`] and forward events to its clients.

use serde::Serialize;
use std::path::PathBuf;
use tokio::sync::broadcast;

/// Something observable that happened during a sync.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "event", rename_all = "kebab-case")]
pub enum SyncEvent {
    /// The target changed since it was last synced.
    DriftDetected {
        path: PathBuf,
        recorded: String,
        current: String,
    },
    BackupCreated {
        original: PathBuf,
        backup: PathBuf,
    },
    TargetWritten {
        tool: String,
        path: PathBuf,
    },
    ToolSkipped {
        tool: String,
        reason: String,
    },
    ToolFailed {
        tool: String,
        message: String,
    },
}

/// Receiver of sync events.
pub trait EventSink: Send + Sync {
    fn emit(&self, event: SyncEvent);
}

/// Writes each event to the tracing subscriber.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl EventSink for TracingSink {
    fn emit(&self, event: SyncEvent) {
        match event {
            SyncEvent::DriftDetected {
                path,
                recorded,
                current,
            } => tracing::warn!(
                path = %path.display(),
                %recorded,
                %current,
                "Target changed outside of sync"
            ),
            SyncEvent::BackupCreated { original, backup } => {
                tracing::debug!(original = %original.display(), backup = %backup.display(), "Backup created")
            }
            SyncEvent::TargetWritten { tool, path } => {
                tracing::info!(%tool, path = %path.display(), "Synced")
            }
            SyncEvent::ToolSkipped { tool, reason } => tracing::info!(%tool, %reason, "Skipped"),
            SyncEvent::ToolFailed { tool, message } => tracing::warn!(%tool, %message, "Sync failed"),
        }
    }
}

/// Fans events out to any number of subscribers over a bounded channel.
///
/// Slow subscribers lose the oldest events (`RecvError::Lagged`). Emitting
/// with no subscribers is a no-op.
#[derive(Debug, Clone)]
pub struct BroadcastSink {
    sender: broadcast::Sender<SyncEvent>,
}

impl BroadcastSink {
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity.max(1));
        Self { sender }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<SyncEvent> {
        self.sender.subscribe()
    }
}

impl EventSink for BroadcastSink {
    fn emit(&self, event: SyncEvent) {
        let _ = self.sender.send(event);
    }
}

/// Discards every event.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

impl EventSink for NullSink {
    fn emit(&self, _event: SyncEvent) {}
}
