//! Where runtime snapshots go after each advance.

use std::sync::mpsc;

use helios_core::state::DashboardSnapshot;

/// Event name snapshots are emitted under on the desktop shell.
pub const SNAPSHOT_EVENT: &str = "dashboard:snapshot";

/// Receives every snapshot the runtime produces. Delivery failures are the sink's to swallow.
pub trait SnapshotSink: Send {
    fn publish(&self, snapshot: &DashboardSnapshot);
}

/// Forwards snapshots over a channel; used by the CLI and tests.
#[derive(Debug, Clone)]
pub struct ChannelSink {
    tx: mpsc::Sender<DashboardSnapshot>,
}

impl ChannelSink {
    pub fn new() -> (Self, mpsc::Receiver<DashboardSnapshot>) {
        let (tx, rx) = mpsc::channel();
        (Self { tx }, rx)
    }
}

impl SnapshotSink for ChannelSink {
    fn publish(&self, snapshot: &DashboardSnapshot) {
        // Receiver gone means nobody is watching any more.
        let _ = self.tx.send(snapshot.clone());
    }
}

/// Drops every snapshot. Only the shared latest snapshot is kept.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl SnapshotSink for NullSink {
    fn publish(&self, _snapshot: &DashboardSnapshot) {}
}

#[cfg(feature = "desktop")]
impl<R: tauri::Runtime> SnapshotSink for tauri::AppHandle<R> {
    fn publish(&self, snapshot: &DashboardSnapshot) {
        use tauri::Emitter;
        let _ = self.emit(SNAPSHOT_EVENT, snapshot);
    }
}
