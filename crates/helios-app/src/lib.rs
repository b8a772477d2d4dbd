//! HELIOS application runtime.
//!
//! Runs the dashboard engine on its own thread against the wall clock and
//! exposes it to a frontend. The Tauri shell is behind the `desktop` feature.

pub mod runtime;
pub mod sink;
pub mod state;

#[cfg(feature = "desktop")]
pub mod ipc;

pub use helios_core as core;
pub use runtime::{spawn_runtime, RuntimeConfig, RuntimeHandle};
pub use sink::{ChannelSink, NullSink, SnapshotSink};
pub use state::{AppState, RuntimeCommand};

/// Tauri builder with HELIOS state and IPC handlers registered.
#[cfg(feature = "desktop")]
pub fn desktop_builder(config: RuntimeConfig) -> tauri::Builder<tauri::Wry> {
    tauri::Builder::default()
        .manage(AppState::with_config(config))
        .invoke_handler(tauri::generate_handler![
            ipc::start_dashboard,
            ipc::send_command,
            ipc::get_snapshot,
        ])
}
