//! Tauri IPC command handlers.
//!
//! These `#[tauri::command]` functions are invoked by the frontend via `invoke()`.
//! They bridge frontend requests to the runtime thread.

use tauri::{AppHandle, State};

use helios_core::commands::OperatorCommand;
use helios_core::state::DashboardSnapshot;

use crate::runtime;
use crate::state::AppState;

/// Start the dashboard. Spawns the runtime thread if not already running.
///
/// Frontend: `invoke("start_dashboard")`
#[tauri::command]
pub fn start_dashboard(app_handle: AppHandle, state: State<'_, AppState>) -> Result<(), String> {
    let mut rt = state.runtime.lock().map_err(|e| e.to_string())?;
    if rt.is_some() {
        return Err("Dashboard already running".into());
    }

    let handle = runtime::spawn_runtime(
        state.config.clone(),
        app_handle,
        state.latest_snapshot.clone(),
    )
    .map_err(|e| format!("Failed to start runtime: {e}"))?;
    *rt = Some(handle);
    Ok(())
}

/// Send an operator command to the engine.
///
/// Frontend: `invoke("send_command", { command })`
#[tauri::command]
pub fn send_command(command: OperatorCommand, state: State<'_, AppState>) -> Result<(), String> {
    state.send(command)
}

/// Latest snapshot, for polling and initial state.
///
/// Frontend: `invoke("get_snapshot")`
#[tauri::command]
pub fn get_snapshot(state: State<'_, AppState>) -> Result<Option<DashboardSnapshot>, String> {
    state.snapshot()
}
