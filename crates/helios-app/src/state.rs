//! Application state shared across IPC handlers and the runtime thread.

use std::sync::{Arc, Mutex};

use helios_core::commands::OperatorCommand;
use helios_core::state::DashboardSnapshot;

use crate::runtime::{RuntimeConfig, RuntimeHandle};

/// Commands sent from the IPC layer to the runtime thread.
#[derive(Debug)]
pub enum RuntimeCommand {
    /// An operator command to forward to the engine.
    Operator(OperatorCommand),
    /// Shut down the runtime thread gracefully.
    Shutdown,
}

/// Shared application state, stored as Tauri managed state.
///
/// Managed state must be Send + Sync, hence the mutexes around the
/// runtime handle (its `mpsc::Sender` is not Sync) and the snapshot.
pub struct AppState {
    pub config: RuntimeConfig,
    /// `None` until the dashboard is started.
    pub runtime: Mutex<Option<RuntimeHandle>>,
    /// Latest snapshot for synchronous `get_snapshot` queries.
    pub latest_snapshot: Arc<Mutex<Option<DashboardSnapshot>>>,
}

impl Default for AppState {
    fn default() -> Self {
        Self::with_config(RuntimeConfig::default())
    }
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: RuntimeConfig) -> Self {
        Self {
            config,
            runtime: Mutex::new(None),
            latest_snapshot: Arc::new(Mutex::new(None)),
        }
    }

    pub fn is_running(&self) -> bool {
        self.runtime
            .lock()
            .map(|rt| rt.is_some())
            .unwrap_or(false)
    }

    /// Forward an operator command to the runtime.
    pub fn send(&self, command: OperatorCommand) -> Result<(), String> {
        let lock = self.runtime.lock().map_err(|e| e.to_string())?;
        match lock.as_ref() {
            Some(rt) => rt
                .send(RuntimeCommand::Operator(command))
                .map_err(|e| format!("Failed to send command: {e}")),
            None => Err("Dashboard not started".into()),
        }
    }

    pub fn snapshot(&self) -> Result<Option<DashboardSnapshot>, String> {
        let lock = self.latest_snapshot.lock().map_err(|e| e.to_string())?;
        Ok(lock.clone())
    }

    /// Stop the runtime thread if one is running.
    pub fn stop(&self) {
        let handle = self.runtime.lock().ok().and_then(|mut rt| rt.take());
        if let Some(handle) = handle {
            handle.shutdown();
        }
    }
}
