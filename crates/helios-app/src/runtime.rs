//! Runtime thread: owns the dashboard engine and maps engine time onto the wall clock.
//!
//! The engine is created inside the thread so it never crosses a thread
//! boundary. Commands arrive via `mpsc`. Between events the thread blocks
//! until the next armed timer is due, or indefinitely when nothing is
//! armed. Snapshots go to a `SnapshotSink` and into shared state for
//! synchronous polling.

use std::path::PathBuf;
use std::sync::mpsc;
use std::sync::{Arc, Mutex};
use std::thread::JoinHandle;
use std::time::{Duration, Instant};

use helios_core::state::DashboardSnapshot;
use helios_sim::engine::{DashboardEngine, EngineConfig};
use helios_store::{FilePreferenceStore, MemoryPreferenceStore, PreferenceStore};

use crate::sink::SnapshotSink;
use crate::state::RuntimeCommand;

/// Settings for a runtime thread.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    /// Engine milliseconds per wall-clock millisecond.
    pub time_scale: f64,
    pub seed: u64,
    /// Directory holding `notificationPreferences.json`. `None` keeps preferences in memory.
    pub prefs_dir: Option<PathBuf>,
    pub background_feeds: bool,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            time_scale: 1.0,
            seed: 42,
            prefs_dir: None,
            background_feeds: true,
        }
    }
}

impl RuntimeConfig {
    fn effective_scale(&self) -> f64 {
        if self.time_scale > 0.001 {
            self.time_scale
        } else {
            1.0
        }
    }

    fn store(&self) -> Box<dyn PreferenceStore> {
        match &self.prefs_dir {
            Some(dir) => Box::new(FilePreferenceStore::new(dir)),
            None => Box::new(MemoryPreferenceStore::new()),
        }
    }
}

/// Handle to a running runtime thread.
#[derive(Debug)]
pub struct RuntimeHandle {
    tx: mpsc::Sender<RuntimeCommand>,
    join: Option<JoinHandle<()>>,
}

impl RuntimeHandle {
    pub fn sender(&self) -> mpsc::Sender<RuntimeCommand> {
        self.tx.clone()
    }

    pub fn send(&self, command: RuntimeCommand) -> Result<(), mpsc::SendError<RuntimeCommand>> {
        self.tx.send(command)
    }

    /// Ask the thread to stop and wait for it.
    pub fn shutdown(mut self) {
        let _ = self.tx.send(RuntimeCommand::Shutdown);
        if let Some(join) = self.join.take() {
            if join.join().is_err() {
                tracing::error!("runtime thread panicked");
            }
        }
    }
}

/// Spawns the runtime in a new thread.
pub fn spawn_runtime<S: SnapshotSink + 'static>(
    config: RuntimeConfig,
    sink: S,
    latest_snapshot: Arc<Mutex<Option<DashboardSnapshot>>>,
) -> std::io::Result<RuntimeHandle> {
    let (tx, rx) = mpsc::channel::<RuntimeCommand>();

    let join = std::thread::Builder::new()
        .name("helios-runtime".into())
        .spawn(move || {
            run_runtime(config, sink, rx, &latest_snapshot);
        })?;

    Ok(RuntimeHandle {
        tx,
        join: Some(join),
    })
}

/// Wall-clock wait for `engine_ms` of engine time.
fn wall_duration(engine_ms: u64, scale: f64) -> Duration {
    Duration::from_secs_f64(engine_ms as f64 / 1000.0 / scale)
}

/// The runtime loop. Runs until Shutdown or channel disconnect.
fn run_runtime<S: SnapshotSink>(
    config: RuntimeConfig,
    sink: S,
    cmd_rx: mpsc::Receiver<RuntimeCommand>,
    latest_snapshot: &Mutex<Option<DashboardSnapshot>>,
) {
    let scale = config.effective_scale();
    let mut engine = DashboardEngine::new(
        EngineConfig {
            seed: config.seed,
            background_feeds: config.background_feeds,
        },
        config.store(),
    );
    let origin = Instant::now();
    tracing::info!(time_scale = scale, seed = config.seed, "runtime started");

    publish(&sink, latest_snapshot, engine.advance(0));

    loop {
        // 1. Block until a command arrives or the next timer is due.
        let received = match engine.next_due_in() {
            Some(ms) => match cmd_rx.recv_timeout(wall_duration(ms, scale)) {
                Ok(cmd) => Some(cmd),
                Err(mpsc::RecvTimeoutError::Timeout) => None,
                Err(mpsc::RecvTimeoutError::Disconnected) => break,
            },
            None => match cmd_rx.recv() {
                Ok(cmd) => Some(cmd),
                Err(_) => break,
            },
        };
        let woke_for_timer = received.is_none();

        // 2. Queue it along with anything else already waiting.
        let mut shutdown = false;
        for cmd in received.into_iter().chain(std::iter::from_fn(|| cmd_rx.try_recv().ok())) {
            match cmd {
                RuntimeCommand::Operator(cmd) => engine.queue_command(cmd),
                RuntimeCommand::Shutdown => shutdown = true,
            }
        }
        if shutdown {
            break;
        }

        // 3. Catch engine time up with the wall clock.
        let target_ms = (origin.elapsed().as_secs_f64() * 1000.0 * scale) as u64;
        let mut dt = target_ms.saturating_sub(engine.time().now_ms);
        if woke_for_timer {
            // A timeout can return a hair early; make sure the due timer fires.
            dt = dt.max(engine.next_due_in().unwrap_or(0));
        }

        publish(&sink, latest_snapshot, engine.advance(dt));
    }

    tracing::info!(at_ms = engine.time().now_ms, "runtime stopped");
}

fn publish<S: SnapshotSink>(
    sink: &S,
    latest_snapshot: &Mutex<Option<DashboardSnapshot>>,
    snapshot: DashboardSnapshot,
) {
    // Store first so a reader woken by the sink never sees an older snapshot.
    if let Ok(mut lock) = latest_snapshot.lock() {
        *lock = Some(snapshot.clone());
    }
    sink.publish(&snapshot);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sink::ChannelSink;
    use helios_core::commands::OperatorCommand;
    use helios_core::enums::{IncidentScenarioId, PlayerPhase};

    fn fast_config() -> RuntimeConfig {
        RuntimeConfig {
            time_scale: 200.0,
            background_feeds: false,
            ..Default::default()
        }
    }

    /// Receive snapshots until one matches, or give up after `timeout`.
    fn wait_for(
        rx: &mpsc::Receiver<DashboardSnapshot>,
        timeout: Duration,
        pred: impl Fn(&DashboardSnapshot) -> bool,
    ) -> Option<DashboardSnapshot> {
        let deadline = Instant::now() + timeout;
        while let Some(left) = deadline.checked_duration_since(Instant::now()) {
            match rx.recv_timeout(left) {
                Ok(snap) if pred(&snap) => return Some(snap),
                Ok(_) => continue,
                Err(_) => return None,
            }
        }
        None
    }

    #[test]
    fn test_command_channel_round_trip() {
        let (tx, rx) = mpsc::channel::<RuntimeCommand>();

        tx.send(RuntimeCommand::Operator(OperatorCommand::VerifyRole))
            .unwrap();
        tx.send(RuntimeCommand::Operator(OperatorCommand::TogglePause))
            .unwrap();
        tx.send(RuntimeCommand::Shutdown).unwrap();

        let commands: Vec<_> = std::iter::from_fn(|| rx.try_recv().ok()).collect();
        assert_eq!(commands.len(), 3);
        assert!(matches!(
            commands[0],
            RuntimeCommand::Operator(OperatorCommand::VerifyRole)
        ));
        assert!(matches!(commands[2], RuntimeCommand::Shutdown));
    }

    #[test]
    fn test_runtime_plays_scenario_to_completion() {
        let (sink, rx) = ChannelSink::new();
        let latest = Arc::new(Mutex::new(None));
        let handle = spawn_runtime(fast_config(), sink, latest.clone()).unwrap();

        handle
            .send(RuntimeCommand::Operator(
                OperatorCommand::AuthenticateIrcLeader { name: None },
            ))
            .unwrap();
        handle
            .send(RuntimeCommand::Operator(OperatorCommand::RunSimulation {
                scenario: IncidentScenarioId::FullFailover,
            }))
            .unwrap();

        // 6.1s of engine time at 200x is about 30ms of wall time.
        let done = wait_for(&rx, Duration::from_secs(5), |s| {
            s.player.phase == PlayerPhase::Completed
        });
        assert!(done.is_some(), "scenario did not complete");

        // The shared snapshot is already at least as new as anything the sink delivered.
        let done = done.unwrap();
        let stored = latest.lock().unwrap().clone().unwrap();
        assert_eq!(stored.player.phase, PlayerPhase::Completed);
        assert!(stored.time.now_ms >= done.time.now_ms);

        handle.shutdown();
    }

    #[test]
    fn test_idle_runtime_blocks_without_emitting() {
        let (sink, rx) = ChannelSink::new();
        let handle =
            spawn_runtime(fast_config(), sink, Arc::new(Mutex::new(None))).unwrap();

        // Initial snapshot only; nothing is armed so the thread sleeps.
        assert!(rx.recv_timeout(Duration::from_secs(2)).is_ok());
        assert!(rx.recv_timeout(Duration::from_millis(200)).is_err());

        // A command wakes it immediately.
        handle
            .send(RuntimeCommand::Operator(OperatorCommand::VerifyRole))
            .unwrap();
        let snap = rx.recv_timeout(Duration::from_secs(2)).unwrap();
        assert!(snap.role.verified);

        handle.shutdown();
    }

    #[test]
    fn test_dropping_sender_stops_thread() {
        let (sink, _rx) = ChannelSink::new();
        let mut handle =
            spawn_runtime(fast_config(), sink, Arc::new(Mutex::new(None))).unwrap();
        let join = handle.join.take().unwrap();
        drop(handle);
        assert!(join.join().is_ok());
    }

    #[test]
    fn test_wall_duration_scales() {
        assert_eq!(wall_duration(1_000, 1.0), Duration::from_secs(1));
        assert_eq!(wall_duration(1_000, 2.0), Duration::from_millis(500));
    }
}
