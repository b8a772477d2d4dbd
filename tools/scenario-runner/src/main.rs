//! scenario-runner: drive the HELIOS war-room engine from the command line.
//!
//! Usage:
//!   scenario-runner --scenario SIM-001
//!   scenario-runner --scenario SIM-002 --strategies isolate,failover --execute --war-room
//!   scenario-runner --realtime --time-scale 4 --json

use std::path::PathBuf;
use std::sync::mpsc;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use anyhow::{bail, Context};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use helios_app::{spawn_runtime, ChannelSink, RuntimeCommand, RuntimeConfig, RuntimeHandle};
use helios_core::commands::OperatorCommand;
use helios_core::enums::{IncidentScenarioId, PlayerPhase, StrategyId};
use helios_core::state::DashboardSnapshot;
use helios_sim::{DashboardEngine, EngineConfig};
use helios_store::{FilePreferenceStore, MemoryPreferenceStore, PreferenceStore};

/// Give up on a phase after this much engine time.
const PHASE_LIMIT_MS: u64 = 10 * 60 * 1000;

#[derive(Parser, Debug)]
#[command(name = "scenario-runner")]
#[command(about = "Run a HELIOS incident scenario headless and print what happens")]
struct Cli {
    /// Incident scenario code
    #[arg(long, default_value = "SIM-001", value_parser = parse_scenario)]
    scenario: IncidentScenarioId,

    /// Comma-separated strategies to simulate after the incident run
    /// (isolate, failover, rotate-credentials, monitoring, rate-limit)
    #[arg(long, value_delimiter = ',', value_parser = parse_strategy)]
    strategies: Vec<StrategyId>,

    /// Execute the simulated plan with the agent driver
    #[arg(long, requires = "strategies")]
    execute: bool,

    /// Open the war room alongside the incident run
    #[arg(long)]
    war_room: bool,

    /// RNG seed
    #[arg(long, env = "HELIOS_SEED", default_value_t = 42)]
    seed: u64,

    /// Directory holding notificationPreferences.json
    #[arg(long, env = "HELIOS_PREFS_DIR")]
    prefs_dir: Option<PathBuf>,

    /// Also run the notification poll and dashboard refresh
    #[arg(long)]
    feeds: bool,

    /// Run on the wall clock through the runtime thread
    #[arg(long)]
    realtime: bool,

    /// Engine speed-up in realtime mode
    #[arg(long, default_value_t = 1.0)]
    time_scale: f64,

    /// Print every snapshot as a JSON line instead of toasts
    #[arg(long)]
    json: bool,
}

fn parse_scenario(s: &str) -> Result<IncidentScenarioId, String> {
    IncidentScenarioId::parse(s).ok_or_else(|| {
        let known: Vec<_> = IncidentScenarioId::ALL.iter().map(|id| id.code()).collect();
        format!("unknown scenario {s:?}, expected one of {}", known.join(", "))
    })
}

fn parse_strategy(s: &str) -> Result<StrategyId, String> {
    StrategyId::parse(s).ok_or_else(|| {
        let known: Vec<_> = StrategyId::ALL.iter().map(|id| id.key()).collect();
        format!("unknown strategy {s:?}, expected one of {}", known.join(", "))
    })
}

/// Something commands can be sent to and snapshots awaited from.
trait Session {
    fn send(&mut self, command: OperatorCommand) -> anyhow::Result<()>;

    /// Run until `done` holds for a snapshot and return it.
    fn wait_until(
        &mut self,
        done: &dyn Fn(&DashboardSnapshot) -> bool,
    ) -> anyhow::Result<DashboardSnapshot>;
}

/// Steps the engine from timer to timer without sleeping.
struct Headless {
    engine: DashboardEngine,
    json: bool,
}

impl Session for Headless {
    fn send(&mut self, command: OperatorCommand) -> anyhow::Result<()> {
        self.engine.queue_command(command);
        Ok(())
    }

    fn wait_until(
        &mut self,
        done: &dyn Fn(&DashboardSnapshot) -> bool,
    ) -> anyhow::Result<DashboardSnapshot> {
        let start = self.engine.time().now_ms;
        let mut snap = self.engine.advance(0);
        report(&snap, self.json)?;
        while !done(&snap) {
            if self.engine.time().now_ms - start > PHASE_LIMIT_MS {
                bail!("phase did not finish within {PHASE_LIMIT_MS} ms of engine time");
            }
            snap = match self.engine.advance_to_next_timer() {
                Some(s) => s,
                None => bail!("engine went idle before the phase finished"),
            };
            report(&snap, self.json)?;
        }
        Ok(snap)
    }
}

/// Talks to a runtime thread running on the wall clock.
struct Live {
    handle: RuntimeHandle,
    rx: mpsc::Receiver<DashboardSnapshot>,
    json: bool,
    patience: Duration,
}

impl Session for Live {
    fn send(&mut self, command: OperatorCommand) -> anyhow::Result<()> {
        self.handle
            .send(RuntimeCommand::Operator(command))
            .context("runtime thread is gone")
    }

    fn wait_until(
        &mut self,
        done: &dyn Fn(&DashboardSnapshot) -> bool,
    ) -> anyhow::Result<DashboardSnapshot> {
        loop {
            let snap = self
                .rx
                .recv_timeout(self.patience)
                .context("no snapshot from runtime")?;
            report(&snap, self.json)?;
            if done(&snap) {
                return Ok(snap);
            }
        }
    }
}

fn report(snap: &DashboardSnapshot, json: bool) -> anyhow::Result<()> {
    if json {
        println!("{}", serde_json::to_string(snap)?);
        return Ok(());
    }
    for toast in &snap.toasts {
        println!("[{:>8} ms] {:<7} {}", toast.at_ms, format!("{:?}", toast.level), toast.message);
    }
    Ok(())
}

fn player_idle(s: &DashboardSnapshot) -> bool {
    !matches!(s.player.phase, PlayerPhase::Running | PlayerPhase::Paused)
}

fn run(cli: &Cli, session: &mut dyn Session) -> anyhow::Result<DashboardSnapshot> {
    session.send(OperatorCommand::AuthenticateIrcLeader { name: None })?;
    session.send(OperatorCommand::RunSimulation {
        scenario: cli.scenario,
    })?;
    if cli.war_room {
        session.send(OperatorCommand::InitiateWarRoom)?;
    }
    let mut snap = session.wait_until(&|s| s.player.phase == PlayerPhase::Completed)?;

    if !cli.strategies.is_empty() {
        for &strategy in &cli.strategies {
            session.send(OperatorCommand::SelectStrategy { strategy })?;
        }
        session.send(OperatorCommand::SimulateStrategies)?;
        snap = session.wait_until(&|s| player_idle(s) && s.simulation_result.is_some())?;
    }

    if cli.execute {
        session.send(OperatorCommand::ExecutePlan)?;
        snap = session.wait_until(&|s| s.execution.impact.is_some())?;
    }

    if cli.war_room {
        snap = session.wait_until(&|s| s.war_room.active)?;
    }
    Ok(snap)
}

fn summarize(snap: &DashboardSnapshot) {
    println!();
    println!("engine time     {:.1}s", snap.time.elapsed_secs());
    if let Some(name) = &snap.player.scenario_name {
        println!("last scenario   {name} ({:?})", snap.player.phase);
    }
    if let Some(r) = &snap.simulation_result {
        println!(
            "simulation      {:.2}% success, {} risk, {} to recover, {} recovery rate",
            r.success_probability,
            r.risk_level.label(),
            r.estimated_time,
            r.recovery_rate
        );
    }
    if let Some(impact) = &snap.execution.impact {
        println!(
            "execution       {} threats neutralized, {} systems restored, {} downtime avoided, {} saved",
            impact.threats_neutralized,
            impact.systems_restored,
            impact.downtime_avoided,
            impact.cost_savings
        );
    }
    if let Some(secs) = snap.war_room.decision_time_secs {
        println!("war room        active after {secs:.1}s");
    }
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("scenario_runner=info,helios_sim=warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    info!(scenario = cli.scenario.code(), realtime = cli.realtime, "starting");

    let snap = if cli.realtime {
        let config = RuntimeConfig {
            time_scale: cli.time_scale,
            seed: cli.seed,
            prefs_dir: cli.prefs_dir.clone(),
            background_feeds: cli.feeds,
        };
        let (sink, rx) = ChannelSink::new();
        let handle = spawn_runtime(config, sink, Arc::new(Mutex::new(None)))
            .context("failed to spawn runtime thread")?;
        let mut live = Live {
            handle,
            rx,
            json: cli.json,
            patience: Duration::from_secs(120),
        };
        let result = run(&cli, &mut live);
        live.handle.shutdown();
        result?
    } else {
        let store: Box<dyn PreferenceStore> = match &cli.prefs_dir {
            Some(dir) => Box::new(FilePreferenceStore::new(dir)),
            None => Box::new(MemoryPreferenceStore::new()),
        };
        let engine = DashboardEngine::new(
            EngineConfig {
                seed: cli.seed,
                background_feeds: cli.feeds,
            },
            store,
        );
        let mut headless = Headless {
            engine,
            json: cli.json,
        };
        run(&cli, &mut headless)?
    };

    if !cli.json {
        summarize(&snap);
    }
    Ok(())
}
