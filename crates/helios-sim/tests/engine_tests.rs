//! End-to-end sequencing properties of the dashboard engine, driven
//! through its public command interface only.

use helios_core::commands::OperatorCommand;
use helios_core::enums::*;
use helios_core::state::DashboardSnapshot;
use helios_sim::scenario::build_scenario;
use helios_sim::{DashboardEngine, EngineConfig};
use helios_store::MemoryPreferenceStore;

fn engine_with(background_feeds: bool, seed: u64) -> DashboardEngine {
    DashboardEngine::new(
        EngineConfig {
            seed,
            background_feeds,
        },
        Box::new(MemoryPreferenceStore::new()),
    )
}

fn commander() -> DashboardEngine {
    let mut engine = engine_with(false, 42);
    engine.queue_command(OperatorCommand::AuthenticateIrcLeader {
        name: Some("Dana".to_string()),
    });
    engine.advance(0);
    engine
}

fn rank(s: StepStatus) -> u8 {
    match s {
        StepStatus::Pending => 0,
        StepStatus::Running => 1,
        StepStatus::Completed => 2,
    }
}

/// Sample the player every `dt_ms` until it stops running, checking step ordering.
fn sample_until_done(engine: &mut DashboardEngine, dt_ms: u64) -> DashboardSnapshot {
    let mut last: Vec<u8> = Vec::new();
    for _ in 0..10_000 {
        let snap = engine.advance(dt_ms);
        let ranks: Vec<u8> = snap.player.steps.iter().map(|s| rank(s.status)).collect();

        let running = ranks.iter().filter(|r| **r == 1).count();
        assert!(running <= 1, "more than one step running: {ranks:?}");
        for w in ranks.windows(2) {
            assert!(w[0] >= w[1], "step started before its predecessor: {ranks:?}");
            if w[1] > 0 {
                assert_eq!(w[0], 2, "step started before predecessor completed: {ranks:?}");
            }
        }
        if last.len() == ranks.len() {
            for (a, b) in last.iter().zip(&ranks) {
                assert!(b >= a, "step status regressed");
            }
        }
        last = ranks;

        if snap.player.phase != PlayerPhase::Running && snap.player.phase != PlayerPhase::Paused {
            return snap;
        }
    }
    panic!("scenario never finished");
}

#[test]
fn every_incident_scenario_completes_all_steps_in_order() {
    for id in IncidentScenarioId::ALL {
        let mut engine = commander();
        engine.queue_command(OperatorCommand::RunSimulation { scenario: id });
        let snap = sample_until_done(&mut engine, 50);

        let expected = build_scenario(ScenarioKind::Incident(id)).len();
        assert_eq!(snap.player.phase, PlayerPhase::Completed);
        assert_eq!(snap.player.steps.len(), expected);
        assert!(snap
            .player
            .steps
            .iter()
            .all(|s| s.status == StepStatus::Completed));
    }
}

#[test]
fn coarse_advance_still_orders_steps() {
    let mut engine = commander();
    engine.queue_command(OperatorCommand::RunSimulation {
        scenario: IncidentScenarioId::FullFailover,
    });
    // One advance past the whole run fires every step in sequence.
    let total = build_scenario(ScenarioKind::Incident(IncidentScenarioId::FullFailover))
        .total_duration_ms();
    let snap = engine.advance(total);
    assert_eq!(snap.player.phase, PlayerPhase::Completed);
}

#[test]
fn no_step_completes_while_paused() {
    let mut engine = commander();
    engine.queue_command(OperatorCommand::RunSimulation {
        scenario: IncidentScenarioId::FullFailover,
    });
    engine.advance(2_000);
    engine.queue_command(OperatorCommand::TogglePause);
    let paused = engine.advance(0);
    let frozen: Vec<_> = paused.player.steps.iter().map(|s| s.status).collect();

    for _ in 0..100 {
        let snap = engine.advance(1_000);
        let now: Vec<_> = snap.player.steps.iter().map(|s| s.status).collect();
        assert_eq!(now, frozen, "progress while paused");
    }

    engine.queue_command(OperatorCommand::TogglePause);
    let snap = sample_until_done(&mut engine, 100);
    assert_eq!(snap.player.phase, PlayerPhase::Completed);
}

#[test]
fn execution_progress_hits_100_only_at_last_increment() {
    let mut engine = commander();
    engine.queue_commands([
        OperatorCommand::SelectStrategy {
            strategy: StrategyId::EnableEnhancedMonitoring,
        },
        OperatorCommand::SimulateStrategies,
    ]);
    let snap = engine.advance(3_600);
    let result = snap.simulation_result.expect("simulation result");
    // 85.0 is not above the medium threshold.
    assert_eq!(result.risk_level, RiskLevel::High);

    engine.queue_command(OperatorCommand::ExecutePlan);
    engine.advance(0);
    let mut last = 0.0;
    let mut increments = 0;
    loop {
        let snap = engine.advance(250);
        increments += 1;
        let p = snap.execution.progress;
        assert!(p > last, "overall progress did not increase");
        last = p;
        if snap.execution.running {
            assert!(p < 100.0);
        } else {
            assert_eq!(p, 100.0);
            break;
        }
        assert!(increments < 1_000);
    }
    assert_eq!(increments, 80);
}

#[test]
fn full_incident_response_flow() {
    let mut engine = commander();
    engine.queue_commands([
        OperatorCommand::RunSimulation {
            scenario: IncidentScenarioId::PartialMigration,
        },
        OperatorCommand::InitiateWarRoom,
        OperatorCommand::TakeAction {
            action: "Approve Failover".to_string(),
        },
    ]);
    let snap = engine.advance(7_500);
    assert!(snap.war_room.active);
    assert_eq!(snap.player.phase, PlayerPhase::Completed);
    assert_eq!(snap.role.leader_name, "Dana");
    assert_eq!(
        snap.incident.human_actions[0],
        "Monitor regional latency metrics"
    );

    engine.queue_commands([
        OperatorCommand::SelectStrategy {
            strategy: StrategyId::IsolateCompromisedSegment,
        },
        OperatorCommand::SelectStrategy {
            strategy: StrategyId::RotateCredentials,
        },
        OperatorCommand::SimulateStrategies,
    ]);
    let snap = engine.advance(3_600);
    let result = snap.simulation_result.expect("simulation result");
    assert!((result.success_probability - 91.6).abs() < 1e-9);
    assert_eq!(result.risk_level, RiskLevel::Medium);

    engine.queue_command(OperatorCommand::ExecutePlan);
    let snap = engine.advance(20_000);
    assert_eq!(snap.execution.progress, 100.0);
    assert_eq!(engine.pending_timers(), 0);
}

#[test]
fn snapshots_round_trip_as_json() {
    let mut engine = engine_with(true, 9);
    engine.queue_command(OperatorCommand::SwitchRole {
        role: UserRole::IrcLeader,
    });
    engine.queue_command(OperatorCommand::InitiateWarRoom);
    let snap = engine.advance(6_000);

    let json = serde_json::to_string(&snap).unwrap();
    let back: DashboardSnapshot = serde_json::from_str(&json).unwrap();
    assert_eq!(back.time, snap.time);
    assert_eq!(back.war_room.approvals.len(), 3);
    assert!(back.feed.critical_alert_visible);
}

#[test]
fn different_seeds_diverge() {
    let mut a = engine_with(true, 1);
    let mut b = engine_with(true, 2);
    let mut diverged = false;
    for _ in 0..50 {
        let ja = serde_json::to_string(&a.advance(3_500)).unwrap();
        let jb = serde_json::to_string(&b.advance(3_500)).unwrap();
        if ja != jb {
            diverged = true;
            break;
        }
    }
    assert!(diverged, "different seeds produced identical runs");
}
