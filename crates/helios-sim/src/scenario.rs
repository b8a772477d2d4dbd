//! Scenario definitions: hardcoded step lists and the incident catalogue.
//!
//! Each scenario is an ordered list of named steps with simulated
//! durations. Definitions are immutable templates; the player works on a
//! fresh copy per run.

use helios_core::enums::{IncidentScenarioId, RiskLevel, ScenarioKind};
use helios_core::types::ScenarioStep;

/// Immutable scenario template.
#[derive(Debug, Clone)]
pub struct ScenarioDefinition {
    pub kind: ScenarioKind,
    pub name: String,
    steps: Vec<(&'static str, u64)>,
}

impl ScenarioDefinition {
    pub fn new(kind: ScenarioKind, name: impl Into<String>, steps: Vec<(&'static str, u64)>) -> Self {
        Self {
            kind,
            name: name.into(),
            steps,
        }
    }

    /// Fresh runtime copy with every step pending.
    pub fn instantiate(&self) -> Vec<ScenarioStep> {
        self.steps
            .iter()
            .enumerate()
            .map(|(i, &(name, duration_ms))| ScenarioStep::new(i as u32 + 1, name, duration_ms))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Sum of all step durations.
    pub fn total_duration_ms(&self) -> u64 {
        self.steps.iter().map(|&(_, d)| d).sum()
    }
}

/// Pre-authored incident simulation scenario shown on the alert detail view.
#[derive(Debug, Clone, PartialEq)]
pub struct IncidentScenario {
    pub id: IncidentScenarioId,
    pub name: &'static str,
    pub description: &'static str,
    pub estimated_time: &'static str,
    /// Percent.
    pub success_rate: u32,
    pub risk_level: RiskLevel,
    pub automated_actions: &'static [&'static str],
    pub human_actions: &'static [&'static str],
}

/// Catalogue entry for an incident scenario.
pub fn incident(id: IncidentScenarioId) -> IncidentScenario {
    match id {
        IncidentScenarioId::FullFailover => IncidentScenario {
            id,
            name: "Full Failover to US-West-2",
            description: "Shift all production traffic to the secondary region and promote replicas",
            estimated_time: "8-12 minutes",
            success_rate: 94,
            risk_level: RiskLevel::Low,
            automated_actions: &[
                "Initiating full traffic migration to US-West-2",
                "Spinning up 847 redundant containers",
                "Updating DNS records globally",
                "Promoting database read replicas",
                "Invalidating CDN cache",
            ],
            human_actions: &[
                "Monitor failover progress dashboard",
                "Verify payment gateway connectivity",
                "Confirm customer transaction recovery",
                "Update status page for customers",
            ],
        },
        IncidentScenarioId::PartialMigration => IncidentScenario {
            id,
            name: "Partial Regional Migration",
            description: "Move EU and APAC traffic while US stays on the degraded primary",
            estimated_time: "15-20 minutes",
            success_rate: 87,
            risk_level: RiskLevel::Medium,
            automated_actions: &[
                "Migrating EU traffic to secondary region",
                "Migrating APAC traffic to secondary region",
                "Maintaining US traffic on degraded primary",
                "Adjusting load balancer weights",
            ],
            human_actions: &[
                "Monitor regional latency metrics",
                "Coordinate with regional support teams",
                "Prepare rollback procedure if needed",
            ],
        },
        IncidentScenarioId::MonitorAndWait => IncidentScenario {
            id,
            name: "Monitor and Wait for Provider Recovery",
            description: "Hold position with enhanced monitoring and staged failover scripts",
            estimated_time: "30-90 minutes",
            success_rate: 62,
            risk_level: RiskLevel::High,
            automated_actions: &[
                "Enabling enhanced monitoring mode",
                "Setting up AWS status page alerts",
                "Preparing failover scripts for quick activation",
            ],
            human_actions: &[
                "Monitor AWS status updates",
                "Prepare customer communication",
                "Be ready to escalate if ETA exceeds threshold",
            ],
        },
    }
}

/// Default action lists of the alert itself, used before any simulation is chosen.
pub const ALERT_DEFAULT_AUTOMATED_ACTIONS: &[&str] = &[
    "Reroute traffic away from degraded availability zone",
    "Scale up healthy node pools",
    "Enable circuit breakers on payment APIs",
];

pub const ALERT_DEFAULT_HUMAN_ACTIONS: &[&str] = &[
    "Approve regional failover",
    "Notify executive stakeholders",
    "Brief customer support leads",
];

/// Build the step list for a given scenario kind.
pub fn build_scenario(kind: ScenarioKind) -> ScenarioDefinition {
    match kind {
        ScenarioKind::Incident(id) => build_incident_run(id),
        ScenarioKind::StrategySimulation => build_strategy_simulation(),
        ScenarioKind::DeliveryTracking => build_delivery_tracking(),
    }
}

/// Every incident scenario plays the same six-stage run.
fn build_incident_run(id: IncidentScenarioId) -> ScenarioDefinition {
    ScenarioDefinition::new(
        ScenarioKind::Incident(id),
        incident(id).name,
        vec![
            ("Initializing simulation environment", 1_000),
            ("Validating prerequisites", 800),
            ("Executing primary actions", 1_500),
            ("Verifying system responses", 1_200),
            ("Running health checks", 900),
            ("Calculating success metrics", 700),
        ],
    )
}

fn build_strategy_simulation() -> ScenarioDefinition {
    ScenarioDefinition::new(
        ScenarioKind::StrategySimulation,
        "Response Strategy Simulation",
        vec![
            ("Loading selected strategies", 600),
            ("Modelling threat propagation", 1_200),
            ("Projecting service recovery", 1_000),
            ("Scoring strategy confidence", 800),
        ],
    )
}

fn build_delivery_tracking() -> ScenarioDefinition {
    ScenarioDefinition::new(
        ScenarioKind::DeliveryTracking,
        "Order Delivery",
        vec![
            ("Order Confirmed", 500),
            ("Preparing Package", 4_000),
            ("Drone Dispatch", 6_000),
            ("Delivered", 2_000),
        ],
    )
}
