//! Enumeration types used throughout the engine.

use serde::{Deserialize, Serialize};

/// Lifecycle of a single scenario step. Transitions only move forward.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StepStatus {
    #[default]
    Pending,
    Running,
    Completed,
}

/// Lifecycle of an execution agent. Transitions only move forward.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AgentStatus {
    #[default]
    Idle,
    Active,
    Completed,
}

/// Scenario player state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlayerPhase {
    #[default]
    Idle,
    Running,
    Paused,
    Completed,
}

/// What a scenario run feeds into once it completes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ScenarioKind {
    /// Step-by-step run of one of the incident simulation scenarios.
    Incident(IncidentScenarioId),
    /// Simulation of the operator's selected response strategies.
    StrategySimulation,
    /// Delivery tracking shown after a grocery order is confirmed.
    DeliveryTracking,
}

/// Stable identifiers for the pre-authored incident simulation scenarios.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum IncidentScenarioId {
    /// Full failover to the secondary region.
    #[serde(rename = "SIM-001")]
    FullFailover,
    /// Partial, region-by-region migration.
    #[serde(rename = "SIM-002")]
    PartialMigration,
    /// Wait for the provider while monitoring.
    #[serde(rename = "SIM-003")]
    MonitorAndWait,
}

impl IncidentScenarioId {
    pub const ALL: [IncidentScenarioId; 3] = [
        IncidentScenarioId::FullFailover,
        IncidentScenarioId::PartialMigration,
        IncidentScenarioId::MonitorAndWait,
    ];

    /// Catalogue code shown on the dashboard.
    pub fn code(self) -> &'static str {
        match self {
            IncidentScenarioId::FullFailover => "SIM-001",
            IncidentScenarioId::PartialMigration => "SIM-002",
            IncidentScenarioId::MonitorAndWait => "SIM-003",
        }
    }

    /// Parse a catalogue code such as `SIM-002` (case-insensitive).
    pub fn parse(code: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|id| id.code().eq_ignore_ascii_case(code.trim()))
    }
}

/// Stable identifiers for the recommended response strategies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum StrategyId {
    IsolateCompromisedSegment,
    FailoverToSecondaryRegion,
    RotateCredentials,
    EnableEnhancedMonitoring,
    RateLimitIngress,
}

impl StrategyId {
    pub const ALL: [StrategyId; 5] = [
        StrategyId::IsolateCompromisedSegment,
        StrategyId::FailoverToSecondaryRegion,
        StrategyId::RotateCredentials,
        StrategyId::EnableEnhancedMonitoring,
        StrategyId::RateLimitIngress,
    ];

    /// Short kebab-case key used on the command line.
    pub fn key(self) -> &'static str {
        match self {
            StrategyId::IsolateCompromisedSegment => "isolate",
            StrategyId::FailoverToSecondaryRegion => "failover",
            StrategyId::RotateCredentials => "rotate-credentials",
            StrategyId::EnableEnhancedMonitoring => "monitoring",
            StrategyId::RateLimitIngress => "rate-limit",
        }
    }

    pub fn parse(key: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|id| id.key().eq_ignore_ascii_case(key.trim()))
    }
}

/// Risk bucket produced by the result synthesizer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl RiskLevel {
    pub fn label(self) -> &'static str {
        match self {
            RiskLevel::Low => "Low",
            RiskLevel::Medium => "Medium",
            RiskLevel::High => "High",
        }
    }
}

/// War-room approval state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ApprovalStatus {
    #[default]
    Pending,
    Approved,
}

/// Coordination team state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum TeamStatus {
    #[default]
    Standby,
    Active,
}

/// Notification category. Doubles as the preference key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationKind {
    Critical,
    Warning,
    Info,
    Success,
}

/// Operator role.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UserRole {
    #[default]
    Analyst,
    IrcLeader,
    OffensiveTester,
    RccHead,
}

impl UserRole {
    pub const ALL: [UserRole; 4] = [
        UserRole::RccHead,
        UserRole::Analyst,
        UserRole::IrcLeader,
        UserRole::OffensiveTester,
    ];

    pub fn display_name(self) -> &'static str {
        match self {
            UserRole::Analyst => "Integrated Operations Analyst",
            UserRole::IrcLeader => "IRC Leader",
            UserRole::OffensiveTester => "Offensive Tester",
            UserRole::RccHead => "Resilient Command Centre Head",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            UserRole::Analyst => "SOC/NOC unified view",
            UserRole::IrcLeader => "Incident command authority",
            UserRole::OffensiveTester => "Red team operations",
            UserRole::RccHead => "Global admin access",
        }
    }
}

/// Severity of a dashboard security alert.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum AlertSeverity {
    Low,
    Medium,
    High,
    Critical,
}

/// Operations domain an alert belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AlertCategory {
    Soc,
    Noc,
}

/// Toast severity level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ToastLevel {
    Info,
    Success,
    Warning,
}

/// System health category on the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HealthCategory {
    NetworkPerformance,
    SecurityPosture,
    SystemAvailability,
    ThreatDetection,
}

impl HealthCategory {
    pub const ALL: [HealthCategory; 4] = [
        HealthCategory::NetworkPerformance,
        HealthCategory::SecurityPosture,
        HealthCategory::SystemAvailability,
        HealthCategory::ThreatDetection,
    ];
}

/// Health metric status derived from its value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HealthStatus {
    Ok,
    Warning,
    Error,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Trend {
    Up,
    Down,
    Stable,
}

/// Grocery checkout screen.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum OrderScreen {
    #[default]
    Dashboard,
    Cart,
    Finalization,
    Payment,
    Confirmation,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum PaymentMethod {
    #[default]
    DigitalWallet,
    CreditCard,
    Crypto,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum DeliveryOption {
    #[default]
    Drone,
    Standard,
    Hyperloop,
}
