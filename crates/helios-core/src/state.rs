//! Dashboard snapshot: the complete visible state sent to the frontend after each advance.

use serde::{Deserialize, Serialize};

use crate::enums::*;
use crate::events::{AudioEvent, Toast};
use crate::types::{CartItem, ExecutionAgent, NotificationPreferences, ScenarioStep, SimTime};

/// Complete dashboard state broadcast to the frontend.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DashboardSnapshot {
    pub time: SimTime,
    pub role: RoleView,
    pub player: PlayerView,
    pub incident: IncidentView,
    pub strategies: Vec<StrategyView>,
    pub simulation_result: Option<SimulationResult>,
    pub execution: ExecutionView,
    pub war_room: WarRoomView,
    pub feed: FeedView,
    pub notifications: NotificationsView,
    pub grocery: GroceryView,
    pub toasts: Vec<Toast>,
    pub audio_events: Vec<AudioEvent>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RoleView {
    pub role: UserRole,
    pub role_name: String,
    pub verified: bool,
    pub irc_leader_mode: bool,
    pub leader_name: String,
    pub can_command_incidents: bool,
}

/// Scenario player status for display.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PlayerView {
    pub phase: PlayerPhase,
    pub scenario: Option<ScenarioKind>,
    pub scenario_name: Option<String>,
    pub steps: Vec<ScenarioStep>,
}

/// Incident detail state outside the player: chosen simulation and actions.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct IncidentView {
    pub selected_simulation: Option<IncidentScenarioId>,
    pub automated_actions: Vec<String>,
    pub human_actions: Vec<String>,
    pub actions_taken: Vec<String>,
    pub workflow_triggered: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StrategyView {
    pub id: StrategyId,
    pub title: String,
    pub confidence: f64,
    pub impact: String,
    pub risk_mitigation: String,
    pub selected: bool,
}

/// Output of the result synthesizer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationResult {
    /// Mean confidence of the selected strategies.
    pub success_probability: f64,
    pub estimated_time: String,
    pub recovery_rate: String,
    pub risk_level: RiskLevel,
}

/// Static impact figures released once execution finishes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImpactMetrics {
    pub threats_neutralized: u32,
    pub systems_restored: u32,
    pub downtime_avoided: String,
    pub cost_savings: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExecutionView {
    pub running: bool,
    pub agents: Vec<ExecutionAgent>,
    /// Overall progress, 0-100.
    pub progress: f64,
    pub tasks_done: u32,
    pub tasks_total: u32,
    pub impact: Option<ImpactMetrics>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApprovalView {
    pub level: u8,
    pub title: String,
    pub approver: String,
    pub role: String,
    pub status: ApprovalStatus,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TeamView {
    pub name: String,
    pub lead: String,
    pub members: u32,
    pub status: TeamStatus,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WarRoomView {
    pub open: bool,
    pub active: bool,
    pub approvals: Vec<ApprovalView>,
    pub teams: Vec<TeamView>,
    pub decision_time_secs: Option<f64>,
}

/// A security alert on the main dashboard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SecurityAlert {
    pub id: String,
    pub title: String,
    pub description: String,
    pub severity: AlertSeverity,
    pub category: AlertCategory,
    pub source: String,
    pub requires_irc_leader: bool,
    pub timestamp_ms: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthMetric {
    pub category: HealthCategory,
    /// 90-100.
    pub value: u32,
    pub status: HealthStatus,
    pub description: String,
    pub trend: Trend,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct QuickStats {
    pub threats_blocked: u64,
    /// Percent.
    pub network_uptime: f64,
    /// Seconds.
    pub avg_response_time: f64,
}

impl Default for QuickStats {
    fn default() -> Self {
        Self {
            threats_blocked: 1247,
            network_uptime: 99.97,
            avg_response_time: 1.2,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FeedView {
    pub alerts: Vec<SecurityAlert>,
    pub critical_alert_visible: bool,
    pub health: Vec<HealthMetric>,
    pub quick_stats: QuickStats,
}

/// One entry in the notification bell.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Notification {
    pub id: String,
    pub kind: NotificationKind,
    pub title: String,
    pub message: String,
    /// Relative label such as "15 min ago".
    pub time_label: String,
    pub read: bool,
    /// Engine time the notification was raised. May be negative for seeded history.
    pub timestamp_ms: i64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NotificationsView {
    /// Only the kinds enabled in the preferences.
    pub items: Vec<Notification>,
    pub unread_count: usize,
    pub preferences: NotificationPreferences,
}

/// Derived checkout arithmetic.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct OrderTotals {
    pub total_items: u32,
    pub subtotal: f64,
    pub discount: f64,
    pub tax: f64,
    pub delivery_fee: f64,
    pub payment_fee: f64,
    pub total: f64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GroceryView {
    pub screen: OrderScreen,
    pub items: Vec<CartItem>,
    pub totals: OrderTotals,
    pub payment: PaymentMethod,
    pub delivery: DeliveryOption,
    pub delivery_eta: String,
    pub processing_payment: bool,
    pub order_number: Option<String>,
}
