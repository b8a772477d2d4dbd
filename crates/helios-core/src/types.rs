//! Fundamental engine types.

use serde::{Deserialize, Serialize};

use crate::constants::DEFAULT_POLLING_INTERVAL_SECS;
use crate::enums::{AgentStatus, NotificationKind, StepStatus};

/// Engine time tracking.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimTime {
    /// Elapsed engine time in milliseconds.
    pub now_ms: u64,
}

impl SimTime {
    pub fn advance(&mut self, dt_ms: u64) {
        self.now_ms = self.now_ms.saturating_add(dt_ms);
    }

    pub fn elapsed_secs(&self) -> f64 {
        self.now_ms as f64 / 1000.0
    }
}

/// One step of a staged scenario.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScenarioStep {
    pub id: u32,
    pub name: String,
    pub status: StepStatus,
    pub duration_ms: u64,
}

impl ScenarioStep {
    pub fn new(id: u32, name: impl Into<String>, duration_ms: u64) -> Self {
        Self {
            id,
            name: name.into(),
            status: StepStatus::Pending,
            duration_ms,
        }
    }
}

/// A named pseudo-worker animated by the execution driver.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExecutionAgent {
    pub name: String,
    pub status: AgentStatus,
    pub current_task: Option<String>,
    /// 0-100, never decreases.
    pub progress: f64,
}

impl ExecutionAgent {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            status: AgentStatus::Idle,
            current_task: None,
            progress: 0.0,
        }
    }
}

/// Static, pre-authored response strategy.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StrategyRecord {
    pub title: &'static str,
    /// 0-100.
    pub confidence: f64,
    pub impact: &'static str,
    pub risk_mitigation: &'static str,
}

/// Which notification kinds are shown, plus sound and polling settings.
///
/// Persisted as the `notificationPreferences` record, hence the camelCase keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationPreferences {
    pub critical: bool,
    pub warning: bool,
    pub info: bool,
    pub success: bool,
    pub sound_enabled: bool,
    /// Seconds between notification polls.
    pub polling_interval: u32,
}

impl Default for NotificationPreferences {
    fn default() -> Self {
        Self {
            critical: true,
            warning: true,
            info: true,
            success: true,
            sound_enabled: true,
            polling_interval: DEFAULT_POLLING_INTERVAL_SECS,
        }
    }
}

impl NotificationPreferences {
    /// Whether notifications of this kind are shown.
    pub fn allows(&self, kind: NotificationKind) -> bool {
        match kind {
            NotificationKind::Critical => self.critical,
            NotificationKind::Warning => self.warning,
            NotificationKind::Info => self.info,
            NotificationKind::Success => self.success,
        }
    }

    /// Merge a partial update into these preferences.
    pub fn apply(&mut self, patch: &PreferencesPatch) {
        if let Some(v) = patch.critical {
            self.critical = v;
        }
        if let Some(v) = patch.warning {
            self.warning = v;
        }
        if let Some(v) = patch.info {
            self.info = v;
        }
        if let Some(v) = patch.success {
            self.success = v;
        }
        if let Some(v) = patch.sound_enabled {
            self.sound_enabled = v;
        }
        if let Some(v) = patch.polling_interval {
            self.polling_interval = v;
        }
    }
}

/// Partial preference update; absent fields are left unchanged.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PreferencesPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub critical: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub warning: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub info: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub success: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sound_enabled: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub polling_interval: Option<u32>,
}

/// A line in the grocery cart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartItem {
    pub id: String,
    pub name: String,
    pub price: f64,
    pub quantity: u32,
    pub category: String,
}

impl CartItem {
    pub fn line_total(&self) -> f64 {
        self.price * self.quantity as f64
    }
}
