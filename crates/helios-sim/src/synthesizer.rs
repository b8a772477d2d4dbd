//! Result synthesizer: folds a strategy selection into a simulation summary.

use helios_core::constants::{
    RISK_LOW_THRESHOLD, RISK_MEDIUM_THRESHOLD, SIMULATED_ESTIMATED_TIME, SIMULATED_RECOVERY_RATE,
};
use helios_core::enums::RiskLevel;
use helios_core::state::SimulationResult;

use crate::strategies::{record, StrategySelection};

/// Risk bucket for a mean confidence. Boundaries are strict.
pub fn risk_level(mean_confidence: f64) -> RiskLevel {
    if mean_confidence > RISK_LOW_THRESHOLD {
        RiskLevel::Low
    } else if mean_confidence > RISK_MEDIUM_THRESHOLD {
        RiskLevel::Medium
    } else {
        RiskLevel::High
    }
}

/// Summarize a selection. `None` for an empty selection.
pub fn synthesize(selection: &StrategySelection) -> Option<SimulationResult> {
    if selection.is_empty() {
        return None;
    }
    let total: f64 = selection.iter().map(|id| record(id).confidence).sum();
    let mean = total / selection.len() as f64;

    Some(SimulationResult {
        success_probability: mean,
        estimated_time: SIMULATED_ESTIMATED_TIME.to_string(),
        recovery_rate: SIMULATED_RECOVERY_RATE.to_string(),
        risk_level: risk_level(mean),
    })
}
