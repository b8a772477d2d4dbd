//! Recommended response strategies and the operator's selection.

use std::collections::BTreeSet;

use helios_core::enums::StrategyId;
use helios_core::state::StrategyView;
use helios_core::types::StrategyRecord;
use helios_core::{HeliosError, HeliosResult};

/// Static record for a strategy.
pub fn record(id: StrategyId) -> StrategyRecord {
    match id {
        StrategyId::IsolateCompromisedSegment => StrategyRecord {
            title: "Isolate compromised network segment",
            confidence: 94.7,
            impact: "Contains lateral movement within 2 minutes",
            risk_mitigation: "Cuts attacker access to payment infrastructure",
        },
        StrategyId::FailoverToSecondaryRegion => StrategyRecord {
            title: "Fail over to secondary region",
            confidence: 91.2,
            impact: "Restores customer-facing services in under 10 minutes",
            risk_mitigation: "Removes dependency on the degraded availability zone",
        },
        StrategyId::RotateCredentials => StrategyRecord {
            title: "Rotate privileged credentials",
            confidence: 88.5,
            impact: "Invalidates any harvested service tokens",
            risk_mitigation: "Prevents re-entry through stolen credentials",
        },
        StrategyId::EnableEnhancedMonitoring => StrategyRecord {
            title: "Enable enhanced monitoring",
            confidence: 85.0,
            impact: "Full packet capture on critical segments",
            risk_mitigation: "Early detection of follow-up activity",
        },
        StrategyId::RateLimitIngress => StrategyRecord {
            title: "Rate-limit ingress traffic",
            confidence: 79.3,
            impact: "Sheds abusive load at the edge",
            risk_mitigation: "Keeps core services responsive under flood",
        },
    }
}

/// Set of strategies the operator has ticked for simulation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StrategySelection {
    selected: BTreeSet<StrategyId>,
}

impl StrategySelection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a strategy. Selecting twice is a no-op.
    pub fn select(&mut self, id: StrategyId) {
        self.selected.insert(id);
    }

    pub fn deselect(&mut self, id: StrategyId) -> HeliosResult<()> {
        if self.selected.remove(&id) {
            Ok(())
        } else {
            Err(HeliosError::StrategyNotSelected(id))
        }
    }

    pub fn contains(&self, id: StrategyId) -> bool {
        self.selected.contains(&id)
    }

    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    pub fn len(&self) -> usize {
        self.selected.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = StrategyId> + '_ {
        self.selected.iter().copied()
    }

    pub fn clear(&mut self) {
        self.selected.clear();
    }
}

impl FromIterator<StrategyId> for StrategySelection {
    fn from_iter<I: IntoIterator<Item = StrategyId>>(iter: I) -> Self {
        Self {
            selected: iter.into_iter().collect(),
        }
    }
}

/// Every strategy in catalogue order, flagged with the current selection.
pub fn views(selection: &StrategySelection) -> Vec<StrategyView> {
    StrategyId::ALL
        .into_iter()
        .map(|id| {
            let r = record(id);
            StrategyView {
                id,
                title: r.title.to_string(),
                confidence: r.confidence,
                impact: r.impact.to_string(),
                risk_mitigation: r.risk_mitigation.to_string(),
                selected: selection.contains(id),
            }
        })
        .collect()
}
