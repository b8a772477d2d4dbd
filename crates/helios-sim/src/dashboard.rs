//! Main dashboard feed: security alerts, system health and quick stats.
//!
//! The IRC critical alert is held back until its reveal timer fires and
//! joins the alert list only once the operator dismisses the pop-up.

use rand::Rng;

use helios_core::constants::{
    HEALTH_ERROR_BELOW, HEALTH_WARNING_BELOW, RESPONSE_TIME_MAX, RESPONSE_TIME_MIN, UPTIME_MAX,
    UPTIME_MIN,
};
use helios_core::enums::{AlertCategory, AlertSeverity, HealthCategory, HealthStatus, Trend};
use helios_core::state::{FeedView, HealthMetric, QuickStats, SecurityAlert};
use helios_core::{HeliosError, HeliosResult};

pub const IRC_CRITICAL_ALERT_ID: &str = "irc-critical-001";

/// The cloud outage alert only an IRC leader may work.
pub fn irc_critical_alert(timestamp_ms: u64) -> SecurityAlert {
    SecurityAlert {
        id: IRC_CRITICAL_ALERT_ID.to_string(),
        title: "Cloud provider outage impacting core services".to_string(),
        description: "AWS US-East-1 experiencing severe degradation. Payment processing APIs \
                      returning 503 errors. Customer transactions failing at 847/minute."
            .to_string(),
        severity: AlertSeverity::Critical,
        category: AlertCategory::Soc,
        source: "Cloud Health Monitor".to_string(),
        requires_irc_leader: true,
        timestamp_ms,
    }
}

fn initial_alerts() -> Vec<SecurityAlert> {
    let raw = [
        (
            "alert-001",
            "Suspicious login pattern",
            "Impossible-travel sign-ins for three finance accounts",
            AlertSeverity::High,
            AlertCategory::Soc,
            "Identity Gateway",
        ),
        (
            "alert-002",
            "Core switch packet loss",
            "2.4% packet loss on DC-East core switch uplink",
            AlertSeverity::Medium,
            AlertCategory::Noc,
            "Network Telemetry",
        ),
        (
            "alert-003",
            "Malware signature match",
            "Known loader signature quarantined on endpoint-042",
            AlertSeverity::High,
            AlertCategory::Soc,
            "EDR",
        ),
        (
            "alert-004",
            "BGP session flap",
            "Peer AS64512 session reset twice in ten minutes",
            AlertSeverity::Low,
            AlertCategory::Noc,
            "Edge Router",
        ),
    ];
    raw.into_iter()
        .map(|(id, title, description, severity, category, source)| SecurityAlert {
            id: id.to_string(),
            title: title.to_string(),
            description: description.to_string(),
            severity,
            category,
            source: source.to_string(),
            requires_irc_leader: false,
            timestamp_ms: 0,
        })
        .collect()
}

/// Status bucket for a health value.
pub fn health_status(value: u32) -> HealthStatus {
    if value < HEALTH_ERROR_BELOW {
        HealthStatus::Error
    } else if value < HEALTH_WARNING_BELOW {
        HealthStatus::Warning
    } else {
        HealthStatus::Ok
    }
}

/// Fresh random reading for every health category.
pub fn generate_health<R: Rng + ?Sized>(rng: &mut R) -> Vec<HealthMetric> {
    const TRENDS: [Trend; 3] = [Trend::Up, Trend::Down, Trend::Stable];
    HealthCategory::ALL
        .into_iter()
        .map(|category| {
            let value = rng.gen_range(90..=100u32);
            HealthMetric {
                category,
                value,
                status: health_status(value),
                description: format!("{value}% operational efficiency"),
                trend: TRENDS[rng.gen_range(0..TRENDS.len())],
            }
        })
        .collect()
}

/// One random-walk step of the quick stats, kept inside their clamps.
pub fn step_quick_stats<R: Rng + ?Sized>(stats: &QuickStats, rng: &mut R) -> QuickStats {
    QuickStats {
        threats_blocked: stats.threats_blocked + rng.gen_range(1..=5u64),
        network_uptime: (stats.network_uptime + (rng.gen::<f64>() - 0.45) * 0.01)
            .clamp(UPTIME_MIN, UPTIME_MAX),
        avg_response_time: (stats.avg_response_time + (rng.gen::<f64>() - 0.5) * 0.1)
            .clamp(RESPONSE_TIME_MIN, RESPONSE_TIME_MAX),
    }
}

#[derive(Debug, Clone)]
pub struct DashboardFeed {
    alerts: Vec<SecurityAlert>,
    critical_visible: bool,
    critical_added: bool,
    health: Vec<HealthMetric>,
    stats: QuickStats,
}

impl DashboardFeed {
    pub fn new<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self {
            alerts: initial_alerts(),
            critical_visible: false,
            critical_added: false,
            health: generate_health(rng),
            stats: QuickStats::default(),
        }
    }

    pub fn alerts(&self) -> &[SecurityAlert] {
        &self.alerts
    }

    pub fn critical_alert_visible(&self) -> bool {
        self.critical_visible
    }

    pub fn quick_stats(&self) -> QuickStats {
        self.stats
    }

    /// Pop up the critical alert. Returns `false` if it was already handled.
    pub fn reveal_critical_alert(&mut self) -> bool {
        if self.critical_added || self.critical_visible {
            return false;
        }
        self.critical_visible = true;
        tracing::info!(alert = IRC_CRITICAL_ALERT_ID, "critical alert revealed");
        true
    }

    /// Dismiss the pop-up. Returns `true` the first time, when the alert joins the list.
    pub fn dismiss_critical_alert(&mut self, now_ms: u64) -> HeliosResult<bool> {
        if !self.critical_visible {
            return Err(HeliosError::InvalidTransition(
                "critical alert is not showing".to_string(),
            ));
        }
        self.critical_visible = false;
        if self.critical_added {
            return Ok(false);
        }
        self.alerts.insert(0, irc_critical_alert(now_ms));
        self.critical_added = true;
        Ok(true)
    }

    /// Periodic refresh of health and quick stats.
    pub fn refresh<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.health = generate_health(rng);
        self.stats = step_quick_stats(&self.stats, rng);
    }

    pub fn view(&self) -> FeedView {
        FeedView {
            alerts: self.alerts.clone(),
            critical_alert_visible: self.critical_visible,
            health: self.health.clone(),
            quick_stats: self.stats,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn initial_list_hides_irc_alerts() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let feed = DashboardFeed::new(&mut rng);
        assert!(!feed.alerts().is_empty());
        assert!(feed.alerts().iter().all(|a| !a.requires_irc_leader));
        assert_eq!(feed.view().health.len(), 4);
    }

    #[test]
    fn critical_alert_joins_list_once() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let mut feed = DashboardFeed::new(&mut rng);
        assert!(feed.dismiss_critical_alert(0).is_err());

        assert!(feed.reveal_critical_alert());
        assert!(feed.critical_alert_visible());
        assert!(feed.dismiss_critical_alert(5_000).unwrap());
        assert_eq!(feed.alerts()[0].id, IRC_CRITICAL_ALERT_ID);
        let len = feed.alerts().len();

        assert!(!feed.reveal_critical_alert());
        assert_eq!(feed.alerts().len(), len);
    }

    #[test]
    fn health_buckets() {
        assert_eq!(health_status(100), HealthStatus::Ok);
        assert_eq!(health_status(95), HealthStatus::Ok);
        assert_eq!(health_status(94), HealthStatus::Warning);
        assert_eq!(health_status(92), HealthStatus::Warning);
        assert_eq!(health_status(91), HealthStatus::Error);
    }

    #[test]
    fn stats_walk_stays_clamped() {
        let mut rng = ChaCha8Rng::seed_from_u64(99);
        let mut feed = DashboardFeed::new(&mut rng);
        let mut last = feed.quick_stats().threats_blocked;
        for _ in 0..500 {
            feed.refresh(&mut rng);
            let s = feed.quick_stats();
            assert!((UPTIME_MIN..=UPTIME_MAX).contains(&s.network_uptime));
            assert!((RESPONSE_TIME_MIN..=RESPONSE_TIME_MAX).contains(&s.avg_response_time));
            assert!((1..=5).contains(&(s.threats_blocked - last)));
            last = s.threats_blocked;
            for m in feed.view().health {
                assert!((90..=100).contains(&m.value));
                assert_eq!(m.status, health_status(m.value));
            }
        }
    }
}
