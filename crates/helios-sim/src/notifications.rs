//! Notification bell feed: seeded history, simulated polling, read state.

use rand::Rng;

use helios_core::constants::{MAX_NOTIFICATIONS, NOTIFICATION_POLL_HIT_CHANCE};
use helios_core::enums::NotificationKind;
use helios_core::state::{Notification, NotificationsView};
use helios_core::types::NotificationPreferences;

/// Alerts a poll may "fetch": `(kind, title, message)`.
pub const SIMULATED_ALERTS: [(NotificationKind, &str, &str); 8] = [
    (
        NotificationKind::Critical,
        "Ransomware Detected",
        "Suspicious encryption activity on endpoint-078",
    ),
    (
        NotificationKind::Warning,
        "Brute Force Attempt",
        "Multiple failed SSH attempts from 10.0.5.231",
    ),
    (
        NotificationKind::Info,
        "Patch Available",
        "Critical security patch ready for deployment",
    ),
    (
        NotificationKind::Critical,
        "Data Exfiltration Alert",
        "Large outbound transfer detected to unknown IP",
    ),
    (
        NotificationKind::Warning,
        "Certificate Expiring",
        "SSL certificate for api.internal expires in 7 days",
    ),
    (
        NotificationKind::Success,
        "Threat Contained",
        "Malicious process quarantined on server-042",
    ),
    (
        NotificationKind::Info,
        "Firewall Updated",
        "New rules deployed across perimeter devices",
    ),
    (
        NotificationKind::Critical,
        "Zero-Day Exploit",
        "New CVE detected affecting production systems",
    ),
];

/// Relative label for an event `age_ms` old.
pub fn format_time_ago(age_ms: i64) -> String {
    let mins = age_ms.max(0) / 60_000;
    if mins < 1 {
        return "Just now".to_string();
    }
    if mins < 60 {
        return format!("{mins} min ago");
    }
    let hours = mins / 60;
    if hours < 24 {
        let s = if hours > 1 { "s" } else { "" };
        return format!("{hours} hour{s} ago");
    }
    let days = hours / 24;
    let s = if days > 1 { "s" } else { "" };
    format!("{days} day{s} ago")
}

#[derive(Debug, Clone)]
pub struct NotificationFeed {
    items: Vec<Notification>,
    next_seq: u64,
}

impl Default for NotificationFeed {
    fn default() -> Self {
        Self::seeded()
    }
}

impl NotificationFeed {
    /// Empty feed.
    pub fn empty() -> Self {
        Self {
            items: Vec::new(),
            next_seq: 1,
        }
    }

    /// The five notifications present when the dashboard opens, aged relative to t=0.
    pub fn seeded() -> Self {
        let seed = [
            ("1", NotificationKind::Critical, "Critical Alert", "DDoS attack detected on edge servers", false, -120_000),
            ("2", NotificationKind::Warning, "Security Warning", "Multiple failed login attempts from IP 192.168.1.45", false, -900_000),
            ("3", NotificationKind::Info, "System Update", "Firewall rules updated successfully", false, -3_600_000),
            ("4", NotificationKind::Success, "Threat Neutralized", "Malware quarantined on endpoint-042", true, -7_200_000),
            ("5", NotificationKind::Warning, "Anomaly Detected", "Unusual outbound traffic from Finance dept", true, -10_800_000),
        ];
        let items = seed
            .into_iter()
            .map(|(id, kind, title, message, read, timestamp_ms)| Notification {
                id: id.to_string(),
                kind,
                title: title.to_string(),
                message: message.to_string(),
                time_label: format_time_ago(-timestamp_ms),
                read,
                timestamp_ms,
            })
            .collect();
        Self { items, next_seq: 1 }
    }

    /// Every retained notification, newest first, regardless of preferences.
    pub fn all(&self) -> &[Notification] {
        &self.items
    }

    /// One polling round. Returns the notification added, if any.
    pub fn poll<R: Rng + ?Sized>(
        &mut self,
        now_ms: u64,
        prefs: &NotificationPreferences,
        rng: &mut R,
    ) -> Option<Notification> {
        let mut added = None;
        if rng.gen::<f64>() < NOTIFICATION_POLL_HIT_CHANCE {
            let (kind, title, message) = SIMULATED_ALERTS[rng.gen_range(0..SIMULATED_ALERTS.len())];
            if prefs.allows(kind) {
                let n = Notification {
                    id: format!("notif-{}", self.next_seq),
                    kind,
                    title: title.to_string(),
                    message: message.to_string(),
                    time_label: format_time_ago(0),
                    read: false,
                    timestamp_ms: now_ms as i64,
                };
                self.next_seq += 1;
                self.push(n.clone());
                added = Some(n);
            } else {
                tracing::trace!(?kind, "polled alert suppressed by preferences");
            }
        }
        // Labels refresh on every poll, including one whose alert was suppressed.
        self.relabel(now_ms);
        added
    }

    /// Prepend a notification, dropping the oldest beyond the retention cap.
    pub fn push(&mut self, notification: Notification) {
        self.items.insert(0, notification);
        self.items.truncate(MAX_NOTIFICATIONS);
    }

    pub fn relabel(&mut self, now_ms: u64) {
        for n in &mut self.items {
            n.time_label = format_time_ago(now_ms as i64 - n.timestamp_ms);
        }
    }

    /// Mark one notification read. Returns `false` if the id is unknown.
    pub fn mark_read(&mut self, id: &str) -> bool {
        match self.items.iter_mut().find(|n| n.id == id) {
            Some(n) => {
                n.read = true;
                true
            }
            None => false,
        }
    }

    pub fn mark_all_read(&mut self) {
        for n in &mut self.items {
            n.read = true;
        }
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Unread count over the kinds the preferences allow.
    pub fn unread_count(&self, prefs: &NotificationPreferences) -> usize {
        self.items
            .iter()
            .filter(|n| !n.read && prefs.allows(n.kind))
            .count()
    }

    pub fn view(&self, prefs: &NotificationPreferences) -> NotificationsView {
        NotificationsView {
            items: self
                .items
                .iter()
                .filter(|n| prefs.allows(n.kind))
                .cloned()
                .collect(),
            unread_count: self.unread_count(prefs),
            preferences: *prefs,
        }
    }
}
