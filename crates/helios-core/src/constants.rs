//! Timing constants and tuning parameters.
//!
//! All durations are in milliseconds of engine time.

// --- War room timeline (offsets from initiation) ---

pub const WAR_ROOM_APPROVAL_OFFSETS_MS: [u64; 3] = [2_000, 4_000, 6_000];

/// Delay between the final approval and team activation.
pub const WAR_ROOM_TEAM_ACTIVATION_DELAY_MS: u64 = 1_500;

/// Speed-up over the manual approval process quoted when the war room opens.
pub const WAR_ROOM_SPEEDUP_PERCENT: u32 = 75;

// --- Execution agents ---

/// Progress increments per execution task.
pub const AGENT_INCREMENTS_PER_TASK: u32 = 10;

/// Delay between two progress increments.
pub const AGENT_INCREMENT_DELAY_MS: u64 = 250;

// --- Result synthesizer ---

/// Mean confidence strictly above this is low risk.
pub const RISK_LOW_THRESHOLD: f64 = 92.0;

/// Mean confidence strictly above this (and not low) is medium risk.
pub const RISK_MEDIUM_THRESHOLD: f64 = 85.0;

pub const SIMULATED_ESTIMATED_TIME: &str = "12-18 minutes";
pub const SIMULATED_RECOVERY_RATE: &str = "99.2%";

// --- Notifications ---

/// Maximum notifications retained in the feed.
pub const MAX_NOTIFICATIONS: usize = 50;

/// Probability that a poll yields a new notification.
pub const NOTIFICATION_POLL_HIT_CHANCE: f64 = 0.3;

pub const DEFAULT_POLLING_INTERVAL_SECS: u32 = 30;

/// Lower bound applied to the polling interval so a bad preference cannot spin the engine.
pub const MIN_POLLING_INTERVAL_SECS: u32 = 1;

// --- Dashboard feed ---

/// Delay before the IRC critical alert pops up.
pub const CRITICAL_ALERT_REVEAL_MS: u64 = 5_000;

/// Interval between health / quick-stat refreshes.
pub const DASHBOARD_REFRESH_MS: u64 = 3_500;

pub const UPTIME_MIN: f64 = 99.90;
pub const UPTIME_MAX: f64 = 99.99;
pub const RESPONSE_TIME_MIN: f64 = 0.8;
pub const RESPONSE_TIME_MAX: f64 = 1.5;

/// Health value below which a metric is a warning.
pub const HEALTH_WARNING_BELOW: u32 = 95;

/// Health value below which a metric is an error.
pub const HEALTH_ERROR_BELOW: u32 = 92;

// --- Grocery ---

/// Eco discount applied to the subtotal.
pub const ECO_DISCOUNT_RATE: f64 = 0.15;

/// Sales tax applied to the discounted subtotal.
pub const TAX_RATE: f64 = 0.08;

/// Simulated payment processing time.
pub const PAYMENT_PROCESSING_MS: u64 = 3_000;

pub const ORDER_NUMBER_PREFIX: &str = "MG2035";
