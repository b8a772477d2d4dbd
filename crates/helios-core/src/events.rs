//! Events emitted by the engine for audio and UI feedback.

use serde::{Deserialize, Serialize};

use crate::enums::*;

/// Audio cues for the frontend sound system. Playback failures are the sink's problem.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum AudioEvent {
    /// Two-tone chime played when an approval lands.
    HeliosChime,
    /// Alarm for a newly revealed critical alert.
    CriticalAlarm,
    /// A new notification arrived in the feed.
    NotificationPing { kind: NotificationKind },
}

/// Transient user-facing message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Toast {
    pub level: ToastLevel,
    pub message: String,
    pub at_ms: u64,
}
