//! War-room sequencer: three-level approval chain, then team activation.
//!
//! The whole timeline is armed at initiation and every handle is kept, so
//! closing the war room or resetting the engine disarms whatever is left.

use helios_core::constants::{
    WAR_ROOM_APPROVAL_OFFSETS_MS, WAR_ROOM_SPEEDUP_PERCENT, WAR_ROOM_TEAM_ACTIVATION_DELAY_MS,
};
use helios_core::enums::{ApprovalStatus, TeamStatus, ToastLevel};
use helios_core::state::{ApprovalView, TeamView, WarRoomView};
use helios_core::{HeliosError, HeliosResult};

use crate::timers::{Scheduler, TimerId, TimerKey};

/// Position on the war-room timeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WarRoomStage {
    /// Approval at this index (0-based) lands.
    Approval(usize),
    TeamsActive,
}

/// `(title, approver, role, toast text)`.
const APPROVAL_CHAIN: [(&str, &str, &str, &str); 3] = [
    (
        "Technical Lead Approval",
        "Alex Chen",
        "Senior DevOps Engineer",
        "Technical lead approval received",
    ),
    (
        "Operations Manager Approval",
        "Sarah Mitchell",
        "Director of Operations",
        "Operations manager approval received",
    ),
    (
        "Executive Approval",
        "Michael Torres",
        "VP of Infrastructure",
        "Executive approval received - Coordinating with teams",
    ),
];

/// `(name, lead, members)`.
const TEAMS: [(&str, &str, u32); 4] = [
    ("Engineering", "David Kim", 12),
    ("Customer Success", "Emily Watson", 8),
    ("Finance", "Robert Chen", 4),
    ("Security", "Lisa Park", 6),
];

/// What the engine should surface after a timeline entry fires.
#[derive(Debug, Clone, PartialEq)]
pub struct WarRoomUpdate {
    pub level: ToastLevel,
    pub message: String,
    /// Play the approval chime (subject to the sound preference).
    pub chime: bool,
}

#[derive(Debug)]
pub struct WarRoom {
    open: bool,
    active: bool,
    approvals: Vec<ApprovalView>,
    teams: Vec<TeamView>,
    started_ms: u64,
    decision_time_secs: Option<f64>,
    timers: Vec<TimerId>,
}

impl Default for WarRoom {
    fn default() -> Self {
        Self {
            open: false,
            active: false,
            approvals: APPROVAL_CHAIN
                .iter()
                .enumerate()
                .map(|(i, &(title, approver, role, _))| ApprovalView {
                    level: i as u8 + 1,
                    title: title.to_string(),
                    approver: approver.to_string(),
                    role: role.to_string(),
                    status: ApprovalStatus::Pending,
                })
                .collect(),
            teams: TEAMS
                .iter()
                .map(|&(name, lead, members)| TeamView {
                    name: name.to_string(),
                    lead: lead.to_string(),
                    members,
                    status: TeamStatus::Standby,
                })
                .collect(),
            started_ms: 0,
            decision_time_secs: None,
            timers: Vec::new(),
        }
    }
}

impl WarRoom {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Timeline entries still armed.
    pub fn is_pending(&self, timers: &Scheduler<TimerKey>) -> bool {
        self.timers.iter().any(|id| timers.is_armed(*id))
    }

    /// Open the war room and arm the whole timeline.
    pub fn initiate(&mut self, now_ms: u64, timers: &mut Scheduler<TimerKey>) -> HeliosResult<()> {
        if self.active || self.is_pending(timers) {
            return Err(HeliosError::WarRoomAlreadyActive);
        }
        *self = Self::default();
        self.open = true;
        self.started_ms = now_ms;

        for (i, offset) in WAR_ROOM_APPROVAL_OFFSETS_MS.iter().enumerate() {
            let key = TimerKey::WarRoom(WarRoomStage::Approval(i));
            self.timers.push(timers.schedule_after(now_ms, *offset, key));
        }
        let last = WAR_ROOM_APPROVAL_OFFSETS_MS[WAR_ROOM_APPROVAL_OFFSETS_MS.len() - 1];
        self.timers.push(timers.schedule_after(
            now_ms,
            last + WAR_ROOM_TEAM_ACTIVATION_DELAY_MS,
            TimerKey::WarRoom(WarRoomStage::TeamsActive),
        ));
        tracing::info!("war room initiated");
        Ok(())
    }

    /// Close the dialog and disarm anything left on the timeline.
    ///
    /// An unfinished chain is discarded so it can be started again.
    pub fn close(&mut self, timers: &mut Scheduler<TimerKey>) {
        let mut disarmed = 0;
        for id in self.timers.drain(..) {
            if timers.cancel(id).is_some() {
                disarmed += 1;
            }
        }
        if self.active {
            self.open = false;
        } else {
            *self = Self::default();
        }
        tracing::debug!(disarmed, "war room closed");
    }

    pub fn on_timer(&mut self, stage: WarRoomStage, now_ms: u64) -> Option<WarRoomUpdate> {
        match stage {
            WarRoomStage::Approval(index) => {
                let &(_, _, _, message) = APPROVAL_CHAIN.get(index)?;
                for approval in self.approvals.iter_mut().take(index + 1) {
                    approval.status = ApprovalStatus::Approved;
                }
                Some(WarRoomUpdate {
                    level: ToastLevel::Info,
                    message: message.to_string(),
                    chime: true,
                })
            }
            WarRoomStage::TeamsActive => {
                for team in &mut self.teams {
                    team.status = TeamStatus::Active;
                }
                self.active = true;
                self.timers.clear();
                let elapsed = now_ms.saturating_sub(self.started_ms) as f64 / 1000.0;
                self.decision_time_secs = Some(elapsed);
                tracing::info!(decision_time_secs = elapsed, "war room active");
                Some(WarRoomUpdate {
                    level: ToastLevel::Success,
                    message: format!(
                        "War Room activated! Decision time: {elapsed:.1}s ({WAR_ROOM_SPEEDUP_PERCENT}% faster than manual process)"
                    ),
                    chime: false,
                })
            }
        }
    }

    pub fn view(&self) -> WarRoomView {
        WarRoomView {
            open: self.open,
            active: self.active,
            approvals: self.approvals.clone(),
            teams: self.teams.clone(),
            decision_time_secs: self.decision_time_secs,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fire(room: &mut WarRoom, timers: &mut Scheduler<TimerKey>, until: u64) -> Vec<WarRoomUpdate> {
        let mut out = Vec::new();
        while let Some((due, _, key)) = timers.pop_due(until) {
            if let TimerKey::WarRoom(stage) = key {
                out.extend(room.on_timer(stage, due));
            }
        }
        out
    }

    fn approved(room: &WarRoom) -> usize {
        room.view()
            .approvals
            .iter()
            .filter(|a| a.status == ApprovalStatus::Approved)
            .count()
    }

    #[test]
    fn timeline_flips_in_order() {
        let mut timers = Scheduler::new();
        let mut room = WarRoom::new();
        room.initiate(0, &mut timers).unwrap();
        assert_eq!(timers.pending(), 4);

        assert!(fire(&mut room, &mut timers, 1_999).is_empty());
        assert_eq!(approved(&room), 0);

        let u = fire(&mut room, &mut timers, 2_000);
        assert_eq!(u[0].message, "Technical lead approval received");
        assert!(u[0].chime);
        assert_eq!(approved(&room), 1);

        fire(&mut room, &mut timers, 4_000);
        assert_eq!(approved(&room), 2);
        fire(&mut room, &mut timers, 6_000);
        assert_eq!(approved(&room), 3);
        assert!(!room.is_active());

        let u = fire(&mut room, &mut timers, 7_500);
        assert!(room.is_active());
        assert_eq!(room.view().decision_time_secs, Some(7.5));
        assert!(room
            .view()
            .teams
            .iter()
            .all(|t| t.status == TeamStatus::Active));
        assert_eq!(
            u[0].message,
            "War Room activated! Decision time: 7.5s (75% faster than manual process)"
        );
        assert_eq!(timers.pending(), 0);
    }

    #[test]
    fn initiate_twice_rejected() {
        let mut timers = Scheduler::new();
        let mut room = WarRoom::new();
        room.initiate(0, &mut timers).unwrap();
        assert!(matches!(
            room.initiate(100, &mut timers),
            Err(HeliosError::WarRoomAlreadyActive)
        ));

        fire(&mut room, &mut timers, 10_000);
        assert!(room.initiate(10_000, &mut timers).is_err());
    }

    #[test]
    fn close_before_completion_disarms_everything() {
        let mut timers = Scheduler::new();
        let mut room = WarRoom::new();
        room.initiate(0, &mut timers).unwrap();
        fire(&mut room, &mut timers, 3_000);

        room.close(&mut timers);
        assert_eq!(timers.pending(), 0);
        assert!(!room.view().open);
        assert_eq!(approved(&room), 0);

        // Can be started again afterwards.
        room.initiate(5_000, &mut timers).unwrap();
        assert_eq!(timers.next_due(), Some(7_000));
    }

    #[test]
    fn close_after_activation_keeps_result() {
        let mut timers = Scheduler::new();
        let mut room = WarRoom::new();
        room.initiate(0, &mut timers).unwrap();
        fire(&mut room, &mut timers, 8_000);
        room.close(&mut timers);
        assert!(room.is_active());
        assert!(!room.view().open);
    }
}
