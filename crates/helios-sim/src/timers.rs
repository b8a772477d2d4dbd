//! Cancellable timer queue driving every sequenced transition.
//!
//! Timers fire in due order; timers due at the same instant fire in the
//! order they were scheduled. A cancelled timer never fires.

use std::cmp::Reverse;
use std::collections::{BinaryHeap, HashMap};

use crate::war_room::WarRoomStage;

/// Handle returned by [`Scheduler::schedule_at`], used to cancel the timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerId(u64);

/// What a timer means to the engine when it fires.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerKey {
    /// The scenario player's running step has finished its duration.
    PlayerStep,
    /// The execution driver's next progress increment is due.
    AgentIncrement,
    /// A war-room timeline entry.
    WarRoom(WarRoomStage),
    NotificationPoll,
    CriticalAlertReveal,
    DashboardRefresh,
    PaymentProcessed,
}

#[derive(Debug)]
pub struct Scheduler<K> {
    queue: BinaryHeap<Reverse<(u64, TimerId)>>,
    armed: HashMap<TimerId, K>,
    next_id: u64,
}

impl<K> Default for Scheduler<K> {
    fn default() -> Self {
        Self {
            queue: BinaryHeap::new(),
            armed: HashMap::new(),
            next_id: 0,
        }
    }
}

impl<K> Scheduler<K> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Arm a timer firing at absolute engine time `due_ms`.
    pub fn schedule_at(&mut self, due_ms: u64, key: K) -> TimerId {
        let id = TimerId(self.next_id);
        self.next_id += 1;
        self.queue.push(Reverse((due_ms, id)));
        self.armed.insert(id, key);
        id
    }

    /// Arm a timer firing `delay_ms` after `now_ms`.
    pub fn schedule_after(&mut self, now_ms: u64, delay_ms: u64, key: K) -> TimerId {
        self.schedule_at(now_ms.saturating_add(delay_ms), key)
    }

    /// Disarm a timer. Returns its key if it had not fired yet.
    pub fn cancel(&mut self, id: TimerId) -> Option<K> {
        self.armed.remove(&id)
    }

    pub fn is_armed(&self, id: TimerId) -> bool {
        self.armed.contains_key(&id)
    }

    /// Pop the earliest armed timer due at or before `until_ms`.
    pub fn pop_due(&mut self, until_ms: u64) -> Option<(u64, TimerId, K)> {
        while let Some(&Reverse((due, id))) = self.queue.peek() {
            if due > until_ms {
                return None;
            }
            self.queue.pop();
            if let Some(key) = self.armed.remove(&id) {
                return Some((due, id, key));
            }
        }
        None
    }

    /// Due time of the earliest armed timer.
    pub fn next_due(&mut self) -> Option<u64> {
        while let Some(&Reverse((due, id))) = self.queue.peek() {
            if self.armed.contains_key(&id) {
                return Some(due);
            }
            self.queue.pop();
        }
        None
    }

    /// Number of armed timers.
    pub fn pending(&self) -> usize {
        self.armed.len()
    }

    /// Disarm everything.
    pub fn clear(&mut self) {
        self.queue.clear();
        self.armed.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fires_in_due_order_with_fifo_ties() {
        let mut s = Scheduler::new();
        s.schedule_at(300, "c");
        s.schedule_at(100, "a");
        s.schedule_at(300, "d");
        s.schedule_at(200, "b");

        let fired: Vec<_> = std::iter::from_fn(|| s.pop_due(1_000).map(|(_, _, k)| k)).collect();
        assert_eq!(fired, vec!["a", "b", "c", "d"]);
    }

    #[test]
    fn pop_due_respects_horizon() {
        let mut s = Scheduler::new();
        s.schedule_at(50, 1);
        s.schedule_at(150, 2);

        assert_eq!(s.pop_due(100).map(|(due, _, k)| (due, k)), Some((50, 1)));
        assert!(s.pop_due(100).is_none());
        assert_eq!(s.next_due(), Some(150));
    }

    #[test]
    fn cancelled_timer_never_fires() {
        let mut s = Scheduler::new();
        let a = s.schedule_after(0, 10, "a");
        s.schedule_after(0, 20, "b");

        assert_eq!(s.cancel(a), Some("a"));
        assert_eq!(s.cancel(a), None);
        assert!(!s.is_armed(a));
        assert_eq!(s.next_due(), Some(20));
        assert_eq!(s.pop_due(100).map(|(_, _, k)| k), Some("b"));
        assert_eq!(s.pending(), 0);
    }

    #[test]
    fn clear_disarms_everything() {
        let mut s = Scheduler::new();
        for i in 0..5 {
            s.schedule_at(i * 10, i);
        }
        s.clear();
        assert_eq!(s.pending(), 0);
        assert!(s.next_due().is_none());
        assert!(s.pop_due(u64::MAX).is_none());
    }
}
