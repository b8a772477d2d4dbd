//! Staged scenario player.
//!
//! States: `Idle -> Running -> (Paused <-> Running)* -> Completed`.
//! Exactly one step is running at a time and only one player timer is
//! ever armed, so step N never starts before step N-1 has completed.
//! Pausing cancels the running step's timer and keeps its remaining time;
//! resuming re-arms it.

use helios_core::enums::{PlayerPhase, ScenarioKind, StepStatus};
use helios_core::state::PlayerView;
use helios_core::types::ScenarioStep;
use helios_core::{HeliosError, HeliosResult};

use crate::scenario::ScenarioDefinition;
use crate::timers::{Scheduler, TimerId, TimerKey};

/// A finished run handed to whoever consumes its outcome.
#[derive(Debug, Clone)]
pub struct CompletedRun {
    pub kind: ScenarioKind,
    pub name: String,
    pub steps: Vec<ScenarioStep>,
}

#[derive(Debug, Clone)]
struct ScenarioRun {
    kind: ScenarioKind,
    name: String,
    steps: Vec<ScenarioStep>,
    current: usize,
}

#[derive(Debug, Default)]
pub struct ScenarioPlayer {
    phase: PlayerPhase,
    run: Option<ScenarioRun>,
    timer: Option<TimerId>,
    step_due_ms: u64,
    /// Remaining time of the running step while paused.
    paused_remaining_ms: u64,
}

impl ScenarioPlayer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> PlayerPhase {
        self.phase
    }

    /// Whether a run is in flight (running or paused).
    pub fn is_busy(&self) -> bool {
        matches!(self.phase, PlayerPhase::Running | PlayerPhase::Paused)
    }

    pub fn kind(&self) -> Option<ScenarioKind> {
        self.run.as_ref().map(|r| r.kind)
    }

    pub fn steps(&self) -> &[ScenarioStep] {
        self.run.as_ref().map(|r| r.steps.as_slice()).unwrap_or(&[])
    }

    /// Start a run. Rejected while another run is in flight.
    pub fn start(
        &mut self,
        definition: &ScenarioDefinition,
        now_ms: u64,
        timers: &mut Scheduler<TimerKey>,
    ) -> HeliosResult<()> {
        if self.is_busy() {
            return Err(HeliosError::PlayerBusy);
        }

        self.run = Some(ScenarioRun {
            kind: definition.kind,
            name: definition.name.clone(),
            steps: definition.instantiate(),
            current: 0,
        });
        self.phase = PlayerPhase::Running;
        tracing::info!(scenario = %definition.name, steps = definition.len(), "scenario started");

        if definition.is_empty() {
            // Nothing to play; complete on the next timer pass.
            self.step_due_ms = now_ms;
            self.timer = Some(timers.schedule_at(now_ms, TimerKey::PlayerStep));
        } else {
            self.begin_step(now_ms, timers);
        }
        Ok(())
    }

    /// Flip the pause flag. Returns `true` if the player is now paused.
    pub fn toggle_pause(
        &mut self,
        now_ms: u64,
        timers: &mut Scheduler<TimerKey>,
    ) -> HeliosResult<bool> {
        match self.phase {
            PlayerPhase::Running => {
                if let Some(id) = self.timer.take() {
                    timers.cancel(id);
                }
                self.paused_remaining_ms = self.step_due_ms.saturating_sub(now_ms);
                self.phase = PlayerPhase::Paused;
                tracing::debug!(remaining_ms = self.paused_remaining_ms, "scenario paused");
                Ok(true)
            }
            PlayerPhase::Paused => {
                self.step_due_ms = now_ms + self.paused_remaining_ms;
                self.timer = Some(timers.schedule_at(self.step_due_ms, TimerKey::PlayerStep));
                self.paused_remaining_ms = 0;
                self.phase = PlayerPhase::Running;
                tracing::debug!("scenario resumed");
                Ok(false)
            }
            PlayerPhase::Idle | PlayerPhase::Completed => Err(HeliosError::NotRunning),
        }
    }

    /// Abandon the current run and discard its steps.
    pub fn cancel(&mut self, timers: &mut Scheduler<TimerKey>) -> HeliosResult<()> {
        if !self.is_busy() {
            return Err(HeliosError::NotRunning);
        }
        if let Some(id) = self.timer.take() {
            timers.cancel(id);
        }
        if let Some(run) = self.run.take() {
            tracing::info!(scenario = %run.name, "scenario cancelled");
        }
        self.phase = PlayerPhase::Idle;
        self.paused_remaining_ms = 0;
        Ok(())
    }

    /// Handle the player's step timer. Returns the run once its last step completes.
    pub fn on_timer(
        &mut self,
        now_ms: u64,
        timers: &mut Scheduler<TimerKey>,
    ) -> Option<CompletedRun> {
        self.timer = None;
        if self.phase != PlayerPhase::Running {
            return None;
        }
        let run = self.run.as_mut()?;

        if let Some(step) = run.steps.get_mut(run.current) {
            step.status = StepStatus::Completed;
            run.current += 1;
        }

        if run.current < run.steps.len() {
            self.begin_step(now_ms, timers);
            return None;
        }

        self.phase = PlayerPhase::Completed;
        tracing::info!(scenario = %run.name, "scenario completed");
        Some(CompletedRun {
            kind: run.kind,
            name: run.name.clone(),
            steps: run.steps.clone(),
        })
    }

    pub fn view(&self) -> PlayerView {
        PlayerView {
            phase: self.phase,
            scenario: self.kind(),
            scenario_name: self.run.as_ref().map(|r| r.name.clone()),
            steps: self.steps().to_vec(),
        }
    }

    fn begin_step(&mut self, now_ms: u64, timers: &mut Scheduler<TimerKey>) {
        let Some(run) = self.run.as_mut() else {
            return;
        };
        let Some(step) = run.steps.get_mut(run.current) else {
            return;
        };
        step.status = StepStatus::Running;
        self.step_due_ms = now_ms + step.duration_ms;
        self.timer = Some(timers.schedule_at(self.step_due_ms, TimerKey::PlayerStep));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn three_steps() -> ScenarioDefinition {
        ScenarioDefinition::new(
            ScenarioKind::StrategySimulation,
            "test",
            vec![("a", 100), ("b", 200), ("c", 300)],
        )
    }

    /// Fire player timers up to `until_ms`, returning the completion if any.
    fn drive(
        player: &mut ScenarioPlayer,
        timers: &mut Scheduler<TimerKey>,
        until_ms: u64,
    ) -> Option<CompletedRun> {
        let mut done = None;
        while let Some((due, _, key)) = timers.pop_due(until_ms) {
            assert_eq!(key, TimerKey::PlayerStep);
            if let Some(run) = player.on_timer(due, timers) {
                done = Some(run);
            }
        }
        done
    }

    fn statuses(player: &ScenarioPlayer) -> Vec<StepStatus> {
        player.steps().iter().map(|s| s.status).collect()
    }

    #[test]
    fn runs_all_steps_in_order() {
        let mut timers = Scheduler::new();
        let mut player = ScenarioPlayer::new();
        player.start(&three_steps(), 0, &mut timers).unwrap();
        assert_eq!(
            statuses(&player),
            vec![StepStatus::Running, StepStatus::Pending, StepStatus::Pending]
        );

        assert!(drive(&mut player, &mut timers, 150).is_none());
        assert_eq!(
            statuses(&player),
            vec![StepStatus::Completed, StepStatus::Running, StepStatus::Pending]
        );

        let done = drive(&mut player, &mut timers, 600).expect("run should complete at 600ms");
        assert_eq!(done.steps.len(), 3);
        assert!(done.steps.iter().all(|s| s.status == StepStatus::Completed));
        assert_eq!(player.phase(), PlayerPhase::Completed);
        assert_eq!(timers.pending(), 0);
    }

    #[test]
    fn start_rejected_while_busy() {
        let mut timers = Scheduler::new();
        let mut player = ScenarioPlayer::new();
        player.start(&three_steps(), 0, &mut timers).unwrap();
        assert!(matches!(
            player.start(&three_steps(), 10, &mut timers),
            Err(HeliosError::PlayerBusy)
        ));

        player.toggle_pause(20, &mut timers).unwrap();
        assert!(matches!(
            player.start(&three_steps(), 30, &mut timers),
            Err(HeliosError::PlayerBusy)
        ));
    }

    #[test]
    fn restart_allowed_after_completion() {
        let mut timers = Scheduler::new();
        let mut player = ScenarioPlayer::new();
        player.start(&three_steps(), 0, &mut timers).unwrap();
        drive(&mut player, &mut timers, 600).unwrap();

        player.start(&three_steps(), 700, &mut timers).unwrap();
        assert_eq!(player.phase(), PlayerPhase::Running);
        assert_eq!(statuses(&player)[0], StepStatus::Running);
    }

    #[test]
    fn pause_freezes_running_step() {
        let mut timers = Scheduler::new();
        let mut player = ScenarioPlayer::new();
        player.start(&three_steps(), 0, &mut timers).unwrap();

        // Pause 60ms into the 100ms first step.
        assert!(player.toggle_pause(60, &mut timers).unwrap());
        assert_eq!(timers.pending(), 0);
        assert!(drive(&mut player, &mut timers, 10_000).is_none());
        assert_eq!(statuses(&player)[0], StepStatus::Running);

        // Resume at 5000ms: 40ms left on step one.
        assert!(!player.toggle_pause(5_000, &mut timers).unwrap());
        assert_eq!(timers.next_due(), Some(5_040));
        let done = drive(&mut player, &mut timers, 5_040 + 500).unwrap();
        assert_eq!(done.steps.len(), 3);
    }

    #[test]
    fn toggle_pause_requires_run() {
        let mut timers = Scheduler::new();
        let mut player = ScenarioPlayer::new();
        assert!(matches!(
            player.toggle_pause(0, &mut timers),
            Err(HeliosError::NotRunning)
        ));
    }

    #[test]
    fn cancel_discards_run_and_timer() {
        let mut timers = Scheduler::new();
        let mut player = ScenarioPlayer::new();
        player.start(&three_steps(), 0, &mut timers).unwrap();
        player.cancel(&mut timers).unwrap();

        assert_eq!(player.phase(), PlayerPhase::Idle);
        assert!(player.steps().is_empty());
        assert_eq!(timers.pending(), 0);
        assert!(player.cancel(&mut timers).is_err());
    }

    #[test]
    fn empty_scenario_completes_immediately() {
        let mut timers = Scheduler::new();
        let mut player = ScenarioPlayer::new();
        let empty = ScenarioDefinition::new(ScenarioKind::StrategySimulation, "empty", vec![]);
        player.start(&empty, 0, &mut timers).unwrap();
        let done = drive(&mut player, &mut timers, 0).unwrap();
        assert!(done.steps.is_empty());
    }
}
