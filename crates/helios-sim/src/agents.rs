//! Execution agent driver.
//!
//! Walks a fixed task list strictly in order. Each task belongs to one of
//! five agents and advances in equal increments, one per timer. An agent
//! goes `Active` at its first task and `Completed` after its last; only
//! the agent working the current task carries a `current_task`.

use helios_core::constants::{AGENT_INCREMENTS_PER_TASK, AGENT_INCREMENT_DELAY_MS};
use helios_core::enums::AgentStatus;
use helios_core::state::{ExecutionView, ImpactMetrics};
use helios_core::types::ExecutionAgent;
use helios_core::{HeliosError, HeliosResult};

use crate::timers::{Scheduler, TimerId, TimerKey};

pub const AGENT_NAMES: [&str; 5] = [
    "Threat Analyzer",
    "Network Isolator",
    "Traffic Router",
    "Backup Orchestrator",
    "Compliance Monitor",
];

/// `(agent index, task description)` in execution order.
pub const TASKS: [(usize, &str); 8] = [
    (0, "Correlating threat indicators"),
    (1, "Isolating compromised segment"),
    (0, "Mapping lateral movement"),
    (2, "Rerouting traffic to healthy nodes"),
    (3, "Verifying backup integrity"),
    (1, "Applying firewall rules"),
    (3, "Restoring affected services"),
    (4, "Generating compliance report"),
];

/// Figures shown once the plan has executed.
pub fn impact_metrics() -> ImpactMetrics {
    ImpactMetrics {
        threats_neutralized: 47,
        systems_restored: 12,
        downtime_avoided: "3.2 hours".to_string(),
        cost_savings: "$2.4M".to_string(),
    }
}

fn tasks_for(agent: usize) -> u32 {
    TASKS.iter().filter(|(a, _)| *a == agent).count() as u32
}

#[derive(Debug)]
pub struct ExecutionDriver {
    agents: Vec<ExecutionAgent>,
    /// Tasks finished per agent.
    agent_tasks_done: Vec<u32>,
    task_index: usize,
    task_increments: u32,
    increments_done: u32,
    running: bool,
    timer: Option<TimerId>,
    impact: Option<ImpactMetrics>,
}

impl Default for ExecutionDriver {
    fn default() -> Self {
        Self {
            agents: AGENT_NAMES.iter().map(|n| ExecutionAgent::new(*n)).collect(),
            agent_tasks_done: vec![0; AGENT_NAMES.len()],
            task_index: 0,
            task_increments: 0,
            increments_done: 0,
            running: false,
            timer: None,
            impact: None,
        }
    }
}

impl ExecutionDriver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn agents(&self) -> &[ExecutionAgent] {
        &self.agents
    }

    pub fn impact(&self) -> Option<&ImpactMetrics> {
        self.impact.as_ref()
    }

    fn total_increments() -> u32 {
        TASKS.len() as u32 * AGENT_INCREMENTS_PER_TASK
    }

    /// Overall progress, 0-100. Exactly 100 only after the final increment.
    pub fn progress(&self) -> f64 {
        if self.increments_done >= Self::total_increments() {
            return 100.0;
        }
        self.increments_done as f64 * 100.0 / Self::total_increments() as f64
    }

    pub fn tasks_done(&self) -> u32 {
        self.increments_done / AGENT_INCREMENTS_PER_TASK
    }

    pub fn start(&mut self, now_ms: u64, timers: &mut Scheduler<TimerKey>) -> HeliosResult<()> {
        if self.running {
            return Err(HeliosError::ExecutionBusy);
        }
        *self = Self::default();
        self.running = true;
        tracing::info!(tasks = TASKS.len(), "execution started");
        self.begin_task(now_ms, timers);
        Ok(())
    }

    /// Stop mid-run. Progress made so far stays visible.
    pub fn cancel(&mut self, timers: &mut Scheduler<TimerKey>) {
        if let Some(id) = self.timer.take() {
            timers.cancel(id);
        }
        if self.running {
            tracing::info!(progress = self.progress(), "execution cancelled");
        }
        self.running = false;
    }

    /// Apply one progress increment. Returns `true` when the last task finishes.
    pub fn on_timer(&mut self, now_ms: u64, timers: &mut Scheduler<TimerKey>) -> bool {
        self.timer = None;
        if !self.running {
            return false;
        }
        let Some(&(agent_idx, task)) = TASKS.get(self.task_index) else {
            return false;
        };

        self.task_increments += 1;
        self.increments_done += 1;

        let per_agent = tasks_for(agent_idx) * AGENT_INCREMENTS_PER_TASK;
        let agent_increments =
            self.agent_tasks_done[agent_idx] * AGENT_INCREMENTS_PER_TASK + self.task_increments;
        let agent = &mut self.agents[agent_idx];
        agent.progress = agent_increments as f64 * 100.0 / per_agent as f64;

        if self.task_increments < AGENT_INCREMENTS_PER_TASK {
            self.arm(now_ms, timers);
            return false;
        }

        // Task finished.
        self.agent_tasks_done[agent_idx] += 1;
        agent.current_task = None;
        if self.agent_tasks_done[agent_idx] == tasks_for(agent_idx) {
            agent.status = AgentStatus::Completed;
            agent.progress = 100.0;
        }
        tracing::debug!(agent = %agent.name, task, "task finished");

        self.task_index += 1;
        self.task_increments = 0;
        if self.task_index < TASKS.len() {
            self.begin_task(now_ms, timers);
            return false;
        }

        self.running = false;
        self.impact = Some(impact_metrics());
        tracing::info!("execution completed");
        true
    }

    pub fn view(&self) -> ExecutionView {
        ExecutionView {
            running: self.running,
            agents: self.agents.clone(),
            progress: self.progress(),
            tasks_done: self.tasks_done(),
            tasks_total: TASKS.len() as u32,
            impact: self.impact.clone(),
        }
    }

    fn begin_task(&mut self, now_ms: u64, timers: &mut Scheduler<TimerKey>) {
        let Some(&(agent_idx, task)) = TASKS.get(self.task_index) else {
            return;
        };
        let agent = &mut self.agents[agent_idx];
        agent.status = AgentStatus::Active;
        agent.current_task = Some(task.to_string());
        self.arm(now_ms, timers);
    }

    fn arm(&mut self, now_ms: u64, timers: &mut Scheduler<TimerKey>) {
        self.timer =
            Some(timers.schedule_after(now_ms, AGENT_INCREMENT_DELAY_MS, TimerKey::AgentIncrement));
    }
}
