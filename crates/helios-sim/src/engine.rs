//! Dashboard engine: the single owner of every HELIOS sequence.
//!
//! `DashboardEngine` holds a virtual millisecond clock and one timer queue.
//! Each `advance` processes queued operator commands, fires due timers in
//! order, and returns a `DashboardSnapshot`. Completely headless (no Tauri
//! dependency), so every sequence can be tested deterministically.

use std::collections::VecDeque;

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use helios_core::commands::OperatorCommand;
use helios_core::constants::{
    CRITICAL_ALERT_REVEAL_MS, DASHBOARD_REFRESH_MS, MIN_POLLING_INTERVAL_SECS,
};
use helios_core::enums::{IncidentScenarioId, ScenarioKind, ToastLevel};
use helios_core::events::{AudioEvent, Toast};
use helios_core::state::{DashboardSnapshot, IncidentView, SimulationResult};
use helios_core::types::{NotificationPreferences, SimTime};
use helios_core::{HeliosError, HeliosResult};
use helios_store::PreferenceStore;

use crate::agents::ExecutionDriver;
use crate::dashboard::DashboardFeed;
use crate::grocery::GroceryOrder;
use crate::notifications::NotificationFeed;
use crate::player::{CompletedRun, ScenarioPlayer};
use crate::roles::RoleState;
use crate::scenario::{self, build_scenario};
use crate::strategies::{self, StrategySelection};
use crate::synthesizer;
use crate::timers::{Scheduler, TimerId, TimerKey};
use crate::war_room::WarRoom;

/// Configuration for a new engine.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// RNG seed for determinism. Same seed and commands = same snapshots.
    pub seed: u64,
    /// Arm the notification poll, critical-alert reveal and dashboard refresh.
    pub background_feeds: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            background_feeds: true,
        }
    }
}

pub struct DashboardEngine {
    config: EngineConfig,
    time: SimTime,
    timers: Scheduler<TimerKey>,
    rng: ChaCha8Rng,
    command_queue: VecDeque<OperatorCommand>,
    toasts: Vec<Toast>,
    audio_events: Vec<AudioEvent>,

    roles: RoleState,
    player: ScenarioPlayer,

    // Incident detail
    selected_simulation: Option<IncidentScenarioId>,
    actions_taken: Vec<String>,
    workflow_triggered: bool,

    // Strategies
    selection: StrategySelection,
    /// Selection captured when the strategy simulation started.
    simulated_selection: Option<StrategySelection>,
    simulation_result: Option<SimulationResult>,
    execution: ExecutionDriver,
    war_room: WarRoom,

    feed: DashboardFeed,
    notifications: NotificationFeed,
    preferences: NotificationPreferences,
    store: Box<dyn PreferenceStore>,
    grocery: GroceryOrder,

    poll_timer: Option<TimerId>,
    reveal_timer: Option<TimerId>,
    refresh_timer: Option<TimerId>,
}

impl DashboardEngine {
    /// Create an engine, loading notification preferences from `store`.
    pub fn new(config: EngineConfig, store: Box<dyn PreferenceStore>) -> Self {
        let mut rng = ChaCha8Rng::seed_from_u64(config.seed);
        let feed = DashboardFeed::new(&mut rng);
        let mut preferences = store.load();
        preferences.polling_interval = preferences.polling_interval.max(MIN_POLLING_INTERVAL_SECS);

        let mut engine = Self {
            config,
            time: SimTime::default(),
            timers: Scheduler::new(),
            rng,
            command_queue: VecDeque::new(),
            toasts: Vec::new(),
            audio_events: Vec::new(),
            roles: RoleState::new(),
            player: ScenarioPlayer::new(),
            selected_simulation: None,
            actions_taken: Vec::new(),
            workflow_triggered: false,
            selection: StrategySelection::new(),
            simulated_selection: None,
            simulation_result: None,
            execution: ExecutionDriver::new(),
            war_room: WarRoom::new(),
            feed,
            notifications: NotificationFeed::seeded(),
            preferences,
            store,
            grocery: GroceryOrder::new(),
            poll_timer: None,
            reveal_timer: None,
            refresh_timer: None,
        };
        engine.start_background();
        engine
    }

    /// Queue an operator command for processing at the next advance.
    pub fn queue_command(&mut self, command: OperatorCommand) {
        self.command_queue.push_back(command);
    }

    pub fn queue_commands(&mut self, commands: impl IntoIterator<Item = OperatorCommand>) {
        self.command_queue.extend(commands);
    }

    /// Advance engine time by `dt_ms` and return the resulting snapshot.
    pub fn advance(&mut self, dt_ms: u64) -> DashboardSnapshot {
        self.process_commands();

        let target = self.time.now_ms.saturating_add(dt_ms);
        while let Some((due, _, key)) = self.timers.pop_due(target) {
            self.time.now_ms = due.max(self.time.now_ms);
            self.on_timer(key);
        }
        self.time.now_ms = target;

        self.build_snapshot()
    }

    /// Advance exactly to the next armed timer, if there is one.
    pub fn advance_to_next_timer(&mut self) -> Option<DashboardSnapshot> {
        let dt = self.next_due_in()?;
        Some(self.advance(dt))
    }

    /// Apply one command immediately, returning its outcome.
    pub fn apply(&mut self, command: OperatorCommand) -> HeliosResult<()> {
        let now = self.time.now_ms;
        match command {
            // --- Roles ---
            OperatorCommand::SwitchRole { role } => self.roles.switch(role),
            OperatorCommand::VerifyRole => self.roles.verify(),
            OperatorCommand::AuthenticateIrcLeader { name } => {
                self.roles.authenticate_irc_leader(name);
                self.toast(ToastLevel::Success, "IRC leader authenticated");
            }

            // --- Incident simulation ---
            OperatorCommand::RunSimulation { scenario } => {
                self.roles.require_incident_authority()?;
                let definition = build_scenario(ScenarioKind::Incident(scenario));
                self.player.start(&definition, now, &mut self.timers)?;
                self.selected_simulation = Some(scenario);
                self.toast(
                    ToastLevel::Info,
                    format!("Starting simulation: {}", definition.name),
                );
            }
            OperatorCommand::TogglePause => {
                let paused = self.player.toggle_pause(now, &mut self.timers)?;
                let msg = if paused { "Simulation paused" } else { "Simulation resumed" };
                self.toast(ToastLevel::Info, msg);
            }
            OperatorCommand::CancelScenario => {
                let kind = self.player.kind();
                self.player.cancel(&mut self.timers)?;
                if kind == Some(ScenarioKind::StrategySimulation) {
                    self.simulated_selection = None;
                }
                self.toast(ToastLevel::Info, "Simulation cancelled");
            }

            // --- Strategies ---
            OperatorCommand::SelectStrategy { strategy } => self.selection.select(strategy),
            OperatorCommand::DeselectStrategy { strategy } => self.selection.deselect(strategy)?,
            OperatorCommand::SimulateStrategies => {
                self.roles.require_incident_authority()?;
                if self.selection.is_empty() {
                    return Err(HeliosError::EmptySelection);
                }
                let definition = build_scenario(ScenarioKind::StrategySimulation);
                self.player.start(&definition, now, &mut self.timers)?;
                // The plan being executed is superseded by the new simulation.
                self.execution.cancel(&mut self.timers);
                self.simulated_selection = Some(self.selection.clone());
                self.simulation_result = None;
                self.toast(
                    ToastLevel::Info,
                    format!("Simulating {} strategies", self.selection.len()),
                );
            }
            OperatorCommand::ExecutePlan => {
                self.roles.require_incident_authority()?;
                if self.simulation_result.is_none() {
                    return Err(HeliosError::NoSimulationResult);
                }
                self.execution.start(now, &mut self.timers)?;
                self.toast(ToastLevel::Info, "Executing response plan");
            }

            // --- War room ---
            OperatorCommand::InitiateWarRoom => {
                self.roles.require_incident_authority()?;
                self.war_room.initiate(now, &mut self.timers)?;
                self.toast(
                    ToastLevel::Info,
                    "HELIOS initiating War Room - Awaiting 3-level approval chain",
                );
            }
            OperatorCommand::CloseWarRoom => self.war_room.close(&mut self.timers),

            // --- Incident actions ---
            OperatorCommand::TakeAction { action } => {
                if !self.actions_taken.contains(&action) {
                    self.toast(ToastLevel::Success, format!("Action initiated: {action}"));
                    self.actions_taken.push(action);
                }
            }
            OperatorCommand::TriggerWorkflow => {
                if !self.workflow_triggered {
                    self.workflow_triggered = true;
                    self.toast(
                        ToastLevel::Success,
                        "Workflow triggered - Automated response initiated",
                    );
                }
            }

            // --- Dashboard feed ---
            OperatorCommand::DismissCriticalAlert => {
                if self.feed.dismiss_critical_alert(now)? {
                    self.toast(
                        ToastLevel::Info,
                        "Alert Acknowledged: Login to view the Critical alert.",
                    );
                }
            }

            // --- Notifications ---
            OperatorCommand::MarkNotificationRead { id } => {
                if !self.notifications.mark_read(&id) {
                    return Err(HeliosError::InvalidTransition(format!(
                        "no notification {id}"
                    )));
                }
            }
            OperatorCommand::MarkAllNotificationsRead => self.notifications.mark_all_read(),
            OperatorCommand::ClearNotifications => self.notifications.clear(),
            OperatorCommand::UpdatePreferences { patch } => {
                self.preferences.apply(&patch);
                self.preferences.polling_interval = self
                    .preferences
                    .polling_interval
                    .max(MIN_POLLING_INTERVAL_SECS);
                if let Err(e) = self.store.save(&self.preferences) {
                    tracing::warn!(error = %e, "failed to persist preferences");
                    self.toast(ToastLevel::Warning, format!("Preferences not saved: {e}"));
                }
                if self.config.background_feeds {
                    self.arm_poll();
                }
            }

            // --- Grocery demo ---
            OperatorCommand::UpdateCartQuantity { id, quantity } => {
                self.grocery.update_quantity(&id, quantity)?
            }
            OperatorCommand::RemoveCartItem { id } => self.grocery.remove_item(&id)?,
            OperatorCommand::NavigateTo { screen } => self.grocery.navigate(screen)?,
            OperatorCommand::SelectPayment { method } => self.grocery.select_payment(method),
            OperatorCommand::SelectDelivery { option } => self.grocery.select_delivery(option),
            OperatorCommand::CompleteOrder => {
                self.grocery.complete_order(now, &mut self.timers)?;
                self.toast(ToastLevel::Info, "Processing payment...");
            }

            OperatorCommand::Reset => self.reset(),
        }
        Ok(())
    }

    /// Current engine time.
    pub fn time(&self) -> SimTime {
        self.time
    }

    pub fn preferences(&self) -> NotificationPreferences {
        self.preferences
    }

    /// Milliseconds until the next armed timer.
    pub fn next_due_in(&mut self) -> Option<u64> {
        let now = self.time.now_ms;
        self.timers.next_due().map(|due| due.saturating_sub(now))
    }

    /// Number of armed timers.
    pub fn pending_timers(&self) -> usize {
        self.timers.pending()
    }

    // --- Internal ---

    fn process_commands(&mut self) {
        while let Some(command) = self.command_queue.pop_front() {
            tracing::debug!(?command, at_ms = self.time.now_ms, "command");
            let label = format!("{command:?}");
            if let Err(e) = self.apply(command) {
                tracing::warn!(command = %label, error = %e, "command rejected");
                self.toast(ToastLevel::Warning, e.to_string());
            }
        }
    }

    fn on_timer(&mut self, key: TimerKey) {
        let now = self.time.now_ms;
        match key {
            TimerKey::PlayerStep => {
                if let Some(run) = self.player.on_timer(now, &mut self.timers) {
                    self.on_run_completed(run);
                }
            }
            TimerKey::AgentIncrement => {
                if self.execution.on_timer(now, &mut self.timers) {
                    self.toast(ToastLevel::Success, "Response plan executed");
                }
            }
            TimerKey::WarRoom(stage) => {
                if let Some(update) = self.war_room.on_timer(stage, now) {
                    if update.chime && self.preferences.sound_enabled {
                        self.audio_events.push(AudioEvent::HeliosChime);
                    }
                    self.toast(update.level, update.message);
                }
            }
            TimerKey::NotificationPoll => {
                self.poll_timer = None;
                if let Some(n) = self
                    .notifications
                    .poll(now, &self.preferences, &mut self.rng)
                {
                    if self.preferences.sound_enabled {
                        self.audio_events
                            .push(AudioEvent::NotificationPing { kind: n.kind });
                    }
                }
                self.arm_poll();
            }
            TimerKey::CriticalAlertReveal => {
                self.reveal_timer = None;
                if self.feed.reveal_critical_alert() && self.preferences.sound_enabled {
                    self.audio_events.push(AudioEvent::CriticalAlarm);
                }
            }
            TimerKey::DashboardRefresh => {
                self.feed.refresh(&mut self.rng);
                self.refresh_timer = Some(self.timers.schedule_after(
                    now,
                    DASHBOARD_REFRESH_MS,
                    TimerKey::DashboardRefresh,
                ));
            }
            TimerKey::PaymentProcessed => {
                if let Some(number) = self.grocery.on_payment_processed(&mut self.rng) {
                    self.toast(ToastLevel::Success, format!("Order {number} confirmed"));
                    self.start_delivery_tracking();
                }
            }
        }
    }

    fn on_run_completed(&mut self, run: CompletedRun) {
        match run.kind {
            ScenarioKind::Incident(id) => {
                let rate = scenario::incident(id).success_rate;
                self.toast(
                    ToastLevel::Success,
                    format!("Simulation complete: {rate}% success probability"),
                );
            }
            ScenarioKind::StrategySimulation => {
                let selection = self.simulated_selection.take().unwrap_or_default();
                self.simulation_result = synthesizer::synthesize(&selection);
                if let Some(result) = &self.simulation_result {
                    let msg = format!(
                        "Strategy simulation complete: {:.1}% success probability ({} risk)",
                        result.success_probability,
                        result.risk_level.label()
                    );
                    self.toast(ToastLevel::Success, msg);
                }
            }
            ScenarioKind::DeliveryTracking => {
                self.toast(ToastLevel::Success, "Order delivered");
            }
        }
    }

    fn start_delivery_tracking(&mut self) {
        let definition = build_scenario(ScenarioKind::DeliveryTracking);
        if let Err(e) = self.player.start(&definition, self.time.now_ms, &mut self.timers) {
            tracing::warn!(error = %e, "delivery tracking not started");
            self.toast(ToastLevel::Warning, format!("Delivery tracking unavailable: {e}"));
        }
    }

    fn start_background(&mut self) {
        if !self.config.background_feeds {
            return;
        }
        let now = self.time.now_ms;
        self.arm_poll();
        self.reveal_timer = Some(self.timers.schedule_after(
            now,
            CRITICAL_ALERT_REVEAL_MS,
            TimerKey::CriticalAlertReveal,
        ));
        self.refresh_timer = Some(self.timers.schedule_after(
            now,
            DASHBOARD_REFRESH_MS,
            TimerKey::DashboardRefresh,
        ));
    }

    /// (Re)arm the notification poll from the current polling interval.
    fn arm_poll(&mut self) {
        if let Some(id) = self.poll_timer.take() {
            self.timers.cancel(id);
        }
        let interval_ms = u64::from(self.preferences.polling_interval.max(MIN_POLLING_INTERVAL_SECS)) * 1000;
        self.poll_timer = Some(self.timers.schedule_after(
            self.time.now_ms,
            interval_ms,
            TimerKey::NotificationPoll,
        ));
    }

    /// Tear down every sequence. Role, preferences and notifications survive.
    fn reset(&mut self) {
        let dropped = self.timers.pending();
        self.timers.clear();
        self.player = ScenarioPlayer::new();
        self.selected_simulation = None;
        self.actions_taken.clear();
        self.workflow_triggered = false;
        self.selection.clear();
        self.simulated_selection = None;
        self.simulation_result = None;
        self.execution = ExecutionDriver::new();
        self.war_room = WarRoom::new();
        self.feed = DashboardFeed::new(&mut self.rng);
        self.grocery = GroceryOrder::new();
        self.poll_timer = None;
        self.reveal_timer = None;
        self.refresh_timer = None;
        tracing::info!(dropped_timers = dropped, "engine reset");
        self.start_background();
        self.toast(ToastLevel::Info, "Dashboard reset");
    }

    fn toast(&mut self, level: ToastLevel, message: impl Into<String>) {
        self.toasts.push(Toast {
            level,
            message: message.into(),
            at_ms: self.time.now_ms,
        });
    }

    fn incident_view(&self) -> IncidentView {
        let (automated, human) = match self.selected_simulation {
            Some(id) => {
                let s = scenario::incident(id);
                (s.automated_actions, s.human_actions)
            }
            None => (
                scenario::ALERT_DEFAULT_AUTOMATED_ACTIONS,
                scenario::ALERT_DEFAULT_HUMAN_ACTIONS,
            ),
        };
        IncidentView {
            selected_simulation: self.selected_simulation,
            automated_actions: automated.iter().map(|s| s.to_string()).collect(),
            human_actions: human.iter().map(|s| s.to_string()).collect(),
            actions_taken: self.actions_taken.clone(),
            workflow_triggered: self.workflow_triggered,
        }
    }

    fn build_snapshot(&mut self) -> DashboardSnapshot {
        let toasts = std::mem::take(&mut self.toasts);
        let audio_events = std::mem::take(&mut self.audio_events);
        DashboardSnapshot {
            time: self.time,
            role: self.roles.view(),
            player: self.player.view(),
            incident: self.incident_view(),
            strategies: strategies::views(&self.selection),
            simulation_result: self.simulation_result.clone(),
            execution: self.execution.view(),
            war_room: self.war_room.view(),
            feed: self.feed.view(),
            notifications: self.notifications.view(&self.preferences),
            grocery: self.grocery.view(),
            toasts,
            audio_events,
        }
    }
}
