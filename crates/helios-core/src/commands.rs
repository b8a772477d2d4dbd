//! Operator commands sent from the frontend to the engine.
//!
//! Commands are queued and processed at the start of the next engine advance.

use serde::{Deserialize, Serialize};

use crate::enums::*;
use crate::types::PreferencesPatch;

/// All possible operator actions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum OperatorCommand {
    // --- Roles ---
    /// Switch the active role. Verification is reset.
    SwitchRole { role: UserRole },
    /// Mark the current role as verified.
    VerifyRole,
    /// Authenticate into IRC leader mode from the critical alert prompt.
    AuthenticateIrcLeader { name: Option<String> },

    // --- Incident simulation ---
    /// Play one of the incident simulation scenarios step by step.
    RunSimulation { scenario: IncidentScenarioId },
    /// Pause or resume the running scenario.
    TogglePause,
    /// Abandon the running scenario.
    CancelScenario,

    // --- Strategies ---
    SelectStrategy { strategy: StrategyId },
    DeselectStrategy { strategy: StrategyId },
    /// Simulate the selected strategies; the result is synthesized on completion.
    SimulateStrategies,
    /// Run the execution agents against the simulated plan.
    ExecutePlan,

    // --- War room ---
    InitiateWarRoom,
    /// Close the war-room dialog, cancelling anything still scheduled.
    CloseWarRoom,

    // --- Incident actions ---
    TakeAction { action: String },
    TriggerWorkflow,

    // --- Dashboard feed ---
    DismissCriticalAlert,

    // --- Notifications ---
    MarkNotificationRead { id: String },
    MarkAllNotificationsRead,
    ClearNotifications,
    UpdatePreferences { patch: PreferencesPatch },

    // --- Grocery demo ---
    UpdateCartQuantity { id: String, quantity: u32 },
    RemoveCartItem { id: String },
    NavigateTo { screen: OrderScreen },
    SelectPayment { method: PaymentMethod },
    SelectDelivery { option: DeliveryOption },
    CompleteOrder,

    // --- Engine control ---
    /// Tear down every running sequence and cancel all timers.
    Reset,
}
