//! Error type shared by the engine, store and runtime.

use crate::enums::{StrategyId, UserRole};

#[derive(Debug, thiserror::Error)]
pub enum HeliosError {
    #[error("a scenario is already running")]
    PlayerBusy,

    #[error("no scenario is running")]
    NotRunning,

    #[error("select at least one strategy before simulating")]
    EmptySelection,

    #[error("strategy is not selected: {0:?}")]
    StrategyNotSelected(StrategyId),

    #[error("{} is not allowed to command incidents", .role.display_name())]
    Forbidden { role: UserRole },

    #[error("war room is already active")]
    WarRoomAlreadyActive,

    #[error("execution is already in progress")]
    ExecutionBusy,

    #[error("run a strategy simulation before executing")]
    NoSimulationResult,

    #[error("cart is empty")]
    EmptyCart,

    #[error("invalid transition: {0}")]
    InvalidTransition(String),

    #[error("storage error: {0}")]
    Storage(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type HeliosResult<T> = Result<T, HeliosError>;
