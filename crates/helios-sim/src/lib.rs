//! HELIOS dashboard engine.
//!
//! Owns the virtual clock and the timer queue, drives the scenario player,
//! execution agents and war room, and produces `DashboardSnapshot`s for
//! the frontend.

pub mod agents;
pub mod dashboard;
pub mod engine;
pub mod grocery;
pub mod notifications;
pub mod player;
pub mod roles;
pub mod scenario;
pub mod strategies;
pub mod synthesizer;
pub mod timers;
pub mod war_room;

pub use engine::{DashboardEngine, EngineConfig};
pub use helios_core as core;
