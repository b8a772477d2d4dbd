//! Core types and definitions for the HELIOS war-room engine.
//!
//! This crate defines the vocabulary shared across all other crates:
//! commands, snapshots, events, constants and the error type.
//! It has no dependency on Tauri or any runtime framework.

pub mod commands;
pub mod constants;
pub mod enums;
pub mod error;
pub mod events;
pub mod state;
pub mod types;

pub use error::{HeliosError, HeliosResult};

#[cfg(test)]
mod tests;
