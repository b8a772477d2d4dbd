//! Preference persistence for HELIOS.
//!
//! Stands in for browser local storage: one JSON record per key.

pub mod preferences;

pub use preferences::{FilePreferenceStore, MemoryPreferenceStore, PreferenceStore};
