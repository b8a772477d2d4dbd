//! Persistence of the `notificationPreferences` record.
//!
//! The record is a small JSON object. Reads never fail: a missing or
//! malformed record yields the defaults. Writes report their errors.

use std::fs;
use std::path::{Path, PathBuf};

use helios_core::types::NotificationPreferences;
use helios_core::HeliosResult;

/// Storage key of the preferences record.
pub const PREFERENCES_KEY: &str = "notificationPreferences";

/// Somewhere the preferences record can be read from and written to.
pub trait PreferenceStore: Send {
    /// Read the stored preferences, falling back to defaults.
    fn load(&self) -> NotificationPreferences;

    /// Persist the preferences, replacing whatever was stored.
    fn save(&mut self, prefs: &NotificationPreferences) -> HeliosResult<()>;
}

/// Parse a raw stored record. `None` and malformed input both yield defaults.
pub fn parse_record(raw: Option<&str>) -> NotificationPreferences {
    let Some(raw) = raw else {
        return NotificationPreferences::default();
    };
    match serde_json::from_str(raw) {
        Ok(prefs) => prefs,
        Err(e) => {
            tracing::warn!(error = %e, "malformed {PREFERENCES_KEY} record, using defaults");
            NotificationPreferences::default()
        }
    }
}

/// JSON file in a preferences directory, one file per key.
#[derive(Debug, Clone)]
pub struct FilePreferenceStore {
    dir: PathBuf,
}

impl FilePreferenceStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn path(&self) -> PathBuf {
        record_path(&self.dir)
    }
}

fn record_path(dir: &Path) -> PathBuf {
    dir.join(format!("{PREFERENCES_KEY}.json"))
}

impl PreferenceStore for FilePreferenceStore {
    fn load(&self) -> NotificationPreferences {
        let path = self.path();
        match fs::read_to_string(&path) {
            Ok(raw) => parse_record(Some(&raw)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => parse_record(None),
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "failed to read preferences");
                parse_record(None)
            }
        }
    }

    fn save(&mut self, prefs: &NotificationPreferences) -> HeliosResult<()> {
        fs::create_dir_all(&self.dir)?;
        let json = serde_json::to_string_pretty(prefs)?;
        fs::write(self.path(), json)?;
        tracing::debug!(path = %self.path().display(), "preferences saved");
        Ok(())
    }
}

/// In-memory stand-in holding the raw record text, for headless runs and tests.
#[derive(Debug, Clone, Default)]
pub struct MemoryPreferenceStore {
    raw: Option<String>,
}

impl MemoryPreferenceStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from an arbitrary raw record, well-formed or not.
    pub fn with_raw(raw: impl Into<String>) -> Self {
        Self {
            raw: Some(raw.into()),
        }
    }

    pub fn raw(&self) -> Option<&str> {
        self.raw.as_deref()
    }
}

impl PreferenceStore for MemoryPreferenceStore {
    fn load(&self) -> NotificationPreferences {
        parse_record(self.raw.as_deref())
    }

    fn save(&mut self, prefs: &NotificationPreferences) -> HeliosResult<()> {
        self.raw = Some(serde_json::to_string(prefs)?);
        Ok(())
    }
}
