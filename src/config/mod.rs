use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::{errors::Result, utils::write_atomic};

const DEFAULT_DIR_NAME: &str = ".booking_core";
const CONFIG_FILE: &str = "config.json";

/// Tunables for the booking wizard. Every field falls back to its default when
/// absent from the stored file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WizardConfig {
    /// Local storage key the draft mirror writes under.
    pub storage_key: String,
    /// Checkbox that must be ticked before a booking is submitted.
    pub consent_field: String,
    pub submit_delay_ms: u64,
    pub autosave_debounce_ms: u64,
    /// Earliest bookable date, in days after today.
    pub earliest_booking_days: i64,
    /// Latest bookable date, in months after today.
    pub latest_booking_months: u32,
    /// Validate a field on every edit instead of only on blur.
    pub validate_on_input: bool,
}

impl Default for WizardConfig {
    fn default() -> Self {
        Self {
            storage_key: "ageisBookingData".into(),
            consent_field: "termsAccepted".into(),
            submit_delay_ms: 2000,
            autosave_debounce_ms: 500,
            earliest_booking_days: 1,
            latest_booking_months: 6,
            validate_on_input: false,
        }
    }
}

/// Application data directory, defaulting to `~/.booking_core`.
pub fn app_data_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(DEFAULT_DIR_NAME)
}

pub struct ConfigManager {
    path: PathBuf,
}

impl ConfigManager {
    pub fn new() -> Self {
        Self::with_base_dir(app_data_dir())
    }

    pub fn with_base_dir(base: PathBuf) -> Self {
        Self {
            path: base.join(CONFIG_FILE),
        }
    }

    pub fn load(&self) -> Result<WizardConfig> {
        if self.path.exists() {
            let data = fs::read_to_string(&self.path)?;
            Ok(serde_json::from_str(&data)?)
        } else {
            Ok(WizardConfig::default())
        }
    }

    pub fn save(&self, config: &WizardConfig) -> Result<()> {
        let json = serde_json::to_string_pretty(config)?;
        write_atomic(&self.path, &json)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Default for ConfigManager {
    fn default() -> Self {
        Self::new()
    }
}
