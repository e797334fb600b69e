// File: occurrence-forms/src/config.rs
// Purpose: Form configuration (element ids, time zone, styling)

use crate::error::FormError;
use anyhow::{Context, Result};
use chrono::FixedOffset;
use occurrence_validation_core::{Field, Slot, SystemClock, RECIFE_UTC_OFFSET_MINUTES};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

/// Form configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct FormConfig {
    #[serde(default)]
    pub zone: ZoneConfig,

    /// Element id overrides keyed by field or slot key (e.g. `patient_name`, `name_error`)
    #[serde(default)]
    pub ids: BTreeMap<String, String>,

    #[serde(default)]
    pub page: PageConfig,
}

/// Zone used for every "today" comparison
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ZoneConfig {
    #[serde(default = "default_zone_name")]
    pub name: String,

    #[serde(default = "default_utc_offset_minutes")]
    pub utc_offset_minutes: i32,
}

/// Page-level elements
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PageConfig {
    /// Container of the patient sub-form
    #[serde(default = "default_section")]
    pub section: String,

    #[serde(default = "default_patient_yes")]
    pub patient_yes: String,

    #[serde(default = "default_patient_no")]
    pub patient_no: String,

    /// Form element to gate on submit (empty: no gate)
    #[serde(default)]
    pub form: String,

    #[serde(default = "default_error_color")]
    pub error_color: String,
}

// Default values
fn default_zone_name() -> String {
    "America/Recife".to_string()
}

fn default_utc_offset_minutes() -> i32 {
    RECIFE_UTC_OFFSET_MINUTES
}

fn default_section() -> String {
    "showPatient".to_string()
}

fn default_patient_yes() -> String {
    "patient_yes".to_string()
}

fn default_patient_no() -> String {
    "patient_no".to_string()
}

fn default_error_color() -> String {
    "red".to_string()
}

impl Default for ZoneConfig {
    fn default() -> Self {
        Self {
            name: default_zone_name(),
            utc_offset_minutes: default_utc_offset_minutes(),
        }
    }
}

impl Default for PageConfig {
    fn default() -> Self {
        Self {
            section: default_section(),
            patient_yes: default_patient_yes(),
            patient_no: default_patient_no(),
            form: String::new(),
            error_color: default_error_color(),
        }
    }
}

impl FormConfig {
    /// Load configuration from a TOML file. A missing or empty file yields defaults.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read form config: {:?}", path))?;

        Self::from_toml_str(&content)
            .with_context(|| format!("Failed to load form config: {:?}", path))
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }

        let config: FormConfig = toml::from_str(content).context("Failed to parse form config")?;
        config.validate()?;
        Ok(config)
    }

    /// Reject unknown id keys and out-of-range offsets
    pub fn validate(&self) -> std::result::Result<(), FormError> {
        for key in self.ids.keys() {
            let known = Field::ALL.iter().any(|f| f.key() == key)
                || Slot::ALL.iter().any(|s| s.key() == key);
            if !known {
                return Err(FormError::InvalidConfig(format!("unknown id key `{}`", key)));
            }
        }
        self.offset().map(|_| ())
    }

    pub fn field_id(&self, field: Field) -> &str {
        self.ids
            .get(field.key())
            .map(String::as_str)
            .unwrap_or_else(|| field.default_id())
    }

    pub fn slot_id(&self, slot: Slot) -> &str {
        self.ids
            .get(slot.key())
            .map(String::as_str)
            .unwrap_or_else(|| slot.default_id())
    }

    pub fn offset(&self) -> std::result::Result<FixedOffset, FormError> {
        self.zone
            .utc_offset_minutes
            .checked_mul(60)
            .and_then(FixedOffset::east_opt)
            .ok_or_else(|| {
                FormError::InvalidConfig(format!(
                    "utc_offset_minutes out of range: {}",
                    self.zone.utc_offset_minutes
                ))
            })
    }

    /// System clock in the configured zone
    pub fn clock(&self) -> std::result::Result<SystemClock, FormError> {
        self.offset().map(SystemClock::new)
    }
}
