//! Composer configuration parsed from environment variables.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use serde::{Deserialize, Serialize};

pub const MEASUREMENT_SYSTEM_VAR: &str = "TRIPS_MEASUREMENT_SYSTEM";
pub const EDIT_SPLIT_VAR: &str = "TRIPS_EDIT_SPLIT";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("unknown TRIPS_MEASUREMENT_SYSTEM: {0} (expected 'imperial' or 'metric')")]
    MeasurementSystem(String),
    #[error("invalid boolean for {var}: {value}")]
    InvalidBool { var: &'static str, value: String },
}

/// Unit system used for load dimensions in user-visible strings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MeasurementSystem {
    #[default]
    Imperial,
    Metric,
}

impl MeasurementSystem {
    /// Translation namespace holding this system's unit strings.
    #[must_use]
    pub fn namespace(self) -> &'static str {
        match self {
            Self::Imperial => "imperial",
            Self::Metric => "metric",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComposerConfig {
    pub measurement: MeasurementSystem,
    /// When false, splitting is refused even in edit mode.
    pub split_enabled: bool,
}

impl Default for ComposerConfig {
    fn default() -> Self {
        Self { measurement: MeasurementSystem::Imperial, split_enabled: true }
    }
}

impl ComposerConfig {
    /// Build config from environment variables.
    ///
    /// Optional:
    /// - `TRIPS_MEASUREMENT_SYSTEM`: `imperial` (default) or `metric`
    /// - `TRIPS_EDIT_SPLIT`: `true` (default) or `false`
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when a variable is set to an unrecognized value.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(env_var)
    }

    /// Build config from an arbitrary key lookup.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when a value is unrecognized.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let measurement = parse_measurement(lookup(MEASUREMENT_SYSTEM_VAR).as_deref())?;
        let split_enabled = parse_bool(EDIT_SPLIT_VAR, lookup(EDIT_SPLIT_VAR).as_deref(), true)?;
        Ok(Self { measurement, split_enabled })
    }
}

fn env_var(key: &str) -> Option<String> {
    match std::env::var(key) {
        Ok(value) => Some(value),
        Err(_) => None,
    }
}

fn parse_measurement(raw: Option<&str>) -> Result<MeasurementSystem, ConfigError> {
    match raw.map(str::trim).unwrap_or("imperial") {
        "imperial" | "" => Ok(MeasurementSystem::Imperial),
        "metric" => Ok(MeasurementSystem::Metric),
        other => Err(ConfigError::MeasurementSystem(other.to_string())),
    }
}

fn parse_bool(var: &'static str, raw: Option<&str>, default: bool) -> Result<bool, ConfigError> {
    let Some(raw) = raw.map(str::trim) else {
        return Ok(default);
    };
    match raw.to_ascii_lowercase().as_str() {
        "" => Ok(default),
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::InvalidBool { var, value: raw.to_string() }),
    }
}
