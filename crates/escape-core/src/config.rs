//! TOML game configuration.
//!
//! Every tunable the host may want to change without touching code:
//! - Countdown budget
//! - Firewall simulation bands, rates and stability threshold
//! - Orientation dead-zone and tie margin
//! - Password checksum range
//!
//! Every field has a default, so an empty file is a valid configuration.
//! The core never looks for the file itself; the host passes a path or a
//! string.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, CoreError, Result, ValidationError};
use crate::firewall::FirewallConfig;
use crate::orientation::DirectionThresholds;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClockConfig {
    #[serde(default = "default_budget_secs")]
    pub budget_secs: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PasswordConfig {
    #[serde(default = "default_min_required_sum")]
    pub min_required_sum: u32,
    #[serde(default = "default_max_required_sum")]
    pub max_required_sum: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GameConfig {
    #[serde(default)]
    pub clock: ClockConfig,
    #[serde(default)]
    pub firewall: FirewallConfig,
    #[serde(default)]
    pub orientation: DirectionThresholds,
    #[serde(default)]
    pub password: PasswordConfig,
}

fn default_budget_secs() -> u64 {
    60 * 60
}
fn default_min_required_sum() -> u32 {
    10
}
fn default_max_required_sum() -> u32 {
    40
}

impl Default for ClockConfig {
    fn default() -> Self {
        Self {
            budget_secs: default_budget_secs(),
        }
    }
}

impl Default for PasswordConfig {
    fn default() -> Self {
        Self {
            min_required_sum: default_min_required_sum(),
            max_required_sum: default_max_required_sum(),
        }
    }
}

impl GameConfig {
    /// Parse and validate a TOML document.
    ///
    /// # Errors
    ///
    /// Returns a parse error for malformed TOML and a validation error for
    /// values the puzzles cannot run with.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let cfg: GameConfig = toml::from_str(content).map_err(ConfigError::from)?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Load from `path`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::LoadFailed`] if the file cannot be read, and
    /// the errors of [`GameConfig::from_toml_str`] otherwise.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::LoadFailed {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        let cfg = Self::from_toml_str(&content)?;
        tracing::debug!(path = %path.display(), "game config loaded");
        Ok(cfg)
    }

    /// # Errors
    ///
    /// Returns the first invalid value found.
    pub fn validate(&self) -> std::result::Result<(), ValidationError> {
        if self.clock.budget_secs == 0 {
            return Err(ValidationError::ZeroBudget);
        }
        self.firewall.validate()?;
        self.orientation.validate()?;
        if self.password.min_required_sum > self.password.max_required_sum {
            return Err(ValidationError::InvalidValue {
                field: "password.min_required_sum".into(),
                message: "must not exceed password.max_required_sum".into(),
            });
        }
        Ok(())
    }

    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string_pretty(self)
            .map_err(|e| CoreError::Config(ConfigError::ParseFailed(e.to_string())))
    }

    fn get_json_value_by_path<'a>(
        root: &'a serde_json::Value,
        key: &str,
    ) -> Option<&'a serde_json::Value> {
        if key.is_empty() {
            return None;
        }

        let mut current = root;
        for part in key.split('.') {
            current = current.get(part)?;
        }
        Some(current)
    }

    /// Get a config value as string by dot-separated key.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::UnknownKey`] if nothing lives at `key`.
    pub fn get(&self, key: &str) -> Result<String> {
        let json = serde_json::to_value(self)?;
        let val = Self::get_json_value_by_path(&json, key)
            .ok_or_else(|| ConfigError::UnknownKey(key.to_string()))?;
        Ok(match val {
            serde_json::Value::String(s) => s.clone(),
            other => other.to_string(),
        })
    }
}
