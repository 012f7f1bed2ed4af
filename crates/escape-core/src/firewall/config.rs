use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Closed temperature interval.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Band {
    pub low: f64,
    pub high: f64,
}

impl Band {
    pub const fn new(low: f64, high: f64) -> Self {
        Self { low, high }
    }

    pub fn contains(&self, value: f64) -> bool {
        value >= self.low && value <= self.high
    }

    pub fn midpoint(&self) -> f64 {
        (self.low + self.high) / 2.0
    }

    fn validate(&self, name: &str) -> Result<(), ValidationError> {
        if !self.low.is_finite() || !self.high.is_finite() || self.low > self.high {
            return Err(ValidationError::InvertedBand {
                name: name.into(),
                low: self.low,
                high: self.high,
            });
        }
        Ok(())
    }
}

/// Tuning for the firewall simulation.
///
/// Rates are in degrees per second. `drift_rate_per_sec` is signed: a
/// positive value heats the core toward `safe_band.high`, a negative one
/// cools it toward `safe_band.low`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FirewallConfig {
    #[serde(default = "default_start_temp")]
    pub start_temp: f64,
    #[serde(default = "default_drift_rate")]
    pub drift_rate_per_sec: f64,
    #[serde(default = "default_cooling_rate")]
    pub cooling_rate_per_sec: f64,
    #[serde(default = "default_stability_threshold_ms")]
    pub stability_threshold_ms: u64,
    /// Leaving this band fails the attempt.
    #[serde(default = "default_safe_band")]
    pub safe_band: Band,
    /// Staying in this band accumulates stability.
    #[serde(default = "default_target_band")]
    pub target_band: Band,
}

fn default_start_temp() -> f64 {
    60.0
}
fn default_safe_band() -> Band {
    Band::new(20.0, 100.0)
}
fn default_target_band() -> Band {
    Band::new(45.0, 55.0)
}
fn default_drift_rate() -> f64 {
    4.0
}
fn default_cooling_rate() -> f64 {
    10.0
}
fn default_stability_threshold_ms() -> u64 {
    3000
}

impl Default for FirewallConfig {
    fn default() -> Self {
        Self {
            start_temp: default_start_temp(),
            drift_rate_per_sec: default_drift_rate(),
            cooling_rate_per_sec: default_cooling_rate(),
            stability_threshold_ms: default_stability_threshold_ms(),
            safe_band: default_safe_band(),
            target_band: default_target_band(),
        }
    }
}

impl FirewallConfig {
    /// # Errors
    ///
    /// Rejects inverted or non-finite bands, a target band not nested in
    /// the safe band, a start temperature outside the safe band, negative
    /// or non-finite cooling, and a zero stability threshold.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.safe_band.validate("safe_band")?;
        self.target_band.validate("target_band")?;
        if !self.safe_band.contains(self.target_band.low)
            || !self.safe_band.contains(self.target_band.high)
        {
            return Err(invalid("target_band", "must lie inside safe_band"));
        }
        if !self.safe_band.contains(self.start_temp) {
            return Err(invalid("start_temp", "must lie inside safe_band"));
        }
        if !self.drift_rate_per_sec.is_finite() {
            return Err(invalid("drift_rate_per_sec", "must be finite"));
        }
        if !self.cooling_rate_per_sec.is_finite() || self.cooling_rate_per_sec < 0.0 {
            return Err(invalid("cooling_rate_per_sec", "must be a non-negative number"));
        }
        if self.stability_threshold_ms == 0 {
            return Err(invalid("stability_threshold_ms", "must be greater than zero"));
        }
        Ok(())
    }
}

fn invalid(field: &str, message: &str) -> ValidationError {
    ValidationError::InvalidValue {
        field: field.into(),
        message: message.into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        assert_eq!(FirewallConfig::default().validate(), Ok(()));
    }

    #[test]
    fn rejects_inverted_band() {
        let cfg = FirewallConfig {
            target_band: Band::new(55.0, 45.0),
            ..FirewallConfig::default()
        };
        assert!(matches!(
            cfg.validate(),
            Err(ValidationError::InvertedBand { ref name, .. }) if name == "target_band"
        ));
    }

    #[test]
    fn rejects_target_outside_safe_band() {
        let cfg = FirewallConfig {
            target_band: Band::new(90.0, 110.0),
            ..FirewallConfig::default()
        };
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn rejects_zero_threshold() {
        let cfg = FirewallConfig {
            stability_threshold_ms: 0,
            ..FirewallConfig::default()
        };
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn band_edges_are_inclusive() {
        let band = Band::new(45.0, 55.0);
        assert!(band.contains(45.0));
        assert!(band.contains(55.0));
        assert!(!band.contains(55.01));
        assert_eq!(band.midpoint(), 50.0);
    }
}
