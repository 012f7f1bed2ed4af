//! Tilt classification.
//!
//! ```text
//!              beta < 0
//!                 Up
//!  gamma < 0  Left  Stable  Right  gamma > 0
//!                Down
//!              beta > 0
//! ```
//!
//! Inside the dead-zone on both axes the device counts as `Stable`. When
//! both axes are out of the dead-zone and their magnitudes are within
//! `tie_margin_deg` of each other, the lateral axis (gamma) wins.

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// One reading from the orientation sensor, in degrees. Any axis may be
/// missing on platforms that only report part of the data.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct OrientationData {
    #[serde(default)]
    pub alpha: Option<f64>,
    /// Front-to-back tilt.
    #[serde(default)]
    pub beta: Option<f64>,
    /// Left-to-right tilt.
    #[serde(default)]
    pub gamma: Option<f64>,
    /// Compass heading, when the platform provides one.
    #[serde(default)]
    pub heading: Option<f64>,
}

impl OrientationData {
    /// A reading with only the two tilt axes set.
    pub fn tilt(beta: f64, gamma: f64) -> Self {
        Self {
            beta: Some(beta),
            gamma: Some(gamma),
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
    Stable,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DirectionThresholds {
    /// Tilt at or below this magnitude is neutral.
    #[serde(default = "default_dead_zone")]
    pub dead_zone_deg: f64,
    /// Magnitude difference under which both axes count as comparable.
    #[serde(default = "default_tie_margin")]
    pub tie_margin_deg: f64,
}

fn default_dead_zone() -> f64 {
    10.0
}
fn default_tie_margin() -> f64 {
    5.0
}

impl Default for DirectionThresholds {
    fn default() -> Self {
        Self {
            dead_zone_deg: default_dead_zone(),
            tie_margin_deg: default_tie_margin(),
        }
    }
}

impl DirectionThresholds {
    /// # Errors
    ///
    /// Both thresholds must be finite and non-negative.
    pub fn validate(&self) -> Result<(), ValidationError> {
        for (field, value) in [
            ("dead_zone_deg", self.dead_zone_deg),
            ("tie_margin_deg", self.tie_margin_deg),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(ValidationError::InvalidValue {
                    field: field.into(),
                    message: format!("expected a non-negative angle, got {value}"),
                });
            }
        }
        Ok(())
    }
}

/// Derive the direction of a reading. Missing or non-finite tilt axes
/// classify as `Stable`.
pub fn classify(data: &OrientationData, thresholds: &DirectionThresholds) -> Direction {
    let (Some(beta), Some(gamma)) = (data.beta, data.gamma) else {
        return Direction::Stable;
    };
    if !beta.is_finite() || !gamma.is_finite() {
        return Direction::Stable;
    }

    let beta_mag = beta.abs();
    let gamma_mag = gamma.abs();
    let beta_out = beta_mag > thresholds.dead_zone_deg;
    let gamma_out = gamma_mag > thresholds.dead_zone_deg;

    match (beta_out, gamma_out) {
        (false, false) => Direction::Stable,
        (false, true) => lateral(gamma),
        (true, false) => vertical(beta),
        (true, true) => {
            if gamma_mag + thresholds.tie_margin_deg >= beta_mag {
                lateral(gamma)
            } else {
                vertical(beta)
            }
        }
    }
}

fn lateral(gamma: f64) -> Direction {
    if gamma > 0.0 {
        Direction::Right
    } else {
        Direction::Left
    }
}

fn vertical(beta: f64) -> Direction {
    if beta > 0.0 {
        Direction::Down
    } else {
        Direction::Up
    }
}
