//! Firewall calibration puzzle.
//!
//! The core temperature drifts toward the unsafe side on every tick. While
//! the player holds the "blow" action the temperature is pulled back toward
//! the middle of the target band. Staying inside the target band for the
//! full stability threshold, without a single break, wins.
//!
//! ## State Transitions
//!
//! ```text
//! Idle -> Calibrating -> Running -> (Win | Fail)
//!   ^                                   |
//!   +-------------- reset() ------------+
//! ```
//!
//! Operations that do not apply to the current state return `None` and
//! change nothing.

use chrono::Utc;
use serde::{Deserialize, Serialize};

use super::config::FirewallConfig;
use crate::error::ValidationError;
use crate::events::Event;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum FirewallStatus {
    Idle,
    Calibrating,
    Running,
    Win,
    Fail,
}

impl FirewallStatus {
    pub fn is_terminal(self) -> bool {
        matches!(self, FirewallStatus::Win | FirewallStatus::Fail)
    }
}

/// Observable state after every operation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FirewallState {
    pub temp: f64,
    /// Uninterrupted time spent inside the target band, capped at the threshold.
    pub stability_progress_ms: u64,
    pub is_stable: bool,
    pub is_blowing: bool,
    pub status: FirewallStatus,
}

#[derive(Debug, Clone)]
pub struct FirewallPuzzle {
    config: FirewallConfig,
    state: FirewallState,
}

impl Default for FirewallPuzzle {
    fn default() -> Self {
        let config = FirewallConfig::default();
        let state = initial_state(&config);
        Self { config, state }
    }
}

impl FirewallPuzzle {
    /// # Errors
    ///
    /// Returns the first problem found by [`FirewallConfig::validate`].
    pub fn new(config: FirewallConfig) -> Result<Self, ValidationError> {
        config.validate()?;
        let state = initial_state(&config);
        Ok(Self { config, state })
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn state(&self) -> &FirewallState {
        &self.state
    }

    pub fn status(&self) -> FirewallStatus {
        self.state.status
    }

    pub fn config(&self) -> &FirewallConfig {
        &self.config
    }

    /// 0.0 .. 1.0 progress toward the stability threshold.
    pub fn progress_ratio(&self) -> f64 {
        self.state.stability_progress_ms as f64 / self.config.stability_threshold_ms as f64
    }

    // ── Commands ─────────────────────────────────────────────────────

    pub fn begin_calibration(&mut self) -> Option<Event> {
        if self.state.status != FirewallStatus::Idle {
            return None;
        }
        self.state.status = FirewallStatus::Calibrating;
        tracing::debug!("firewall calibration started");
        Some(Event::CalibrationStarted { at: Utc::now() })
    }

    /// Host signal that calibration finished; the simulation starts from
    /// the configured temperature.
    pub fn complete_calibration(&mut self) -> Option<Event> {
        if self.state.status != FirewallStatus::Calibrating {
            return None;
        }
        self.state = FirewallState {
            status: FirewallStatus::Running,
            ..initial_state(&self.config)
        };
        self.state.is_stable = self.config.target_band.contains(self.state.temp);
        tracing::debug!(temp = self.state.temp, "firewall running");
        Some(Event::FirewallRunning {
            temp: self.state.temp,
            at: Utc::now(),
        })
    }

    /// Record whether the player is holding the blow action.
    /// Only meaningful while running.
    pub fn set_blowing(&mut self, blowing: bool) {
        if self.state.status == FirewallStatus::Running {
            self.state.is_blowing = blowing;
        }
    }

    /// Advance the simulation by `elapsed_ms`.
    ///
    /// Returns `Some(FirewallWon)` or `Some(FirewallFailed)` on the tick that
    /// ends the attempt.
    pub fn tick(&mut self, elapsed_ms: u64) -> Option<Event> {
        if self.state.status != FirewallStatus::Running {
            return None;
        }
        let dt_secs = elapsed_ms as f64 / 1000.0;

        self.state.temp += self.config.drift_rate_per_sec * dt_secs;
        if self.state.is_blowing {
            let target = self.config.target_band.midpoint();
            let pull = self.config.cooling_rate_per_sec * dt_secs;
            self.state.temp = if self.state.temp > target {
                (self.state.temp - pull).max(target)
            } else {
                (self.state.temp + pull).min(target)
            };
        }

        self.state.is_stable = self.config.target_band.contains(self.state.temp);

        if !self.config.safe_band.contains(self.state.temp) {
            self.state.status = FirewallStatus::Fail;
            self.state.is_blowing = false;
            tracing::info!(temp = self.state.temp, "firewall overheated, attempt failed");
            return Some(Event::FirewallFailed {
                temp: self.state.temp,
                at: Utc::now(),
            });
        }

        if self.state.is_stable {
            self.state.stability_progress_ms = self
                .state
                .stability_progress_ms
                .saturating_add(elapsed_ms)
                .min(self.config.stability_threshold_ms);
        } else {
            if self.state.stability_progress_ms > 0 {
                tracing::debug!(
                    lost_ms = self.state.stability_progress_ms,
                    temp = self.state.temp,
                    "firewall stability broken"
                );
            }
            self.state.stability_progress_ms = 0;
        }

        if self.state.stability_progress_ms >= self.config.stability_threshold_ms {
            self.state.status = FirewallStatus::Win;
            self.state.is_blowing = false;
            tracing::info!("firewall calibrated, attempt won");
            return Some(Event::FirewallWon {
                stability_progress_ms: self.state.stability_progress_ms,
                at: Utc::now(),
            });
        }
        None
    }

    /// Return to `Idle` from any state.
    pub fn reset(&mut self) -> Option<Event> {
        let from = self.state.status;
        self.state = initial_state(&self.config);
        tracing::debug!(?from, "firewall reset");
        Some(Event::FirewallReset {
            from,
            at: Utc::now(),
        })
    }
}

fn initial_state(config: &FirewallConfig) -> FirewallState {
    FirewallState {
        temp: config.start_temp,
        stability_progress_ms: 0,
        is_stable: false,
        is_blowing: false,
        status: FirewallStatus::Idle,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::firewall::Band;

    /// No drift and no cooling: the temperature only moves when the test
    /// says so, which makes stability easy to script.
    fn still_config(start_temp: f64) -> FirewallConfig {
        FirewallConfig {
            start_temp,
            drift_rate_per_sec: 0.0,
            cooling_rate_per_sec: 0.0,
            ..FirewallConfig::default()
        }
    }

    fn running(config: FirewallConfig) -> FirewallPuzzle {
        let mut puzzle = FirewallPuzzle::new(config).unwrap();
        assert!(puzzle.begin_calibration().is_some());
        assert!(puzzle.complete_calibration().is_some());
        puzzle
    }

    #[test]
    fn lifecycle_follows_calibration_order() {
        let mut puzzle = FirewallPuzzle::default();
        assert_eq!(puzzle.status(), FirewallStatus::Idle);
        assert!(puzzle.complete_calibration().is_none());
        assert!(puzzle.begin_calibration().is_some());
        assert_eq!(puzzle.status(), FirewallStatus::Calibrating);
        assert!(puzzle.begin_calibration().is_none());
        assert!(puzzle.complete_calibration().is_some());
        assert_eq!(puzzle.status(), FirewallStatus::Running);
    }

    #[test]
    fn misuse_outside_running_is_a_no_op() {
        let mut puzzle = FirewallPuzzle::default();
        puzzle.set_blowing(true);
        assert!(!puzzle.state().is_blowing);
        let before = puzzle.state().clone();
        assert!(puzzle.tick(1000).is_none());
        assert_eq!(puzzle.state(), &before);
    }

    #[test]
    fn stable_ticks_accumulate_to_win() {
        let mut puzzle = running(still_config(50.0));
        for _ in 0..29 {
            assert!(puzzle.tick(100).is_none());
        }
        assert_eq!(puzzle.state().stability_progress_ms, 2900);
        let event = puzzle.tick(100);
        assert!(matches!(event, Some(Event::FirewallWon { stability_progress_ms: 3000, .. })));
        assert_eq!(puzzle.status(), FirewallStatus::Win);

        // Terminal: further ticks change nothing.
        assert!(puzzle.tick(100).is_none());
        assert_eq!(puzzle.status(), FirewallStatus::Win);
    }

    #[test]
    fn progress_is_capped_at_threshold() {
        let mut puzzle = running(still_config(50.0));
        puzzle.tick(10_000);
        assert_eq!(puzzle.state().stability_progress_ms, 3000);
        assert_eq!(puzzle.progress_ratio(), 1.0);
    }

    #[test]
    fn drift_without_blowing_breaks_stability() {
        let config = FirewallConfig {
            start_temp: 50.0,
            drift_rate_per_sec: 4.0,
            ..FirewallConfig::default()
        };
        let mut puzzle = running(config);
        puzzle.tick(1000); // 54.0, still inside
        assert!(puzzle.state().is_stable);
        assert_eq!(puzzle.state().stability_progress_ms, 1000);
        puzzle.tick(500); // 56.0, outside
        assert!(!puzzle.state().is_stable);
        assert_eq!(puzzle.state().stability_progress_ms, 0);
        assert_eq!(puzzle.status(), FirewallStatus::Running);
    }

    #[test]
    fn blowing_pulls_back_to_target_midpoint() {
        let config = FirewallConfig {
            start_temp: 70.0,
            drift_rate_per_sec: 4.0,
            cooling_rate_per_sec: 10.0,
            ..FirewallConfig::default()
        };
        let mut puzzle = running(config);
        puzzle.set_blowing(true);
        puzzle.tick(1000); // 74 - 10 = 64
        assert!((puzzle.state().temp - 64.0).abs() < 1e-9);
        puzzle.tick(3000); // 76 - 30 clamps at 50
        assert!((puzzle.state().temp - 50.0).abs() < 1e-9);
        assert!(puzzle.state().is_stable);
    }

    #[test]
    fn leaving_safe_band_fails_regardless_of_progress() {
        let config = FirewallConfig {
            start_temp: 50.0,
            drift_rate_per_sec: 100.0,
            cooling_rate_per_sec: 0.0,
            safe_band: Band::new(20.0, 100.0),
            ..FirewallConfig::default()
        };
        let mut puzzle = running(config);
        puzzle.tick(40); // 54
        assert_eq!(puzzle.state().stability_progress_ms, 40);
        let event = puzzle.tick(1000); // 154
        assert!(matches!(event, Some(Event::FirewallFailed { .. })));
        assert_eq!(puzzle.status(), FirewallStatus::Fail);
        assert!(puzzle.status().is_terminal());
    }

    #[test]
    fn reset_returns_to_idle_with_fresh_state() {
        let mut puzzle = running(still_config(50.0));
        puzzle.set_blowing(true);
        puzzle.tick(500);
        let event = puzzle.reset();
        assert!(matches!(event, Some(Event::FirewallReset { from: FirewallStatus::Running, .. })));
        let state = puzzle.state();
        assert_eq!(state.status, FirewallStatus::Idle);
        assert_eq!(state.stability_progress_ms, 0);
        assert!(!state.is_blowing);
        assert_eq!(state.temp, 50.0);
    }

    #[test]
    fn invalid_config_is_rejected() {
        let config = FirewallConfig {
            start_temp: 500.0,
            ..FirewallConfig::default()
        };
        assert!(FirewallPuzzle::new(config).is_err());
    }
}
