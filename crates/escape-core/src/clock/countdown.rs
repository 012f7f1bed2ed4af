//! Session countdown clock.
//!
//! The clock is a tick-driven state machine with no internal thread. Each
//! call to `on_tick()` formats the remaining time and then decrements it by
//! one second. Once the budget reaches zero the clock keeps reporting
//! `00:00`; detecting expiry is left to the caller via `is_expired()`.
//!
//! ## Usage
//!
//! ```ignore
//! let mut clock = CountdownClock::new();
//! clock.start(3600)?;
//! // Once per second:
//! let display = clock.on_tick(); // "60:00", "59:59", ...
//! ```

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Fixed tick cadence of the countdown.
pub const TICK_INTERVAL_MS: u64 = 1000;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountdownClock {
    remaining_secs: u64,
    started: bool,
}

impl CountdownClock {
    /// Create an unstarted clock. Ticking it reports `00:00`.
    pub fn new() -> Self {
        Self::default()
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn remaining_secs(&self) -> u64 {
        self.remaining_secs
    }

    pub fn is_started(&self) -> bool {
        self.started
    }

    /// True once a started clock has run down to zero.
    pub fn is_expired(&self) -> bool {
        self.started && self.remaining_secs == 0
    }

    /// Current remaining time as `MM:SS`, without ticking.
    pub fn display(&self) -> String {
        format_mm_ss(self.remaining_secs)
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Load a budget and mark the clock started.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::ZeroBudget`] for a zero budget; the clock is
    /// left untouched in that case.
    pub fn start(&mut self, budget_secs: u64) -> Result<(), ValidationError> {
        if budget_secs == 0 {
            return Err(ValidationError::ZeroBudget);
        }
        self.remaining_secs = budget_secs;
        self.started = true;
        tracing::debug!(budget_secs, "countdown started");
        Ok(())
    }

    /// Format the remaining time, then count down one second (clamped at 0).
    pub fn on_tick(&mut self) -> String {
        let display = format_mm_ss(self.remaining_secs);
        if self.started {
            self.remaining_secs = self.remaining_secs.saturating_sub(1);
        }
        display
    }
}

/// Format seconds as zero-padded `MM:SS`.
///
/// Minutes are not wrapped into hours, so budgets of 100 minutes or more
/// print three minute digits.
pub fn format_mm_ss(total_secs: u64) -> String {
    let minutes = total_secs / 60;
    let seconds = total_secs % 60;
    format!("{minutes:02}:{seconds:02}")
}
