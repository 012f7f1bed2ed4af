use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::firewall::FirewallStatus;
use crate::orientation::Direction;

/// Every notable state change in a puzzle produces an Event.
/// The host polls for events and renders whatever it needs from them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Event {
    ClockTicked {
        display: String,
        remaining_secs: u64,
        at: DateTime<Utc>,
    },
    /// First tick that displayed `00:00`. Emitted once per countdown.
    ClockExpired {
        at: DateTime<Utc>,
    },
    CalibrationStarted {
        at: DateTime<Utc>,
    },
    FirewallRunning {
        temp: f64,
        at: DateTime<Utc>,
    },
    FirewallWon {
        stability_progress_ms: u64,
        at: DateTime<Utc>,
    },
    FirewallFailed {
        temp: f64,
        at: DateTime<Utc>,
    },
    FirewallReset {
        from: FirewallStatus,
        at: DateTime<Utc>,
    },
    PermissionGranted {
        at: DateTime<Utc>,
    },
    PermissionDenied {
        reason: String,
        at: DateTime<Utc>,
    },
    DirectionChanged {
        from: Direction,
        to: Direction,
        at: DateTime<Utc>,
    },
    PasswordSolved {
        session_id: String,
        at: DateTime<Utc>,
    },
}
