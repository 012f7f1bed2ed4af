//! Firewall calibration: a temperature simulation won by holding the core
//! inside a target band for an uninterrupted stretch of time.

mod config;
mod puzzle;

pub use config::{Band, FirewallConfig};
pub use puzzle::{FirewallPuzzle, FirewallState, FirewallStatus};
