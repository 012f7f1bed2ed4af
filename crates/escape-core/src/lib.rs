//! # Escape Core Library
//!
//! This library provides the gameplay logic of the escape game: the session
//! countdown and the puzzle engines the player's actions drive. Pages,
//! layout and sensor plumbing live in the host; the host feeds inputs in
//! (ticks, samples, held actions, candidate text) and reads state out.
//!
//! ## Architecture
//!
//! - **Countdown Clock**: A tick-driven clock, plus a cancellable tokio task
//!   that ticks it once per second
//! - **Firewall Puzzle**: A temperature simulation won by holding the core
//!   in a target band without interruption
//! - **Orientation Puzzle**: Permission-gated tilt classification into five
//!   directions
//! - **Password Puzzle**: Pure rule evaluation against a per-session context
//!
//! The units are independent: none of them calls another, and each owns its
//! state exclusively. Misusing an operation in the wrong state is a no-op.
//!
//! ## Key Components
//!
//! - [`CountdownClock`] / [`CountdownTask`]: Session timer
//! - [`FirewallPuzzle`]: Stability state machine
//! - [`OrientationPuzzle`]: Direction classifier
//! - [`PasswordPuzzle`]: Rule checklist
//! - [`GameConfig`]: TOML tuning for all of the above

pub mod clock;
pub mod config;
pub mod error;
pub mod events;
pub mod firewall;
pub mod orientation;
pub mod password;
pub mod text;

pub use clock::{format_mm_ss, CountdownClock, CountdownTask};
pub use config::GameConfig;
pub use error::{ConfigError, CoreError, ValidationError};
pub use events::Event;
pub use firewall::{Band, FirewallConfig, FirewallPuzzle, FirewallState, FirewallStatus};
pub use orientation::{
    classify, Direction, DirectionThresholds, OrientationData, OrientationPuzzle,
    OrientationState, PermissionOutcome, PermissionProvider,
};
pub use password::{GameContext, PasswordPuzzle, PasswordRule, RuleStatus};
pub use text::normalize;
