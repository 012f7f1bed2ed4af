//! Device-orientation puzzle.
//!
//! Tilt telemetry is reduced to one of five directions. Permission must be
//! granted before any sample is accepted; matching a target sequence of
//! directions is left to the host.

mod classifier;
mod permission;
mod puzzle;

pub use classifier::{classify, Direction, DirectionThresholds, OrientationData};
pub use permission::{
    PermissionOutcome, PermissionPrompt, PermissionProvider, PromptPermission, SampleSource,
    StaticPermission,
};
pub use puzzle::{OrientationPuzzle, OrientationState};
