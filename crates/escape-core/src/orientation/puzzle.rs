use chrono::Utc;
use serde::{Deserialize, Serialize};

use super::classifier::{classify, Direction, DirectionThresholds, OrientationData};
use super::permission::{PermissionOutcome, PermissionProvider, SampleSource};
use crate::error::ValidationError;
use crate::events::Event;

/// Raw state the host can render.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OrientationState {
    pub data: OrientationData,
    pub error: Option<String>,
    pub permission_granted: bool,
}

#[derive(Debug, Clone, Default)]
pub struct OrientationPuzzle {
    thresholds: DirectionThresholds,
    state: OrientationState,
    /// Direction of the last accepted sample, for change detection.
    last_direction: Option<Direction>,
}

impl OrientationPuzzle {
    /// # Errors
    ///
    /// Returns an error if the thresholds are negative or non-finite.
    pub fn new(thresholds: DirectionThresholds) -> Result<Self, ValidationError> {
        thresholds.validate()?;
        Ok(Self {
            thresholds,
            ..Self::default()
        })
    }

    pub fn state(&self) -> &OrientationState {
        &self.state
    }

    pub fn thresholds(&self) -> &DirectionThresholds {
        &self.thresholds
    }

    pub fn permission_granted(&self) -> bool {
        self.state.permission_granted
    }

    /// Direction of the latest accepted sample; `Stable` before any.
    pub fn direction(&self) -> Direction {
        classify(&self.state.data, &self.thresholds)
    }

    /// Ask for sensor access. Suspends until the provider answers.
    ///
    /// Returns `None` without asking when access was already granted.
    /// A denial is recorded in `error` and can be retried later.
    pub async fn request_permission<P>(&mut self, provider: &mut P) -> Option<Event>
    where
        P: PermissionProvider,
    {
        if self.state.permission_granted {
            return None;
        }
        let outcome = provider.request().await;
        let event = match outcome {
            PermissionOutcome::Granted => {
                self.state.permission_granted = true;
                self.state.error = None;
                tracing::debug!("orientation permission granted");
                Event::PermissionGranted { at: Utc::now() }
            }
            PermissionOutcome::Denied { reason } => {
                tracing::warn!(%reason, "orientation permission denied");
                self.state.error = Some(reason.clone());
                Event::PermissionDenied {
                    reason,
                    at: Utc::now(),
                }
            }
            PermissionOutcome::Unsupported => {
                let reason = "device orientation is not supported on this platform".to_string();
                tracing::warn!(%reason, "orientation permission unavailable");
                self.state.error = Some(reason.clone());
                Event::PermissionDenied {
                    reason,
                    at: Utc::now(),
                }
            }
        };
        Some(event)
    }

    /// Accept a sample and return its direction. Samples arriving before
    /// permission is granted are dropped and yield `None`.
    pub fn submit_sample(&mut self, data: OrientationData) -> Option<Direction> {
        if !self.state.permission_granted {
            tracing::trace!("orientation sample ignored, permission not granted");
            return None;
        }
        self.state.data = data;
        let direction = self.direction();
        self.last_direction = Some(direction);
        Some(direction)
    }

    /// Feed every pending sample from `source`, in order, and report each
    /// change of direction.
    pub fn drain<S>(&mut self, source: &mut S) -> Vec<Event>
    where
        S: SampleSource + ?Sized,
    {
        let mut events = Vec::new();
        while let Some(data) = source.next_sample() {
            let before = self.last_direction.unwrap_or(Direction::Stable);
            let Some(after) = self.submit_sample(data) else {
                continue;
            };
            if after != before {
                tracing::debug!(?before, ?after, "direction changed");
                events.push(Event::DirectionChanged {
                    from: before,
                    to: after,
                    at: Utc::now(),
                });
            }
        }
        events
    }
}
