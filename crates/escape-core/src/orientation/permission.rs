//! Injected host seams: the sensor permission prompt and the sample feed.

use std::future::Future;

use serde::{Deserialize, Serialize};
use tokio::sync::oneshot;

use super::classifier::OrientationData;

/// Result of asking the platform for sensor access.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "lowercase")]
pub enum PermissionOutcome {
    Granted,
    Denied { reason: String },
    /// The platform has no orientation sensor or no permission API.
    Unsupported,
}

/// Asks the user or platform for sensor access. May suspend until the
/// user answers.
pub trait PermissionProvider {
    fn request(&mut self) -> impl Future<Output = PermissionOutcome> + Send;
}

/// Pushes orientation samples in arrival order.
pub trait SampleSource {
    fn next_sample(&mut self) -> Option<OrientationData>;
}

impl<I> SampleSource for I
where
    I: Iterator<Item = OrientationData>,
{
    fn next_sample(&mut self) -> Option<OrientationData> {
        self.next()
    }
}

/// Provider that answers immediately with a fixed outcome.
#[derive(Debug, Clone)]
pub struct StaticPermission(pub PermissionOutcome);

impl PermissionProvider for StaticPermission {
    async fn request(&mut self) -> PermissionOutcome {
        self.0.clone()
    }
}

/// Provider backed by a one-shot prompt answered from elsewhere, typically
/// the UI thread once the user taps allow or deny.
#[derive(Debug)]
pub struct PromptPermission {
    decision: Option<oneshot::Receiver<PermissionOutcome>>,
}

/// Answering half of a [`PromptPermission`].
#[derive(Debug)]
pub struct PermissionPrompt {
    tx: oneshot::Sender<PermissionOutcome>,
}

impl PromptPermission {
    pub fn new() -> (Self, PermissionPrompt) {
        let (tx, rx) = oneshot::channel();
        (Self { decision: Some(rx) }, PermissionPrompt { tx })
    }
}

impl PermissionProvider for PromptPermission {
    async fn request(&mut self) -> PermissionOutcome {
        let Some(decision) = self.decision.take() else {
            return PermissionOutcome::Denied {
                reason: "permission prompt already answered".into(),
            };
        };
        decision.await.unwrap_or_else(|_| PermissionOutcome::Denied {
            reason: "permission prompt dismissed".into(),
        })
    }
}

impl PermissionPrompt {
    pub fn grant(self) {
        self.answer(PermissionOutcome::Granted);
    }

    pub fn deny(self, reason: impl Into<String>) {
        self.answer(PermissionOutcome::Denied {
            reason: reason.into(),
        });
    }

    pub fn answer(self, outcome: PermissionOutcome) {
        // A provider dropped before answering has nobody left to tell.
        let _ = self.tx.send(outcome);
    }
}
