//! Scheduled, cancellable countdown.
//!
//! Drives a [`CountdownClock`] from a tokio interval. The latest `MM:SS`
//! display is published on a watch channel and every tick is also pushed
//! as an [`Event`] for hosts that want a stream. Unlike a bare periodic
//! timer, the task has a defined end: `stop()` or dropping the handle.

use std::time::Duration;

use chrono::Utc;
use tokio::sync::{mpsc, oneshot, watch};
use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

use super::countdown::{format_mm_ss, CountdownClock};
use crate::error::ValidationError;
use crate::events::Event;

/// Events buffered for a host that is not reading fast enough.
/// One slot is held back for `ClockExpired`; ticks that arrive while the
/// rest is full are dropped. The watch channels stay current regardless.
const EVENT_BUFFER: usize = 64;

/// Handle to a running countdown.
#[derive(Debug)]
pub struct CountdownTask {
    display_rx: watch::Receiver<String>,
    expired_rx: watch::Receiver<bool>,
    events_rx: mpsc::Receiver<Event>,
    cancel_tx: Option<oneshot::Sender<()>>,
    handle: Option<JoinHandle<()>>,
}

impl CountdownTask {
    /// Start a countdown of `budget_secs`, ticking every `period`.
    ///
    /// The first tick fires immediately.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::ZeroBudget`] for a zero budget, and
    /// [`ValidationError::InvalidValue`] for a zero period or when called
    /// outside a tokio runtime.
    pub fn spawn(budget_secs: u64, period: Duration) -> Result<Self, ValidationError> {
        if period.is_zero() {
            return Err(ValidationError::InvalidValue {
                field: "period".into(),
                message: "tick period must be non-zero".into(),
            });
        }
        let runtime = Handle::try_current().map_err(|e| ValidationError::InvalidValue {
            field: "runtime".into(),
            message: e.to_string(),
        })?;
        let mut clock = CountdownClock::new();
        clock.start(budget_secs)?;

        let (display_tx, display_rx) = watch::channel(format_mm_ss(budget_secs));
        let (expired_tx, expired_rx) = watch::channel(false);
        let (events_tx, events_rx) = mpsc::channel(EVENT_BUFFER);
        let (cancel_tx, cancel_rx) = oneshot::channel();
        // Fresh channel, so the reservation cannot fail.
        let expiry_slot = events_tx.clone().try_reserve_owned().ok();

        let channels = Channels {
            display_tx,
            expired_tx,
            events_tx,
            expiry_slot,
        };
        let handle = runtime.spawn(run(clock, period, channels, cancel_rx));

        Ok(Self {
            display_rx,
            expired_rx,
            events_rx,
            cancel_tx: Some(cancel_tx),
            handle: Some(handle),
        })
    }

    /// Most recently emitted display (the budget itself before the first tick).
    pub fn latest(&self) -> String {
        self.display_rx.borrow().clone()
    }

    /// True once the countdown has reached `00:00`, whether or not the
    /// host has read the event stream.
    pub fn is_expired(&self) -> bool {
        *self.expired_rx.borrow()
    }

    /// Independent receiver for display updates.
    pub fn subscribe(&self) -> watch::Receiver<String> {
        self.display_rx.clone()
    }

    /// Next tick or expiry event. `None` once the task has stopped and the
    /// buffer is drained.
    pub async fn next_event(&mut self) -> Option<Event> {
        self.events_rx.recv().await
    }

    pub fn is_finished(&self) -> bool {
        self.handle.as_ref().map_or(true, JoinHandle::is_finished)
    }

    /// Cancel the countdown and wait for the task to exit. Idempotent.
    pub async fn stop(&mut self) {
        if let Some(cancel) = self.cancel_tx.take() {
            // The task may already be gone; nothing to signal then.
            let _ = cancel.send(());
        }
        if let Some(handle) = self.handle.take() {
            if let Err(e) = handle.await {
                tracing::warn!(error = %e, "countdown task ended abnormally");
            }
        }
    }
}

struct Channels {
    display_tx: watch::Sender<String>,
    expired_tx: watch::Sender<bool>,
    events_tx: mpsc::Sender<Event>,
    /// Reserved buffer slot for the single `ClockExpired` event.
    expiry_slot: Option<mpsc::OwnedPermit<Event>>,
}

async fn run(
    mut clock: CountdownClock,
    period: Duration,
    mut channels: Channels,
    mut cancel_rx: oneshot::Receiver<()>,
) {
    let mut interval = tokio::time::interval(period);
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
    let mut expired_sent = false;

    loop {
        tokio::select! {
            // Fires on stop() and when the handle is dropped.
            _ = &mut cancel_rx => break,
            _ = interval.tick() => {
                let display = clock.on_tick();
                channels.display_tx.send_replace(display.clone());

                let expired_now = !expired_sent && clock.remaining_secs() == 0 && display == "00:00";
                push(&channels.events_tx, Event::ClockTicked {
                    display,
                    remaining_secs: clock.remaining_secs(),
                    at: Utc::now(),
                });
                if expired_now {
                    expired_sent = true;
                    tracing::info!("countdown expired");
                    channels.expired_tx.send_replace(true);
                    if let Some(slot) = channels.expiry_slot.take() {
                        slot.send(Event::ClockExpired { at: Utc::now() });
                    }
                }
            }
        }
    }
    tracing::debug!(remaining_secs = clock.remaining_secs(), "countdown task stopped");
}

fn push(events_tx: &mpsc::Sender<Event>, event: Event) {
    if let Err(mpsc::error::TrySendError::Full(_)) = events_tx.try_send(event) {
        tracing::trace!("countdown event buffer full, dropping tick");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn display_of(event: &Event) -> Option<&str> {
        match event {
            Event::ClockTicked { display, .. } => Some(display.as_str()),
            _ => None,
        }
    }

    #[tokio::test(start_paused = true)]
    async fn emits_ticks_then_expiry_once() {
        let mut task = CountdownTask::spawn(2, Duration::from_secs(1)).unwrap();
        assert_eq!(task.latest(), "00:02");

        let mut displays = Vec::new();
        let mut expiries = 0;
        while displays.len() < 5 {
            let event = task.next_event().await.unwrap();
            match display_of(&event) {
                Some(d) => displays.push(d.to_string()),
                None => expiries += 1,
            }
        }
        assert_eq!(displays, ["00:02", "00:01", "00:00", "00:00", "00:00"]);
        assert_eq!(expiries, 1);
        assert_eq!(task.latest(), "00:00");

        task.stop().await;
        assert!(task.is_finished());
    }

    #[tokio::test(start_paused = true)]
    async fn stop_is_idempotent_and_closes_stream() {
        let mut task = CountdownTask::spawn(10, Duration::from_secs(1)).unwrap();
        let _first = task.next_event().await;
        task.stop().await;
        task.stop().await;

        let mut drained = 0;
        while task.next_event().await.is_some() {
            drained += 1;
            assert!(drained < EVENT_BUFFER + 2);
        }
        assert!(task.is_finished());
    }

    #[tokio::test(start_paused = true)]
    async fn expiry_survives_a_full_buffer() {
        let budget = EVENT_BUFFER as u64 + 36;
        let mut task = CountdownTask::spawn(budget, Duration::from_secs(1)).unwrap();
        assert!(!task.is_expired());

        tokio::time::sleep(Duration::from_secs(budget + 50)).await;
        assert!(task.is_expired());
        assert_eq!(task.latest(), "00:00");
        task.stop().await;

        let mut ticks = 0;
        let mut expiries = 0;
        while let Some(event) = task.next_event().await {
            match event {
                Event::ClockTicked { .. } => ticks += 1,
                Event::ClockExpired { .. } => expiries += 1,
                other => panic!("unexpected event {other:?}"),
            }
        }
        assert_eq!(ticks, EVENT_BUFFER - 1);
        assert_eq!(expiries, 1);
    }

    #[tokio::test(start_paused = true)]
    async fn dropping_the_handle_cancels_the_task() {
        let task = CountdownTask::spawn(10, Duration::from_secs(1)).unwrap();
        let display = task.subscribe();
        drop(task);

        tokio::time::sleep(Duration::from_secs(3)).await;
        assert!(display.has_changed().is_err());
    }

    #[test]
    fn spawn_outside_runtime_is_an_error() {
        assert!(matches!(
            CountdownTask::spawn(5, Duration::from_secs(1)),
            Err(ValidationError::InvalidValue { ref field, .. }) if field == "runtime"
        ));
    }

    #[tokio::test]
    async fn rejects_bad_arguments() {
        assert_eq!(
            CountdownTask::spawn(0, Duration::from_secs(1)).err(),
            Some(ValidationError::ZeroBudget)
        );
        assert!(CountdownTask::spawn(5, Duration::ZERO).is_err());
    }
}
