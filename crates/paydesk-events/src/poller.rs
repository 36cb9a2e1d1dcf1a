//! Periodic polling of the shared payment event record.
//!
//! In-process subscribers hear about payments immediately; everything else
//! (another process, a view created after the notify) learns about them by
//! polling. The poll task lives as long as its [`PollerHandle`].

use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};

use paydesk_core::PaymentEvent;

use crate::notifier::{PaymentNotifier, PollOutcome};

/// Default delay between polls.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(2);

/// Longest delay between polls. Longer periods are clamped to this.
pub const MAX_POLL_INTERVAL: Duration = Duration::from_secs(3600);

/// Owns a running poll task. Dropping the handle cancels the task.
#[derive(Debug)]
pub struct PollerHandle {
    task: JoinHandle<()>,
}

impl PollerHandle {
    /// Cancel the poll task.
    pub fn stop(self) {
        // Drop aborts.
    }

    /// Whether the task has exited.
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }
}

impl Drop for PollerHandle {
    fn drop(&mut self) {
        self.task.abort();
    }
}

/// Poll the shared record every `period` and call `on_fresh` for each fresh event.
///
/// The first poll happens one period after spawning. Stale and corrupt records
/// are removed without calling `on_fresh`.
///
/// # Panics
///
/// Panics if called outside a tokio runtime or if `period` is zero. A `period`
/// above [`MAX_POLL_INTERVAL`] is clamped rather than overflowing the first
/// deadline.
#[must_use = "dropping the handle stops the poller"]
pub fn spawn_poller<F>(notifier: PaymentNotifier, period: Duration, mut on_fresh: F) -> PollerHandle
where
    F: FnMut(PaymentEvent) + Send + 'static,
{
    let period = period.min(MAX_POLL_INTERVAL);
    let first_tick = Instant::now() + period;
    let task = tokio::spawn(async move {
        let mut ticker = interval_at(first_tick, period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        tracing::debug!(period_ms = period.as_millis(), "Payment event poller started");

        loop {
            ticker.tick().await;
            match notifier.poll_once() {
                PollOutcome::Fresh(event) => on_fresh(event),
                PollOutcome::Absent
                | PollOutcome::Stale(_)
                | PollOutcome::Corrupt
                | PollOutcome::Unavailable => {}
            }
        }
    });

    PollerHandle { task }
}
