//! Payment event notifier.
//!
//! `notify()` writes the shared record and reaches in-process listeners in the
//! same call; other processes find the record by polling it (see
//! [`crate::poller`]). Delivery is a broadcast: every poller that reads the
//! record before it is removed treats it as fresh.

use std::sync::{Arc, Mutex, PoisonError, Weak};

use tokio::sync::broadcast;

use paydesk_core::PaymentEvent;
use paydesk_store::{keys, MemoryStore, RecordStore, RecordStoreExt, StoreError};

use crate::clock::{Clock, SystemClock};

/// Buffered events per `listen()` receiver before it starts lagging.
const CHANNEL_CAPACITY: usize = 16;

/// In-process subscriber callback.
pub type Callback = Arc<dyn Fn(&PaymentEvent) + Send + Sync>;

/// Result of reading the shared record once.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PollOutcome {
    /// No record present.
    Absent,
    /// Record within the freshness window; it has been removed.
    Fresh(PaymentEvent),
    /// Record past the freshness window; it has been removed and must be ignored.
    Stale(PaymentEvent),
    /// Record could not be parsed; it has been removed.
    Corrupt,
    /// The store could not be read.
    Unavailable,
}

impl PollOutcome {
    /// The event to refresh on, if this poll observed a fresh one.
    #[must_use]
    pub const fn fresh(&self) -> Option<PaymentEvent> {
        match self {
            Self::Fresh(event) => Some(*event),
            _ => None,
        }
    }
}

#[derive(Default)]
struct Registry {
    next_id: u64,
    entries: Vec<(u64, Callback)>,
}

struct Inner {
    store: Arc<dyn RecordStore>,
    clock: Arc<dyn Clock>,
    subscribers: Mutex<Registry>,
    channel: broadcast::Sender<PaymentEvent>,
}

/// Broadcasts "a payment just completed".
///
/// Cheap to clone; clones share subscribers, store, and channel.
#[derive(Clone)]
pub struct PaymentNotifier {
    inner: Arc<Inner>,
}

impl std::fmt::Debug for PaymentNotifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PaymentNotifier")
            .field("subscribers", &self.subscriber_count())
            .finish_non_exhaustive()
    }
}

impl PaymentNotifier {
    /// Create a notifier persisting to `store` with wall-clock time.
    #[must_use]
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        Self::with_clock(store, Arc::new(SystemClock))
    }

    /// Create a notifier with an explicit clock.
    #[must_use]
    pub fn with_clock(store: Arc<dyn RecordStore>, clock: Arc<dyn Clock>) -> Self {
        let (channel, _) = broadcast::channel(CHANNEL_CAPACITY);
        Self {
            inner: Arc::new(Inner {
                store,
                clock,
                subscribers: Mutex::new(Registry::default()),
                channel,
            }),
        }
    }

    /// Notifier over a fresh process-local store.
    #[must_use]
    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryStore::new()))
    }

    /// The backing store.
    #[must_use]
    pub fn store(&self) -> &Arc<dyn RecordStore> {
        &self.inner.store
    }

    /// Announce a completed payment.
    ///
    /// Overwrites the shared record with the current timestamp, then invokes every
    /// callback subscribed at this moment exactly once, in subscription order, and
    /// publishes the event to `listen()` receivers. A failed record write is
    /// logged; in-process delivery still happens.
    pub fn notify(&self) -> PaymentEvent {
        let event = PaymentEvent::at(self.inner.clock.now_ms());

        if let Err(e) = self.inner.store.put_json(keys::PAYMENT_EVENT, &event) {
            tracing::warn!(error = %e, "Failed to persist payment event");
        }

        // Snapshot so callbacks may (un)subscribe without deadlocking.
        let callbacks: Vec<Callback> = self
            .registry()
            .entries
            .iter()
            .map(|(_, cb)| Arc::clone(cb))
            .collect();

        tracing::debug!(
            timestamp = event.timestamp,
            subscribers = callbacks.len(),
            "Payment event notified"
        );

        for callback in callbacks {
            callback(&event);
        }

        // No receivers is not an error.
        let _ = self.inner.channel.send(event);

        event
    }

    /// Register `callback` for every future in-process `notify()`.
    ///
    /// The callback stays registered until the returned [`Subscription`] is
    /// unsubscribed or dropped.
    #[must_use = "dropping the subscription unsubscribes immediately"]
    pub fn subscribe<F>(&self, callback: F) -> Subscription
    where
        F: Fn(&PaymentEvent) + Send + Sync + 'static,
    {
        let mut registry = self.registry();
        let id = registry.next_id;
        registry.next_id += 1;
        registry.entries.push((id, Arc::new(callback)));

        Subscription {
            id,
            notifier: Arc::downgrade(&self.inner),
        }
    }

    /// Receive every event this process notifies, pushed as it happens.
    ///
    /// Receivers that fall more than a few events behind observe
    /// `RecvError::Lagged` and skip ahead.
    #[must_use]
    pub fn listen(&self) -> broadcast::Receiver<PaymentEvent> {
        self.inner.channel.subscribe()
    }

    /// Number of registered callbacks.
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.registry().entries.len()
    }

    /// Read the shared record once and classify it.
    ///
    /// Every present record is removed, fresh or not, so the state always returns
    /// to absent. Corrupt records are logged and removed; this never fails.
    pub fn poll_once(&self) -> PollOutcome {
        let store = &self.inner.store;

        let event = match store.get_json::<PaymentEvent>(keys::PAYMENT_EVENT) {
            Ok(Some(event)) => event,
            Ok(None) => return PollOutcome::Absent,
            Err(StoreError::Serialization(e)) => {
                tracing::warn!(error = %e, "Discarding unparseable payment event record");
                self.discard();
                return PollOutcome::Corrupt;
            }
            Err(e) => {
                tracing::warn!(error = %e, "Failed to read payment event record");
                return PollOutcome::Unavailable;
            }
        };

        self.discard();

        let now = self.inner.clock.now_ms();
        if event.is_fresh_at(now) {
            tracing::info!(
                timestamp = event.timestamp,
                age_ms = event.age_ms(now),
                "Fresh payment event observed"
            );
            PollOutcome::Fresh(event)
        } else {
            tracing::debug!(
                timestamp = event.timestamp,
                age_ms = event.age_ms(now),
                "Ignoring stale payment event"
            );
            PollOutcome::Stale(event)
        }
    }

    fn discard(&self) {
        if let Err(e) = self.inner.store.remove(keys::PAYMENT_EVENT) {
            tracing::warn!(error = %e, "Failed to remove payment event record");
        }
    }

    fn registry(&self) -> std::sync::MutexGuard<'_, Registry> {
        self.inner
            .subscribers
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

/// Handle to an in-process subscription. Dropping it unsubscribes.
#[derive(Debug)]
pub struct Subscription {
    id: u64,
    notifier: Weak<Inner>,
}

impl Subscription {
    /// Remove this subscription's callback. Other subscriptions are unaffected.
    pub fn unsubscribe(self) {
        // Drop does the work.
    }

    fn remove(&self) {
        if let Some(inner) = self.notifier.upgrade() {
            inner
                .subscribers
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .entries
                .retain(|(id, _)| *id != self.id);
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.remove();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn notifier_at(start_ms: i64) -> (PaymentNotifier, Arc<ManualClock>, MemoryStore) {
        let store = MemoryStore::new();
        let clock = Arc::new(ManualClock::new(start_ms));
        let notifier = PaymentNotifier::with_clock(Arc::new(store.clone()), clock.clone());
        (notifier, clock, store)
    }

    fn counter(notifier: &PaymentNotifier) -> (Arc<AtomicUsize>, Subscription) {
        let count = Arc::new(AtomicUsize::new(0));
        let c = Arc::clone(&count);
        let sub = notifier.subscribe(move |_| {
            c.fetch_add(1, Ordering::SeqCst);
        });
        (count, sub)
    }

    #[test]
    fn each_notify_fires_each_subscriber_once() {
        let (notifier, _, _) = notifier_at(0);
        let (a, _sub_a) = counter(&notifier);
        let (b, _sub_b) = counter(&notifier);

        notifier.notify();
        assert_eq!(a.load(Ordering::SeqCst), 1);
        assert_eq!(b.load(Ordering::SeqCst), 1);

        notifier.notify();
        notifier.notify();
        assert_eq!(a.load(Ordering::SeqCst), 3);
        assert_eq!(b.load(Ordering::SeqCst), 3);
    }

    #[test]
    fn unsubscribe_only_removes_that_callback() {
        let (notifier, _, _) = notifier_at(0);
        let (a, sub_a) = counter(&notifier);
        let (b, _sub_b) = counter(&notifier);

        sub_a.unsubscribe();
        notifier.notify();

        assert_eq!(a.load(Ordering::SeqCst), 0);
        assert_eq!(b.load(Ordering::SeqCst), 1);
        assert_eq!(notifier.subscriber_count(), 1);
    }

    #[test]
    fn dropping_subscription_unsubscribes() {
        let (notifier, _, _) = notifier_at(0);
        {
            let (_count, _sub) = counter(&notifier);
            assert_eq!(notifier.subscriber_count(), 1);
        }
        assert_eq!(notifier.subscriber_count(), 0);
    }

    #[test]
    fn callbacks_run_in_subscription_order() {
        let (notifier, _, _) = notifier_at(0);
        let order = Arc::new(Mutex::new(Vec::new()));
        let subs: Vec<_> = (0..3)
            .map(|i| {
                let order = Arc::clone(&order);
                notifier.subscribe(move |_| order.lock().unwrap().push(i))
            })
            .collect();

        notifier.notify();
        assert_eq!(*order.lock().unwrap(), vec![0, 1, 2]);
        drop(subs);
    }

    #[test]
    fn callback_may_subscribe_during_dispatch() {
        let (notifier, _, _) = notifier_at(0);
        let inner = notifier.clone();
        let spawned = Arc::new(Mutex::new(Vec::new()));
        let spawned_ref = Arc::clone(&spawned);
        let _sub = notifier.subscribe(move |_| {
            let sub = inner.subscribe(|_| {});
            spawned_ref.lock().unwrap().push(sub);
        });

        notifier.notify();
        assert_eq!(notifier.subscriber_count(), 2);
    }

    #[test]
    fn notify_persists_record_with_timestamp() {
        let (notifier, _, store) = notifier_at(42_000);
        let event = notifier.notify();
        assert_eq!(event.timestamp, 42_000);

        let stored: Option<PaymentEvent> = store.get_json(keys::PAYMENT_EVENT).unwrap();
        assert_eq!(stored, Some(event));
    }

    #[test]
    fn notify_overwrites_previous_record() {
        let (notifier, clock, store) = notifier_at(1_000);
        notifier.notify();
        clock.set(2_000);
        notifier.notify();

        let stored: Option<PaymentEvent> = store.get_json(keys::PAYMENT_EVENT).unwrap();
        assert_eq!(stored, Some(PaymentEvent::at(2_000)));
    }

    #[test]
    fn fresh_record_consumed_then_absent() {
        let (notifier, clock, _) = notifier_at(0);
        notifier.notify();

        clock.set(1_000);
        assert_eq!(notifier.poll_once(), PollOutcome::Fresh(PaymentEvent::at(0)));

        clock.set(2_000);
        assert_eq!(notifier.poll_once(), PollOutcome::Absent);
    }

    #[test]
    fn stale_record_ignored_and_removed() {
        let (notifier, clock, store) = notifier_at(0);
        notifier.notify();

        clock.set(11_000);
        let outcome = notifier.poll_once();
        assert_eq!(outcome, PollOutcome::Stale(PaymentEvent::at(0)));
        assert!(outcome.fresh().is_none());
        assert!(store.get(keys::PAYMENT_EVENT).unwrap().is_none());
    }

    #[test]
    fn corrupt_record_logged_and_removed() {
        let (notifier, _, store) = notifier_at(0);
        store.put(keys::PAYMENT_EVENT, b"{\"timestamp\":").unwrap();

        assert_eq!(notifier.poll_once(), PollOutcome::Corrupt);
        assert!(store.get(keys::PAYMENT_EVENT).unwrap().is_none());
        assert_eq!(notifier.poll_once(), PollOutcome::Absent);
    }

    #[test]
    fn two_pollers_over_shared_store_at_least_one_refreshes() {
        let store = MemoryStore::new();
        let clock = Arc::new(ManualClock::new(0));
        let tab_a = PaymentNotifier::with_clock(Arc::new(store.clone()), clock.clone());
        let tab_b = PaymentNotifier::with_clock(Arc::new(store.clone()), clock.clone());

        tab_a.notify();
        clock.set(500);

        let refreshed = [tab_a.poll_once(), tab_b.poll_once()]
            .iter()
            .filter(|o| o.fresh().is_some())
            .count();
        assert!(refreshed >= 1);
    }

    #[tokio::test]
    async fn listen_receives_notified_events() {
        let (notifier, _, _) = notifier_at(7);
        let mut rx = notifier.listen();

        notifier.notify();
        assert_eq!(rx.recv().await.unwrap(), PaymentEvent::at(7));
    }
}
