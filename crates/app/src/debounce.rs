//! Debounce timers for "became off after N seconds" delivery.
//!
//! Each key has at most one pending delivery. Scheduling again restarts the
//! countdown, and cancelling drops it. Event sources use this to implement
//! [`Trigger::BecameOffAfter`](occulight_domain::event::Trigger::BecameOffAfter).

use std::collections::HashMap;
use std::hash::Hash;
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, trace};

use occulight_domain::event::SensorEvent;

/// Pending delayed deliveries, keyed by `K`.
///
/// Timers are aborted when the debouncer is dropped.
#[derive(Debug)]
pub struct Debouncer<K: Eq + Hash> {
    pending: HashMap<K, JoinHandle<()>>,
}

impl<K: Eq + Hash> Default for Debouncer<K> {
    fn default() -> Self {
        Self {
            pending: HashMap::new(),
        }
    }
}

impl<K: Eq + Hash> Debouncer<K> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Deliver `event` on `events` after `delay`, replacing any pending
    /// delivery for `key`.
    ///
    /// Must be called from within a Tokio runtime.
    pub fn schedule(
        &mut self,
        key: K,
        delay: Duration,
        event: SensorEvent,
        events: mpsc::Sender<SensorEvent>,
    ) {
        self.cancel(&key);
        self.pending.retain(|_, h| !h.is_finished());

        let handle = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            trace!(%event, "debounce elapsed");
            if events.send(event).await.is_err() {
                debug!("subscriber gone, debounced event dropped");
            }
        });
        self.pending.insert(key, handle);
    }

    /// Drop the pending delivery for `key`.
    ///
    /// Returns `true` if a delivery was still waiting.
    pub fn cancel(&mut self, key: &K) -> bool {
        match self.pending.remove(key) {
            Some(handle) => {
                let waiting = !handle.is_finished();
                handle.abort();
                waiting
            }
            None => false,
        }
    }

    #[must_use]
    pub fn is_pending(&self, key: &K) -> bool {
        self.pending.get(key).is_some_and(|h| !h.is_finished())
    }

    #[cfg(test)]
    fn pending_count(&self) -> usize {
        self.pending.values().filter(|h| !h.is_finished()).count()
    }

    #[cfg(test)]
    fn tracked(&self) -> usize {
        self.pending.len()
    }

    pub fn cancel_all(&mut self) {
        for (_, handle) in self.pending.drain() {
            handle.abort();
        }
    }
}

impl<K: Eq + Hash> Drop for Debouncer<K> {
    fn drop(&mut self) {
        self.cancel_all();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use occulight_domain::id::SensorId;
    use tokio::sync::mpsc::error::TryRecvError;
    use tokio::time::{Instant, sleep};

    fn off_event(id: &str) -> SensorEvent {
        SensorEvent::BecameOffDebounced {
            sensor_id: SensorId::new(id).unwrap(),
        }
    }

    #[tokio::test(start_paused = true)]
    async fn should_deliver_after_delay() {
        let (tx, mut rx) = mpsc::channel(8);
        let mut debouncer = Debouncer::new();
        let start = Instant::now();

        debouncer.schedule("a", Duration::from_secs(30), off_event("a"), tx);

        let event = rx.recv().await.unwrap();
        assert_eq!(event, off_event("a"));
        assert!(start.elapsed() >= Duration::from_secs(30));
    }

    #[tokio::test(start_paused = true)]
    async fn should_not_deliver_before_delay() {
        let (tx, mut rx) = mpsc::channel(8);
        let mut debouncer = Debouncer::new();

        debouncer.schedule("a", Duration::from_secs(30), off_event("a"), tx);
        sleep(Duration::from_secs(29)).await;

        assert_eq!(rx.try_recv(), Err(TryRecvError::Empty));
        assert!(debouncer.is_pending(&"a"));
    }

    #[tokio::test(start_paused = true)]
    async fn should_drop_delivery_when_cancelled() {
        let (tx, mut rx) = mpsc::channel(8);
        let mut debouncer = Debouncer::new();

        debouncer.schedule("a", Duration::from_secs(30), off_event("a"), tx);
        sleep(Duration::from_secs(10)).await;
        assert!(debouncer.cancel(&"a"));
        sleep(Duration::from_secs(60)).await;

        // sender was moved into the aborted task, so the channel is closed
        assert_eq!(rx.try_recv(), Err(TryRecvError::Disconnected));
        assert!(!debouncer.is_pending(&"a"));
    }

    #[tokio::test(start_paused = true)]
    async fn should_restart_countdown_when_rescheduled() {
        let (tx, mut rx) = mpsc::channel(8);
        let mut debouncer = Debouncer::new();
        let start = Instant::now();

        debouncer.schedule("a", Duration::from_secs(30), off_event("a"), tx.clone());
        sleep(Duration::from_secs(20)).await;
        debouncer.schedule("a", Duration::from_secs(30), off_event("a"), tx);

        let _ = rx.recv().await.unwrap();
        assert!(start.elapsed() >= Duration::from_secs(50));
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn should_keep_keys_independent() {
        let (tx, mut rx) = mpsc::channel(8);
        let mut debouncer = Debouncer::new();

        debouncer.schedule("a", Duration::from_secs(5), off_event("a"), tx.clone());
        debouncer.schedule("b", Duration::from_secs(10), off_event("b"), tx);
        assert_eq!(debouncer.pending_count(), 2);
        debouncer.cancel(&"a");

        assert_eq!(rx.recv().await.unwrap(), off_event("b"));
    }

    #[tokio::test(start_paused = true)]
    async fn should_forget_fired_deliveries_when_scheduling() {
        let (tx, mut rx) = mpsc::channel(8);
        let mut debouncer = Debouncer::new();
        debouncer.schedule(1, Duration::from_secs(1), off_event("a"), tx.clone());
        debouncer.schedule(2, Duration::from_secs(1), off_event("b"), tx.clone());
        rx.recv().await.unwrap();
        rx.recv().await.unwrap();
        tokio::task::yield_now().await;

        debouncer.schedule(3, Duration::from_secs(1), off_event("c"), tx);

        assert_eq!(debouncer.tracked(), 1);
    }

    #[tokio::test]
    async fn should_report_nothing_to_cancel_for_unknown_key() {
        let mut debouncer: Debouncer<&str> = Debouncer::new();
        assert!(!debouncer.cancel(&"missing"));
    }

    #[tokio::test(start_paused = true)]
    async fn should_abort_timers_on_drop() {
        let (tx, mut rx) = mpsc::channel(8);
        let mut debouncer = Debouncer::new();
        debouncer.schedule("a", Duration::from_secs(1), off_event("a"), tx);

        drop(debouncer);
        sleep(Duration::from_secs(5)).await;

        assert_eq!(rx.try_recv(), Err(TryRecvError::Disconnected));
    }
}
