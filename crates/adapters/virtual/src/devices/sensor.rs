//! Virtual occupancy sensor — holds a raw state and its subscribers.

use tokio::sync::mpsc;

use occulight_domain::event::{SensorEvent, Trigger};
use occulight_domain::sensor::SensorState;

/// A subscriber registered on one sensor.
#[derive(Debug, Clone)]
pub struct Subscription {
    /// Stable for the lifetime of the subscription.
    pub id: u64,
    pub trigger: Trigger,
    pub events: mpsc::Sender<SensorEvent>,
}

/// A simulated occupancy sensor.
#[derive(Debug, Default)]
pub struct VirtualSensor {
    state: SensorState,
    subscriptions: Vec<Subscription>,
    next_id: u64,
}

impl VirtualSensor {
    #[must_use]
    pub fn new(state: SensorState) -> Self {
        Self {
            state,
            subscriptions: Vec::new(),
            next_id: 0,
        }
    }

    #[must_use]
    pub fn state(&self) -> &SensorState {
        &self.state
    }

    /// Store a new reading. Returns `false` when the reading equals the
    /// current state, in which case nothing downstream should fire.
    pub fn set_state(&mut self, state: SensorState) -> bool {
        if self.state == state {
            return false;
        }
        self.state = state;
        true
    }

    /// Register a subscriber and return its id. Subscriptions whose
    /// receiver is gone are dropped first.
    pub fn subscribe(&mut self, trigger: Trigger, events: mpsc::Sender<SensorEvent>) -> u64 {
        self.subscriptions.retain(|s| !s.events.is_closed());
        let id = self.next_id;
        self.next_id += 1;
        self.subscriptions.push(Subscription {
            id,
            trigger,
            events,
        });
        id
    }

    /// Live subscriptions. Those whose receiver is gone are skipped.
    pub fn subscriptions(&self) -> impl Iterator<Item = &Subscription> {
        self.subscriptions.iter().filter(|s| !s.events.is_closed())
    }

    #[cfg(test)]
    fn stored(&self) -> usize {
        self.subscriptions.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_start_unknown_by_default() {
        assert_eq!(VirtualSensor::default().state(), &SensorState::Unknown);
    }

    #[test]
    fn should_report_change_only_when_state_differs() {
        let mut sensor = VirtualSensor::new(SensorState::Off);
        assert!(!sensor.set_state(SensorState::Off));
        assert!(sensor.set_state(SensorState::On));
        assert_eq!(sensor.state(), &SensorState::On);
    }

    #[test]
    fn should_skip_subscriptions_with_dropped_receiver() {
        let mut sensor = VirtualSensor::new(SensorState::Off);
        let (tx_alive, _rx_alive) = mpsc::channel(1);
        let (tx_gone, rx_gone) = mpsc::channel(1);
        sensor.subscribe(Trigger::BecameOn, tx_gone);
        sensor.subscribe(Trigger::BecameOn, tx_alive);
        drop(rx_gone);

        let ids: Vec<u64> = sensor.subscriptions().map(|s| s.id).collect();
        assert_eq!(ids, [1]);
    }

    #[test]
    fn should_prune_closed_subscriptions_on_subscribe() {
        let mut sensor = VirtualSensor::new(SensorState::Off);
        let (tx_alive, _rx_alive) = mpsc::channel(1);
        for _ in 0..100 {
            let (tx, rx) = mpsc::channel(1);
            sensor.subscribe(Trigger::BecameOn, tx);
            drop(rx);
        }

        let id = sensor.subscribe(Trigger::BecameOn, tx_alive);

        assert_eq!(id, 100);
        assert_eq!(sensor.stored(), 1);
        assert_eq!(sensor.subscriptions().next().map(|s| s.id), Some(100));
    }
}
