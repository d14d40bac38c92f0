//! Sensor registry — last-known state of every sensor in a group.

use std::collections::HashMap;

use occulight_domain::id::SensorId;
use occulight_domain::occupancy::Occupancy;
use occulight_domain::sensor::{Sensor, SensorState};

/// Last-known state of each configured sensor.
///
/// The set of sensors is fixed at construction; every sensor starts as
/// [`SensorState::Unknown`] until seeded or updated.
#[derive(Debug, Clone)]
pub struct SensorRegistry {
    order: Vec<SensorId>,
    states: HashMap<SensorId, SensorState>,
}

impl SensorRegistry {
    #[must_use]
    pub fn new(sensors: impl IntoIterator<Item = SensorId>) -> Self {
        let order: Vec<SensorId> = sensors.into_iter().collect();
        let states = order
            .iter()
            .map(|id| (id.clone(), SensorState::Unknown))
            .collect();
        Self { order, states }
    }

    /// Overwrite the stored state of a registered sensor (last write wins).
    ///
    /// Returns the previous state, or `None` if the sensor is not part of
    /// this registry, in which case nothing is stored.
    pub fn update(&mut self, sensor_id: &SensorId, state: SensorState) -> Option<SensorState> {
        self.states
            .get_mut(sensor_id)
            .map(|slot| std::mem::replace(slot, state))
    }

    /// Whether every registered sensor reports exactly `off`.
    ///
    /// `unknown` and unrecognised values count as "not off".
    #[must_use]
    pub fn all_off(&self) -> bool {
        self.states.values().all(SensorState::is_off)
    }

    #[must_use]
    pub fn get(&self, sensor_id: &SensorId) -> Option<&SensorState> {
        self.states.get(sensor_id)
    }

    #[must_use]
    pub fn contains(&self, sensor_id: &SensorId) -> bool {
        self.states.contains_key(sensor_id)
    }

    /// Aggregate occupancy of the current states.
    #[must_use]
    pub fn occupancy(&self) -> Occupancy {
        Occupancy::from_states(self.states.values())
    }

    /// Sensors that currently keep the group from being all-off, in configured order.
    #[must_use]
    pub fn active_sensors(&self) -> Vec<&SensorId> {
        self.order
            .iter()
            .filter(|id| self.states.get(*id).is_some_and(|s| !s.is_off()))
            .collect()
    }

    /// All sensors with their states, in configured order.
    #[must_use]
    pub fn snapshot(&self) -> Vec<Sensor> {
        self.order
            .iter()
            .map(|id| Sensor {
                id: id.clone(),
                state: self.states.get(id).cloned().unwrap_or_default(),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sensor(id: &str) -> SensorId {
        SensorId::new(id).unwrap()
    }

    fn registry() -> SensorRegistry {
        SensorRegistry::new([sensor("a"), sensor("b")])
    }

    #[test]
    fn should_start_with_unknown_states() {
        let reg = registry();
        assert_eq!(reg.get(&sensor("a")), Some(&SensorState::Unknown));
        assert!(!reg.all_off());
    }

    #[test]
    fn should_report_all_off_only_when_every_sensor_is_off() {
        let mut reg = registry();
        reg.update(&sensor("a"), SensorState::Off);
        assert!(!reg.all_off());
        reg.update(&sensor("b"), SensorState::Off);
        assert!(reg.all_off());
        reg.update(&sensor("b"), SensorState::On);
        assert!(!reg.all_off());
    }

    #[test]
    fn should_overwrite_and_return_previous_state() {
        let mut reg = registry();
        assert_eq!(reg.update(&sensor("a"), SensorState::On), Some(SensorState::Unknown));
        assert_eq!(reg.update(&sensor("a"), SensorState::On), Some(SensorState::On));
        assert_eq!(reg.get(&sensor("a")), Some(&SensorState::On));
    }

    #[test]
    fn should_ignore_unregistered_sensor() {
        let mut reg = registry();
        assert_eq!(reg.update(&sensor("z"), SensorState::On), None);
        assert!(!reg.contains(&sensor("z")));
        assert_eq!(reg.snapshot().len(), 2);
    }

    #[test]
    fn should_treat_unrecognized_state_as_not_off() {
        let mut reg = registry();
        reg.update(&sensor("a"), SensorState::Off);
        reg.update(&sensor("b"), SensorState::Other("unavailable".to_string()));
        assert!(!reg.all_off());
        assert_eq!(reg.active_sensors(), vec![&sensor("b")]);
    }

    #[test]
    fn should_derive_occupancy_from_states() {
        let mut reg = registry();
        assert_eq!(reg.occupancy(), Occupancy::Unoccupied);
        reg.update(&sensor("b"), SensorState::On);
        assert_eq!(reg.occupancy(), Occupancy::Occupied);
    }

    #[test]
    fn should_snapshot_in_configured_order() {
        let mut reg = SensorRegistry::new([sensor("z"), sensor("a"), sensor("m")]);
        reg.update(&sensor("a"), SensorState::On);
        let ids: Vec<_> = reg.snapshot().into_iter().map(|s| s.id.to_string()).collect();
        assert_eq!(ids, ["z", "a", "m"]);
    }
}
