//! Aggregation engine — merges sensor events into one occupancy decision per group.
//!
//! The engine owns the group's [`SensorRegistry`] and [`LightStateStore`].
//! An "on" from any sensor saves each light's current brightness (once per
//! occupancy cycle) and drives every light to the target brightness. A
//! debounced "off" only acts when *all* sensors are off at evaluation time;
//! then each light gets its saved brightness back, or is turned off when
//! nothing was saved.

use tracing::{debug, info, warn};

use occulight_domain::event::SensorEvent;
use occulight_domain::group::LightGroup;
use occulight_domain::id::{LightId, SensorId};
use occulight_domain::light::{Brightness, LightCommand};
use occulight_domain::occupancy::Occupancy;
use occulight_domain::sensor::SensorState;

use crate::light_store::LightStateStore;
use crate::ports::Driver;
use crate::registry::SensorRegistry;

/// Occupancy decision logic for one light group.
pub struct AggregationEngine<D> {
    name: String,
    lights: Vec<LightId>,
    target_brightness: Brightness,
    registry: SensorRegistry,
    store: LightStateStore,
    occupancy: Occupancy,
    driver: D,
}

impl<D: Driver> AggregationEngine<D> {
    /// Create an engine for `group`. All sensors start as `unknown`.
    pub fn new(group: &LightGroup, driver: D) -> Self {
        Self {
            name: group.name.clone(),
            lights: group.lights.clone(),
            target_brightness: group.light_brightness,
            registry: SensorRegistry::new(group.sensors.iter().cloned()),
            store: LightStateStore::new(),
            occupancy: Occupancy::Unoccupied,
            driver,
        }
    }

    /// Record a sensor's state without running any transition logic.
    ///
    /// Used at startup; occupancy is re-derived from the registry and no
    /// light is touched.
    pub fn seed(&mut self, sensor_id: &SensorId, state: SensorState) {
        if self.registry.update(sensor_id, state).is_none() {
            warn!(group = %self.name, sensor = %sensor_id, "cannot seed unregistered sensor");
        }
        self.occupancy = self.registry.occupancy();
    }

    /// Dispatch a delivered event to the matching handler.
    pub async fn handle(&mut self, event: &SensorEvent) -> Vec<LightCommand> {
        match event {
            SensorEvent::BecameOn { sensor_id } => self.on_sensor_on(sensor_id).await,
            SensorEvent::BecameOffDebounced { sensor_id } => {
                self.on_sensor_off_debounced(sensor_id).await
            }
        }
    }

    /// A sensor reported `on`.
    ///
    /// Fires on every "on", not only on the unoccupied → occupied edge, so a
    /// re-firing sensor re-asserts the target brightness. Returns the
    /// commands sent to the driver.
    pub async fn on_sensor_on(&mut self, sensor_id: &SensorId) -> Vec<LightCommand> {
        if !self.record(sensor_id, SensorState::On) {
            return Vec::new();
        }

        if !self.occupancy.is_occupied() {
            info!(group = %self.name, sensor = %sensor_id, "group occupied");
            self.occupancy = Occupancy::Occupied;
        }

        for light_id in &self.lights {
            if self.store.contains(light_id) {
                continue;
            }
            let brightness = match self.driver.get_brightness(light_id).await {
                Ok(brightness) => brightness,
                Err(err) => {
                    warn!(
                        group = %self.name,
                        light = %light_id,
                        error = %err,
                        "failed to read brightness, saving as absent"
                    );
                    None
                }
            };
            self.store.capture_if_absent(light_id, brightness);
            debug!(group = %self.name, light = %light_id, ?brightness, "saved light state");
        }

        let commands: Vec<LightCommand> = self
            .lights
            .iter()
            .map(|light_id| LightCommand::TurnOn {
                light_id: light_id.clone(),
                brightness: self.target_brightness,
            })
            .collect();
        self.execute(&commands).await;
        commands
    }

    /// A sensor has been `off` for the debounce duration.
    ///
    /// Re-checks every sensor: if any is still not `off` the event is stale
    /// and nothing happens. Otherwise every light is restored. Returns the
    /// commands sent to the driver.
    pub async fn on_sensor_off_debounced(&mut self, sensor_id: &SensorId) -> Vec<LightCommand> {
        if !self.record(sensor_id, SensorState::Off) {
            return Vec::new();
        }

        if !self.registry.all_off() {
            debug!(
                group = %self.name,
                sensor = %sensor_id,
                active = ?self.registry.active_sensors(),
                "other sensors still active, lights keep their state"
            );
            return Vec::new();
        }

        if self.occupancy.is_occupied() {
            info!(group = %self.name, sensor = %sensor_id, "group unoccupied, restoring lights");
        }
        self.occupancy = Occupancy::Unoccupied;

        let commands: Vec<LightCommand> = self
            .lights
            .iter()
            .map(|light_id| match self.store.consume_and_clear(light_id) {
                Some(brightness) => LightCommand::TurnOn {
                    light_id: light_id.clone(),
                    brightness,
                },
                None => LightCommand::TurnOff {
                    light_id: light_id.clone(),
                },
            })
            .collect();
        self.execute(&commands).await;
        commands
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn occupancy(&self) -> Occupancy {
        self.occupancy
    }

    #[must_use]
    pub fn target_brightness(&self) -> Brightness {
        self.target_brightness
    }

    #[must_use]
    pub fn registry(&self) -> &SensorRegistry {
        &self.registry
    }

    #[must_use]
    pub fn store(&self) -> &LightStateStore {
        &self.store
    }

    #[must_use]
    pub fn driver(&self) -> &D {
        &self.driver
    }

    /// Store the delivered state. Returns `false` for a sensor this group
    /// does not monitor.
    fn record(&mut self, sensor_id: &SensorId, state: SensorState) -> bool {
        match self.registry.update(sensor_id, state) {
            Some(previous) => {
                debug!(group = %self.name, sensor = %sensor_id, %previous, "sensor event");
                true
            }
            None => {
                warn!(group = %self.name, sensor = %sensor_id, "event for unmonitored sensor ignored");
                false
            }
        }
    }

    /// Send commands in order. Failures are logged and not retried.
    async fn execute(&self, commands: &[LightCommand]) {
        for command in commands {
            let result = match command {
                LightCommand::TurnOn {
                    light_id,
                    brightness,
                } => self.driver.turn_on(light_id, *brightness).await,
                LightCommand::TurnOff { light_id } => self.driver.turn_off(light_id).await,
            };
            match result {
                Ok(()) => debug!(group = %self.name, %command, "light command sent"),
                Err(err) => warn!(group = %self.name, %command, error = %err, "light command failed"),
            }
        }
    }
}
