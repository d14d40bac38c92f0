//! # occulight-adapter-virtual
//!
//! Virtual/demo integration with in-memory occupancy sensors and dimmable
//! lights. It implements every port of `occulight-app`, so a controller can
//! run against it without hardware:
//!
//! | Port | Behaviour |
//! |------|-----------|
//! | `Driver` | reads sensor state and light brightness, applies `turn_on` / `turn_off` |
//! | `EventSubscriber` | delivers `BecameOn` immediately and `BecameOffDebounced` after the sensor held `off` for the subscribed duration |
//! | `SensorFeed` | accepts raw readings (e.g. from the HTTP API) and fires the subscriptions |
//!
//! ## Dependency rule
//!
//! Depends on `occulight-app` (port traits, debouncer) and `occulight-domain` only.

mod devices;

use std::collections::{HashMap, VecDeque};
use std::sync::{Mutex, MutexGuard, PoisonError};

use tokio::sync::mpsc;
use tracing::{debug, info, trace, warn};

use occulight_app::debounce::Debouncer;
use occulight_app::ports::{Driver, EventSubscriber, SensorFeed};
use occulight_domain::error::{NotFoundError, OccuLightError};
use occulight_domain::event::{SensorEvent, Trigger};
use occulight_domain::id::{LightId, SensorId};
use occulight_domain::light::{Brightness, LightCommand};
use occulight_domain::sensor::SensorState;

pub use devices::VirtualLight;
use devices::VirtualSensor;

/// Number of light commands kept by [`VirtualHome::history`].
pub const HISTORY_CAPACITY: usize = 256;

#[derive(Debug, Default)]
struct Inner {
    sensors: HashMap<SensorId, VirtualSensor>,
    lights: HashMap<LightId, VirtualLight>,
    /// One pending "off" delivery per (sensor, subscription id).
    debouncer: Debouncer<(SensorId, u64)>,
    history: VecDeque<LightCommand>,
}

/// In-memory home with simulated sensors and lights.
#[derive(Debug, Default)]
pub struct VirtualHome {
    inner: Mutex<Inner>,
}

impl VirtualHome {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a sensor with an initial state. A sensor that already exists is
    /// left untouched and `false` is returned.
    pub fn add_sensor(&self, sensor_id: SensorId, state: SensorState) -> bool {
        let mut inner = self.lock();
        if inner.sensors.contains_key(&sensor_id) {
            return false;
        }
        inner.sensors.insert(sensor_id, VirtualSensor::new(state));
        true
    }

    /// Add a light, on at `brightness` or off when `None`. A light that
    /// already exists is left untouched and `false` is returned.
    pub fn add_light(&self, light_id: LightId, brightness: Option<Brightness>) -> bool {
        let mut inner = self.lock();
        if inner.lights.contains_key(&light_id) {
            return false;
        }
        inner.lights.insert(light_id, VirtualLight::new(brightness));
        true
    }

    #[must_use]
    pub fn sensor_state(&self, sensor_id: &SensorId) -> Option<SensorState> {
        self.lock().sensors.get(sensor_id).map(|s| s.state().clone())
    }

    #[must_use]
    pub fn light(&self, light_id: &LightId) -> Option<VirtualLight> {
        self.lock().lights.get(light_id).copied()
    }

    /// The last [`HISTORY_CAPACITY`] commands applied to a light, oldest
    /// first.
    #[must_use]
    pub fn history(&self) -> Vec<LightCommand> {
        self.lock().history.iter().cloned().collect()
    }

    #[cfg(test)]
    fn has_pending_off(&self, sensor_id: &SensorId) -> bool {
        let inner = self.lock();
        let Some(sensor) = inner.sensors.get(sensor_id) else {
            return false;
        };
        sensor
            .subscriptions()
            .any(|s| inner.debouncer.is_pending(&(sensor_id.clone(), s.id)))
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn apply(&self, command: LightCommand) -> Result<(), OccuLightError> {
        let mut inner = self.lock();
        let light = inner
            .lights
            .get_mut(command.light_id())
            .ok_or_else(|| not_found("Light", command.light_id().as_str()))?;
        match &command {
            LightCommand::TurnOn { brightness, .. } => light.turn_on(*brightness),
            LightCommand::TurnOff { .. } => light.turn_off(),
        }
        info!(%command, "virtual light updated");
        if inner.history.len() == HISTORY_CAPACITY {
            inner.history.pop_front();
        }
        inner.history.push_back(command);
        Ok(())
    }
}

fn not_found(entity: &'static str, id: &str) -> OccuLightError {
    NotFoundError {
        entity,
        id: id.to_string(),
    }
    .into()
}

impl Driver for VirtualHome {
    async fn get_state(&self, sensor_id: &SensorId) -> Result<SensorState, OccuLightError> {
        self.sensor_state(sensor_id)
            .ok_or_else(|| not_found("Sensor", sensor_id.as_str()))
    }

    async fn get_brightness(&self, light_id: &LightId) -> Result<Option<Brightness>, OccuLightError> {
        self.light(light_id)
            .map(|l| l.brightness())
            .ok_or_else(|| not_found("Light", light_id.as_str()))
    }

    async fn turn_on(&self, light_id: &LightId, brightness: Brightness) -> Result<(), OccuLightError> {
        self.apply(LightCommand::TurnOn {
            light_id: light_id.clone(),
            brightness,
        })
    }

    async fn turn_off(&self, light_id: &LightId) -> Result<(), OccuLightError> {
        self.apply(LightCommand::TurnOff {
            light_id: light_id.clone(),
        })
    }
}

impl EventSubscriber for VirtualHome {
    async fn subscribe(
        &self,
        sensor_id: &SensorId,
        trigger: Trigger,
        events: mpsc::Sender<SensorEvent>,
    ) -> Result<(), OccuLightError> {
        let mut inner = self.lock();
        let sensor = inner
            .sensors
            .get_mut(sensor_id)
            .ok_or_else(|| not_found("Sensor", sensor_id.as_str()))?;
        let id = sensor.subscribe(trigger, events);
        debug!(sensor = %sensor_id, %trigger, subscription = id, "subscribed");
        Ok(())
    }
}

impl SensorFeed for VirtualHome {
    async fn report(&self, sensor_id: &SensorId, state: SensorState) -> Result<(), OccuLightError> {
        let immediate = {
            let mut inner = self.lock();
            let Inner {
                sensors, debouncer, ..
            } = &mut *inner;
            let sensor = sensors
                .get_mut(sensor_id)
                .ok_or_else(|| not_found("Sensor", sensor_id.as_str()))?;
            if !sensor.set_state(state.clone()) {
                trace!(sensor = %sensor_id, %state, "reading unchanged");
                return Ok(());
            }
            if state.is_recognized() {
                debug!(sensor = %sensor_id, %state, "sensor changed");
            } else {
                warn!(sensor = %sensor_id, %state, "sensor state is neither on nor off");
            }

            let mut immediate = Vec::new();
            for subscription in sensor.subscriptions() {
                let trigger = subscription.trigger;
                let key = (sensor_id.clone(), subscription.id);
                match trigger {
                    Trigger::BecameOn => {
                        if trigger.arms_on(&state) {
                            immediate.push((
                                subscription.events.clone(),
                                trigger.event_for(sensor_id.clone()),
                            ));
                        }
                    }
                    Trigger::BecameOffAfter(delay) => {
                        if trigger.arms_on(&state) {
                            debouncer.schedule(
                                key,
                                delay,
                                trigger.event_for(sensor_id.clone()),
                                subscription.events.clone(),
                            );
                        } else if debouncer.cancel(&key) {
                            debug!(sensor = %sensor_id, %state, "pending off cancelled");
                        }
                    }
                }
            }
            immediate
        };

        for (events, event) in immediate {
            if events.send(event).await.is_err() {
                debug!(sensor = %sensor_id, "subscriber gone, event dropped");
            }
        }
        Ok(())
    }
}
