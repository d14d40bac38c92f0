//! Driver port — queries and commands for the physical sensors and lights.

use std::future::Future;

use occulight_domain::error::OccuLightError;
use occulight_domain::id::{LightId, SensorId};
use occulight_domain::light::Brightness;
use occulight_domain::sensor::SensorState;

/// Talks to the devices of one installation.
///
/// Commands are fire-and-forget from the core's point of view: an `Ok`
/// means the driver accepted the command, not that the bulb changed.
/// The core never retries a failed command.
pub trait Driver {
    /// Current state of a sensor.
    fn get_state(
        &self,
        sensor_id: &SensorId,
    ) -> impl Future<Output = Result<SensorState, OccuLightError>> + Send;

    /// Current brightness of a light, or `None` when it has none to report
    /// (e.g. the light is off).
    fn get_brightness(
        &self,
        light_id: &LightId,
    ) -> impl Future<Output = Result<Option<Brightness>, OccuLightError>> + Send;

    /// Turn a light on at the given brightness.
    fn turn_on(
        &self,
        light_id: &LightId,
        brightness: Brightness,
    ) -> impl Future<Output = Result<(), OccuLightError>> + Send;

    /// Turn a light off.
    fn turn_off(&self, light_id: &LightId)
    -> impl Future<Output = Result<(), OccuLightError>> + Send;
}

impl<T: Driver + Send + Sync> Driver for std::sync::Arc<T> {
    fn get_state(
        &self,
        sensor_id: &SensorId,
    ) -> impl Future<Output = Result<SensorState, OccuLightError>> + Send {
        (**self).get_state(sensor_id)
    }

    fn get_brightness(
        &self,
        light_id: &LightId,
    ) -> impl Future<Output = Result<Option<Brightness>, OccuLightError>> + Send {
        (**self).get_brightness(light_id)
    }

    fn turn_on(
        &self,
        light_id: &LightId,
        brightness: Brightness,
    ) -> impl Future<Output = Result<(), OccuLightError>> + Send {
        (**self).turn_on(light_id, brightness)
    }

    fn turn_off(
        &self,
        light_id: &LightId,
    ) -> impl Future<Output = Result<(), OccuLightError>> + Send {
        (**self).turn_off(light_id)
    }
}
