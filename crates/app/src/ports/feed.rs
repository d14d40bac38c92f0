//! Sensor feed port — raw sensor readings pushed in from an outer surface.

use std::future::Future;

use occulight_domain::error::OccuLightError;
use occulight_domain::id::SensorId;
use occulight_domain::sensor::SensorState;

/// Accepts raw readings for sensors owned by an integration.
///
/// Implementations turn readings into [`SensorEvent`](occulight_domain::event::SensorEvent)s
/// for their subscribers, applying any debounce themselves.
pub trait SensorFeed {
    /// Record a new reading for `sensor_id`.
    ///
    /// Fails with [`OccuLightError::NotFound`] for a sensor the integration
    /// does not know.
    fn report(
        &self,
        sensor_id: &SensorId,
        state: SensorState,
    ) -> impl Future<Output = Result<(), OccuLightError>> + Send;
}

impl<T: SensorFeed + Send + Sync> SensorFeed for std::sync::Arc<T> {
    fn report(
        &self,
        sensor_id: &SensorId,
        state: SensorState,
    ) -> impl Future<Output = Result<(), OccuLightError>> + Send {
        (**self).report(sensor_id, state)
    }
}
