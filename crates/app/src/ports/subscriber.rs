//! Event subscription port — the event source a controller listens to.

use std::future::Future;

use tokio::sync::mpsc;

use occulight_domain::error::OccuLightError;
use occulight_domain::event::{SensorEvent, Trigger};
use occulight_domain::id::SensorId;

/// Delivers filtered sensor transitions.
///
/// For [`Trigger::BecameOffAfter`] the source is expected to deliver only
/// once the sensor has held `off` for the whole duration. Controllers do not
/// rely on it: every debounced "off" is re-validated against all sensors.
pub trait EventSubscriber {
    /// Register interest in `trigger` for `sensor_id`. Matching events are
    /// sent on `events` until the receiving side is dropped.
    fn subscribe(
        &self,
        sensor_id: &SensorId,
        trigger: Trigger,
        events: mpsc::Sender<SensorEvent>,
    ) -> impl Future<Output = Result<(), OccuLightError>> + Send;
}

impl<T: EventSubscriber + Send + Sync> EventSubscriber for std::sync::Arc<T> {
    fn subscribe(
        &self,
        sensor_id: &SensorId,
        trigger: Trigger,
        events: mpsc::Sender<SensorEvent>,
    ) -> impl Future<Output = Result<(), OccuLightError>> + Send {
        (**self).subscribe(sensor_id, trigger, events)
    }
}
