//! Controller — wires one light group to its event source.
//!
//! Startup seeds the registry from the driver, subscribes to "became on"
//! and "became off after timeout" for every sensor, then processes
//! delivered events one at a time through the [`AggregationEngine`].
//! After every event the controller publishes a fresh [`GroupStatus`].

use std::future::Future;

use serde::Serialize;
use tokio::sync::{mpsc, watch};
use tracing::{debug, info, warn};

use occulight_domain::error::OccuLightError;
use occulight_domain::event::{SensorEvent, Trigger};
use occulight_domain::group::LightGroup;
use occulight_domain::light::{Brightness, LightCommand, LightSavedState};
use occulight_domain::occupancy::Occupancy;
use occulight_domain::sensor::{Sensor, SensorState};
use occulight_domain::time::{Timestamp, now};

use crate::aggregation::AggregationEngine;
use crate::ports::{Driver, EventSubscriber};

/// Capacity of the per-group event channel.
pub const EVENT_CHANNEL_CAPACITY: usize = 64;

/// Point-in-time view of one group, published after every event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GroupStatus {
    pub name: String,
    pub occupancy: Occupancy,
    pub target_brightness: Brightness,
    pub sensors: Vec<Sensor>,
    pub saved: Vec<LightSavedState>,
    pub last_event: Option<SensorEvent>,
    pub last_commands: Vec<LightCommand>,
    pub updated_at: Timestamp,
}

impl GroupStatus {
    fn capture<D: Driver>(
        engine: &AggregationEngine<D>,
        last_event: Option<SensorEvent>,
        last_commands: Vec<LightCommand>,
    ) -> Self {
        Self {
            name: engine.name().to_string(),
            occupancy: engine.occupancy(),
            target_brightness: engine.target_brightness(),
            sensors: engine.registry().snapshot(),
            saved: engine.store().snapshot(),
            last_event,
            last_commands,
            updated_at: now(),
        }
    }
}

/// Event loop for one [`LightGroup`].
pub struct Controller<D> {
    engine: AggregationEngine<D>,
    events: mpsc::Receiver<SensorEvent>,
    status: watch::Sender<GroupStatus>,
}

impl<D: Driver> Controller<D> {
    /// Seed sensor states and subscribe to the group's sensors.
    ///
    /// A sensor whose state cannot be read starts as `unknown`, which keeps
    /// the group from being seen as all-off until it reports.
    ///
    /// # Errors
    ///
    /// Returns an error if the group is invalid or a subscription is refused.
    pub async fn start<S: EventSubscriber>(
        group: LightGroup,
        driver: D,
        subscriber: &S,
    ) -> Result<Self, OccuLightError> {
        group.validate()?;

        let (tx, events) = mpsc::channel(EVENT_CHANNEL_CAPACITY);
        let mut engine = AggregationEngine::new(&group, driver);

        for sensor_id in &group.sensors {
            let state = match engine.driver().get_state(sensor_id).await {
                Ok(state) => state,
                Err(err) => {
                    warn!(group = %group.name, sensor = %sensor_id, error = %err, "failed to read sensor state");
                    SensorState::Unknown
                }
            };
            if !state.is_recognized() {
                warn!(group = %group.name, sensor = %sensor_id, %state, "sensor state is neither on nor off");
            }
            info!(group = %group.name, sensor = %sensor_id, %state, "listening to sensor");
            engine.seed(sensor_id, state);

            subscriber
                .subscribe(sensor_id, Trigger::BecameOn, tx.clone())
                .await?;
            subscriber
                .subscribe(
                    sensor_id,
                    Trigger::BecameOffAfter(group.light_off_timeout),
                    tx.clone(),
                )
                .await?;
        }

        info!(
            group = %group.name,
            lights = group.lights.len(),
            brightness = %group.light_brightness,
            timeout_secs = group.light_off_timeout.as_secs_f64(),
            occupancy = %engine.occupancy(),
            "controller started"
        );

        let (status, _) = watch::channel(GroupStatus::capture(&engine, None, Vec::new()));
        Ok(Self {
            engine,
            events,
            status,
        })
    }

    /// Subscribe to status updates.
    #[must_use]
    pub fn status(&self) -> watch::Receiver<GroupStatus> {
        self.status.subscribe()
    }

    #[must_use]
    pub fn engine(&self) -> &AggregationEngine<D> {
        &self.engine
    }

    /// Process one event and publish the resulting status.
    pub async fn handle_event(&mut self, event: SensorEvent) -> Vec<LightCommand> {
        debug!(group = %self.engine.name(), %event, "handling event");
        let commands = self.engine.handle(&event).await;
        self.status.send_replace(GroupStatus::capture(
            &self.engine,
            Some(event),
            commands.clone(),
        ));
        commands
    }

    /// Process events until every subscription has been dropped.
    pub async fn run(self) {
        self.run_until(std::future::pending()).await;
    }

    /// Process events until `shutdown` resolves or every subscription has
    /// been dropped.
    pub async fn run_until(mut self, shutdown: impl Future<Output = ()>) {
        tokio::pin!(shutdown);
        loop {
            tokio::select! {
                () = &mut shutdown => {
                    info!(group = %self.engine.name(), "controller shutting down");
                    break;
                }
                event = self.events.recv() => {
                    let Some(event) = event else {
                        info!(group = %self.engine.name(), "event source closed, controller stopping");
                        break;
                    };
                    self.handle_event(event).await;
                }
            }
        }
    }
}
