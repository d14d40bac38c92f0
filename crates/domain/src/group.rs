//! Light group — a fixed set of sensors driving a fixed set of lights.

use std::collections::HashSet;
use std::time::Duration;

use crate::error::{OccuLightError, ValidationError};
use crate::id::{LightId, SensorId};
use crate::light::Brightness;

/// How long a sensor has to stay off before its "off" is trusted when
/// nothing is configured.
pub const DEFAULT_LIGHT_OFF_TIMEOUT: Duration = Duration::from_secs(1);

/// One independently controlled group of lights and the sensors watching it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LightGroup {
    pub name: String,
    /// Sensors in configured order.
    pub sensors: Vec<SensorId>,
    /// Lights in configured order.
    pub lights: Vec<LightId>,
    pub light_off_timeout: Duration,
    /// Brightness applied to every light while the group is occupied.
    pub light_brightness: Brightness,
}

impl LightGroup {
    /// Create a builder for constructing a [`LightGroup`].
    #[must_use]
    pub fn builder() -> LightGroupBuilder {
        LightGroupBuilder::default()
    }

    /// Check domain invariants.
    ///
    /// # Errors
    ///
    /// Returns [`OccuLightError::Validation`] when:
    /// - `name` is empty ([`ValidationError::EmptyGroupName`])
    /// - there are no sensors or no lights
    /// - a sensor or light appears twice
    pub fn validate(&self) -> Result<(), OccuLightError> {
        if self.name.trim().is_empty() {
            return Err(ValidationError::EmptyGroupName.into());
        }
        if self.sensors.is_empty() {
            return Err(ValidationError::NoSensors.into());
        }
        if self.lights.is_empty() {
            return Err(ValidationError::NoLights.into());
        }
        let mut seen = HashSet::new();
        if let Some(dup) = self.sensors.iter().find(|s| !seen.insert(*s)) {
            return Err(ValidationError::DuplicateSensor(dup.to_string()).into());
        }
        let mut seen = HashSet::new();
        if let Some(dup) = self.lights.iter().find(|l| !seen.insert(*l)) {
            return Err(ValidationError::DuplicateLight(dup.to_string()).into());
        }
        Ok(())
    }
}

/// Step-by-step builder for [`LightGroup`].
#[derive(Debug, Default)]
pub struct LightGroupBuilder {
    name: Option<String>,
    sensors: Vec<SensorId>,
    lights: Vec<LightId>,
    light_off_timeout: Option<Duration>,
    light_brightness: Option<Brightness>,
}

impl LightGroupBuilder {
    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    #[must_use]
    pub fn sensor(mut self, sensor: SensorId) -> Self {
        self.sensors.push(sensor);
        self
    }

    #[must_use]
    pub fn sensors(mut self, sensors: impl IntoIterator<Item = SensorId>) -> Self {
        self.sensors.extend(sensors);
        self
    }

    #[must_use]
    pub fn light(mut self, light: LightId) -> Self {
        self.lights.push(light);
        self
    }

    #[must_use]
    pub fn lights(mut self, lights: impl IntoIterator<Item = LightId>) -> Self {
        self.lights.extend(lights);
        self
    }

    #[must_use]
    pub fn light_off_timeout(mut self, timeout: Duration) -> Self {
        self.light_off_timeout = Some(timeout);
        self
    }

    #[must_use]
    pub fn light_brightness(mut self, brightness: Brightness) -> Self {
        self.light_brightness = Some(brightness);
        self
    }

    /// Consume the builder, validate, and return a [`LightGroup`].
    ///
    /// # Errors
    ///
    /// Returns [`OccuLightError::Validation`] if an invariant does not hold.
    pub fn build(self) -> Result<LightGroup, OccuLightError> {
        let group = LightGroup {
            name: self.name.unwrap_or_default(),
            sensors: self.sensors,
            lights: self.lights,
            light_off_timeout: self.light_off_timeout.unwrap_or(DEFAULT_LIGHT_OFF_TIMEOUT),
            light_brightness: self.light_brightness.unwrap_or_default(),
        };
        group.validate()?;
        Ok(group)
    }
}
