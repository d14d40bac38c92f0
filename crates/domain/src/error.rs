//! Common error types used across the workspace.
//!
//! Each layer defines its own typed errors and converts into
//! [`OccuLightError`] via `#[from]` at port boundaries.

/// Top-level error returned by ports and application services.
#[derive(Debug, thiserror::Error)]
pub enum OccuLightError {
    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("{0}")]
    NotFound(#[from] NotFoundError),

    /// A device driver failed to answer a query or execute a command.
    #[error("driver error: {0}")]
    Driver(#[source] Box<dyn std::error::Error + Send + Sync>),
}

/// A domain invariant was violated.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("sensor id must not be empty")]
    EmptySensorId,

    #[error("light id must not be empty")]
    EmptyLightId,

    #[error("group name must not be empty")]
    EmptyGroupName,

    #[error("a group needs at least one sensor")]
    NoSensors,

    #[error("a group needs at least one light")]
    NoLights,

    #[error("sensor {0} is listed more than once")]
    DuplicateSensor(String),

    #[error("light {0} is listed more than once")]
    DuplicateLight(String),

    #[error("brightness {0} is outside 0..=100")]
    BrightnessOutOfRange(i64),
}

/// A referenced sensor, light or group does not exist.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{entity} {id} not found")]
pub struct NotFoundError {
    pub entity: &'static str,
    pub id: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_convert_validation_error_into_occulight_error() {
        let err: OccuLightError = ValidationError::NoSensors.into();
        assert!(matches!(err, OccuLightError::Validation(ValidationError::NoSensors)));
    }

    #[test]
    fn should_convert_not_found_error_into_occulight_error() {
        let err: OccuLightError = NotFoundError {
            entity: "Sensor",
            id: "binary_sensor.hall".to_string(),
        }
        .into();
        assert!(matches!(err, OccuLightError::NotFound(_)));
    }

    #[test]
    fn should_display_not_found_with_entity_and_id() {
        let err = NotFoundError {
            entity: "Light",
            id: "light.kitchen".to_string(),
        };
        assert_eq!(err.to_string(), "Light light.kitchen not found");
    }

    #[test]
    fn should_display_out_of_range_brightness() {
        let err = ValidationError::BrightnessOutOfRange(140);
        assert_eq!(err.to_string(), "brightness 140 is outside 0..=100");
    }

    #[test]
    fn should_keep_driver_source_error() {
        let io = std::io::Error::other("bulb unreachable");
        let err = OccuLightError::Driver(Box::new(io));
        let source = std::error::Error::source(&err).unwrap();
        assert_eq!(source.to_string(), "bulb unreachable");
        assert_eq!(err.to_string(), "driver error: bulb unreachable");
    }
}
