//! Typed identifier newtypes backed by the device's entity-id string
//! (e.g. `binary_sensor.hall_motion`, `light.hall_ceiling`).

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

macro_rules! define_id {
    ($(#[doc = $doc:expr])* $name:ident, $empty:ident) => {
        $(#[doc = $doc])*
        #[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(try_from = "String", into = "String")]
        pub struct $name(String);

        impl $name {
            /// Wrap a non-empty identifier, trimming surrounding whitespace.
            ///
            /// # Errors
            ///
            #[doc = concat!("Returns [`ValidationError::", stringify!($empty), "`] if the identifier is blank.")]
            pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
                let value = value.into();
                let trimmed = value.trim();
                if trimmed.is_empty() {
                    return Err(ValidationError::$empty);
                }
                Ok(Self(trimmed.to_string()))
            }

            /// Access the inner identifier.
            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl FromStr for $name {
            type Err = ValidationError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::new(s)
            }
        }

        impl TryFrom<String> for $name {
            type Error = ValidationError;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }

        impl From<$name> for String {
            fn from(id: $name) -> Self {
                id.0
            }
        }
    };
}

define_id!(
    /// Identifier of a presence/motion [`Sensor`](crate::sensor::Sensor).
    SensorId,
    EmptySensorId
);

define_id!(
    /// Identifier of a controllable light.
    LightId,
    EmptyLightId
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_keep_identifier_verbatim() {
        let id = SensorId::new("binary_sensor.hall_motion").unwrap();
        assert_eq!(id.as_str(), "binary_sensor.hall_motion");
    }

    #[test]
    fn should_trim_surrounding_whitespace() {
        let id = LightId::new("  light.desk ").unwrap();
        assert_eq!(id.as_str(), "light.desk");
    }

    #[test]
    fn should_reject_blank_sensor_id() {
        assert_eq!(SensorId::new("   "), Err(ValidationError::EmptySensorId));
    }

    #[test]
    fn should_reject_empty_light_id() {
        assert_eq!(LightId::from_str(""), Err(ValidationError::EmptyLightId));
    }

    #[test]
    fn should_roundtrip_through_display_and_from_str() {
        let id = LightId::new("light.kitchen").unwrap();
        let parsed: LightId = id.to_string().parse().unwrap();
        assert_eq!(id, parsed);
    }

    #[test]
    fn should_serialize_as_plain_string() {
        let id = SensorId::new("binary_sensor.porch").unwrap();
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"binary_sensor.porch\"");
    }

    #[test]
    fn should_fail_to_deserialize_empty_string() {
        let result: Result<SensorId, _> = serde_json::from_str("\"\"");
        assert!(result.is_err());
    }
}
