//! Sensor — a presence/motion input and its last-known state.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::id::SensorId;

/// Last-known state reported for a sensor.
///
/// Values other than `on`, `off` and `unknown` are kept verbatim in
/// [`Other`](Self::Other) so they can be logged and reported, but they never
/// count as `off`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum SensorState {
    On,
    Off,
    #[default]
    Unknown,
    Other(String),
}

impl SensorState {
    /// Interpret a raw state string as reported by a driver.
    ///
    /// Matching is exact: `"ON"` is not `on`.
    #[must_use]
    pub fn from_raw(raw: &str) -> Self {
        match raw {
            "on" => Self::On,
            "off" => Self::Off,
            "unknown" => Self::Unknown,
            other => Self::Other(other.to_string()),
        }
    }

    #[must_use]
    pub fn is_on(&self) -> bool {
        matches!(self, Self::On)
    }

    /// Whether the sensor reports exactly `off`.
    #[must_use]
    pub fn is_off(&self) -> bool {
        matches!(self, Self::Off)
    }

    /// Whether the value is one of the states the system understands.
    #[must_use]
    pub fn is_recognized(&self) -> bool {
        !matches!(self, Self::Other(_))
    }
}

impl fmt::Display for SensorState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::On => f.write_str("on"),
            Self::Off => f.write_str("off"),
            Self::Unknown => f.write_str("unknown"),
            Self::Other(raw) => f.write_str(raw),
        }
    }
}

impl From<String> for SensorState {
    fn from(raw: String) -> Self {
        Self::from_raw(&raw)
    }
}

impl From<SensorState> for String {
    fn from(state: SensorState) -> Self {
        state.to_string()
    }
}

/// A monitored sensor and the state last delivered for it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sensor {
    pub id: SensorId,
    pub state: SensorState,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_default_to_unknown() {
        assert_eq!(SensorState::default(), SensorState::Unknown);
    }

    #[test]
    fn should_parse_known_raw_states() {
        assert_eq!(SensorState::from_raw("on"), SensorState::On);
        assert_eq!(SensorState::from_raw("off"), SensorState::Off);
        assert_eq!(SensorState::from_raw("unknown"), SensorState::Unknown);
    }

    #[test]
    fn should_keep_unrecognized_raw_state_verbatim() {
        let state = SensorState::from_raw("unavailable");
        assert_eq!(state, SensorState::Other("unavailable".to_string()));
        assert_eq!(state.to_string(), "unavailable");
        assert!(!state.is_recognized());
    }

    #[test]
    fn should_match_case_sensitively() {
        assert!(!SensorState::from_raw("OFF").is_off());
    }

    #[test]
    fn should_only_treat_exact_off_as_off() {
        assert!(SensorState::Off.is_off());
        assert!(!SensorState::On.is_off());
        assert!(!SensorState::Unknown.is_off());
        assert!(!SensorState::Other("idle".to_string()).is_off());
    }

    #[test]
    fn should_roundtrip_through_serde_json() {
        let json = serde_json::to_string(&SensorState::On).unwrap();
        assert_eq!(json, "\"on\"");
        let parsed: SensorState = serde_json::from_str("\"tampered\"").unwrap();
        assert_eq!(parsed, SensorState::Other("tampered".to_string()));
    }
}
