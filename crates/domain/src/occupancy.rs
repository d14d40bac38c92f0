//! Occupancy — the aggregate on/off signal of a group of sensors.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::sensor::SensorState;

/// Logical occupancy of a light group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Occupancy {
    Occupied,
    #[default]
    Unoccupied,
}

impl Occupancy {
    /// Derive occupancy from the current sensor states: occupied iff at
    /// least one sensor is `on`.
    #[must_use]
    pub fn from_states<'a>(states: impl IntoIterator<Item = &'a SensorState>) -> Self {
        if states.into_iter().any(SensorState::is_on) {
            Self::Occupied
        } else {
            Self::Unoccupied
        }
    }

    #[must_use]
    pub fn is_occupied(self) -> bool {
        matches!(self, Self::Occupied)
    }
}

impl fmt::Display for Occupancy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Occupied => f.write_str("occupied"),
            Self::Unoccupied => f.write_str("unoccupied"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_be_occupied_when_any_sensor_is_on() {
        let states = [SensorState::Off, SensorState::On, SensorState::Unknown];
        assert_eq!(Occupancy::from_states(&states), Occupancy::Occupied);
    }

    #[test]
    fn should_be_unoccupied_when_all_sensors_are_off() {
        let states = [SensorState::Off, SensorState::Off];
        assert_eq!(Occupancy::from_states(&states), Occupancy::Unoccupied);
    }

    #[test]
    fn should_not_count_unknown_as_on() {
        let states = [SensorState::Unknown, SensorState::Other("x".to_string())];
        assert_eq!(Occupancy::from_states(&states), Occupancy::Unoccupied);
    }

    #[test]
    fn should_display_lowercase() {
        assert_eq!(Occupancy::Occupied.to_string(), "occupied");
        assert_eq!(Occupancy::Unoccupied.to_string(), "unoccupied");
    }
}
