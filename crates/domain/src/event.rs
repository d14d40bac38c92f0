//! Events delivered by a sensor event source, and the triggers that select them.

use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::id::SensorId;
use crate::sensor::SensorState;

/// A filtered sensor transition delivered to a controller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SensorEvent {
    /// The sensor switched to `on`. Delivered immediately.
    BecameOn { sensor_id: SensorId },
    /// The sensor switched to `off` and stayed there for the subscribed duration.
    BecameOffDebounced { sensor_id: SensorId },
}

impl SensorEvent {
    #[must_use]
    pub fn sensor_id(&self) -> &SensorId {
        match self {
            Self::BecameOn { sensor_id } | Self::BecameOffDebounced { sensor_id } => sensor_id,
        }
    }
}

impl fmt::Display for SensorEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BecameOn { sensor_id } => write!(f, "became_on({sensor_id})"),
            Self::BecameOffDebounced { sensor_id } => {
                write!(f, "became_off_debounced({sensor_id})")
            }
        }
    }
}

/// Which transitions of a sensor a subscriber wants delivered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trigger {
    /// Deliver as soon as the sensor reports `on`.
    BecameOn,
    /// Deliver once the sensor has continuously reported `off` for the duration.
    BecameOffAfter(Duration),
}

impl Trigger {
    /// Whether a sensor moving to `state` arms this trigger.
    #[must_use]
    pub fn arms_on(self, state: &SensorState) -> bool {
        match self {
            Self::BecameOn => state.is_on(),
            Self::BecameOffAfter(_) => state.is_off(),
        }
    }

    /// Build the event this trigger delivers for `sensor_id`.
    #[must_use]
    pub fn event_for(self, sensor_id: SensorId) -> SensorEvent {
        match self {
            Self::BecameOn => SensorEvent::BecameOn { sensor_id },
            Self::BecameOffAfter(_) => SensorEvent::BecameOffDebounced { sensor_id },
        }
    }
}

impl fmt::Display for Trigger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BecameOn => f.write_str("became_on"),
            Self::BecameOffAfter(d) => write!(f, "became_off_after({}s)", d.as_secs_f64()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sensor() -> SensorId {
        SensorId::new("binary_sensor.hall").unwrap()
    }

    #[test]
    fn should_arm_on_trigger_only_for_on() {
        assert!(Trigger::BecameOn.arms_on(&SensorState::On));
        assert!(!Trigger::BecameOn.arms_on(&SensorState::Off));
        assert!(!Trigger::BecameOn.arms_on(&SensorState::Unknown));
    }

    #[test]
    fn should_arm_off_trigger_only_for_exact_off() {
        let trigger = Trigger::BecameOffAfter(Duration::from_secs(30));
        assert!(trigger.arms_on(&SensorState::Off));
        assert!(!trigger.arms_on(&SensorState::On));
        assert!(!trigger.arms_on(&SensorState::Other("offline".to_string())));
    }

    #[test]
    fn should_build_matching_event() {
        let on = Trigger::BecameOn.event_for(sensor());
        let off = Trigger::BecameOffAfter(Duration::ZERO).event_for(sensor());
        assert_eq!(on, SensorEvent::BecameOn { sensor_id: sensor() });
        assert_eq!(off, SensorEvent::BecameOffDebounced { sensor_id: sensor() });
        assert_eq!(off.sensor_id(), &sensor());
    }

    #[test]
    fn should_display_trigger_with_duration() {
        let trigger = Trigger::BecameOffAfter(Duration::from_secs(30));
        assert_eq!(trigger.to_string(), "became_off_after(30s)");
    }
}
