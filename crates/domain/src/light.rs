//! Light — brightness, saved pre-automation state and commands.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::id::LightId;
use crate::time::Timestamp;

/// Light brightness as a percentage (`0..=100`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "u8")]
pub struct Brightness(u8);

impl Brightness {
    pub const MAX: Self = Self(100);

    /// Build a brightness from a percentage.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::BrightnessOutOfRange`] if `percent > 100`.
    pub fn new(percent: u8) -> Result<Self, ValidationError> {
        Self::try_from(i64::from(percent))
    }

    #[must_use]
    pub fn percent(self) -> u8 {
        self.0
    }
}

impl Default for Brightness {
    fn default() -> Self {
        Self::MAX
    }
}

impl TryFrom<i64> for Brightness {
    type Error = ValidationError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        u8::try_from(value)
            .ok()
            .filter(|v| *v <= 100)
            .map(Self)
            .ok_or(ValidationError::BrightnessOutOfRange(value))
    }
}

impl From<Brightness> for u8 {
    fn from(b: Brightness) -> Self {
        b.0
    }
}

impl fmt::Display for Brightness {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.0)
    }
}

/// Brightness recorded for a light when the group became occupied.
///
/// `brightness` is `None` when the light had no queryable brightness
/// (typically because it was off); restoring such an entry turns the light off.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LightSavedState {
    pub light_id: LightId,
    pub brightness: Option<Brightness>,
    pub captured_at: Timestamp,
}

/// A command issued to a light driver.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "command", rename_all = "snake_case")]
pub enum LightCommand {
    TurnOn {
        light_id: LightId,
        brightness: Brightness,
    },
    TurnOff {
        light_id: LightId,
    },
}

impl LightCommand {
    /// The light this command targets.
    #[must_use]
    pub fn light_id(&self) -> &LightId {
        match self {
            Self::TurnOn { light_id, .. } | Self::TurnOff { light_id } => light_id,
        }
    }
}

impl fmt::Display for LightCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TurnOn {
                light_id,
                brightness,
            } => write!(f, "turn_on({light_id}, {brightness})"),
            Self::TurnOff { light_id } => write!(f, "turn_off({light_id})"),
        }
    }
}
