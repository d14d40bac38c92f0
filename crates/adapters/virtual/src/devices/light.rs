//! Virtual dimmable light.

use occulight_domain::light::Brightness;

/// A simulated dimmable light.
///
/// An off light has no brightness to report, like most real bulbs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct VirtualLight {
    brightness: Option<Brightness>,
}

impl VirtualLight {
    /// A light that is on at `brightness`, or off when `None`.
    #[must_use]
    pub fn new(brightness: Option<Brightness>) -> Self {
        Self { brightness }
    }

    pub fn turn_on(&mut self, brightness: Brightness) {
        self.brightness = Some(brightness);
    }

    pub fn turn_off(&mut self) {
        self.brightness = None;
    }

    #[must_use]
    pub fn is_on(&self) -> bool {
        self.brightness.is_some()
    }

    #[must_use]
    pub fn brightness(&self) -> Option<Brightness> {
        self.brightness
    }
}
