//! Virtual device implementations — occupancy sensor and dimmable light.

mod light;
mod sensor;

pub use light::VirtualLight;
pub use sensor::VirtualSensor;
