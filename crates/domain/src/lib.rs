//! # occulight-domain
//!
//! Pure domain model for the occulight occupancy lighting system.
//!
//! ## Responsibilities
//! - Foundational types: typed identifiers, error conventions, timestamps
//! - Define **Sensors** (presence/motion inputs and their on/off state)
//! - Define **Lights** (brightness, saved pre-automation state, commands)
//! - Define **Groups** (a fixed set of sensors driving a fixed set of lights)
//! - Define **Occupancy** (the aggregate signal derived from all sensors)
//! - Define **Events** and **Triggers** (what an event source delivers)
//! - Contain all invariant enforcement
//!
//! ## Dependency rule
//! This crate has **no internal dependencies**.
//! It must never import anything from `app`, adapters, or external IO crates.
//! All IO boundaries are expressed as traits in the `app` crate (ports).

pub mod error;
pub mod id;
pub mod time;

pub mod event;
pub mod group;
pub mod light;
pub mod occupancy;
pub mod sensor;
