//! # occulight-app
//!
//! Application layer — the occupancy aggregation core and **port definitions** (traits).
//!
//! ## Responsibilities
//! - Define **port traits** that adapters must implement:
//!   - `Driver` — query sensors/lights and send light commands
//!   - `EventSubscriber` — deliver filtered sensor transitions
//!   - `SensorFeed` — accept raw sensor readings from an outer surface
//! - Hold the per-group state: `SensorRegistry` and `LightStateStore`
//! - Decide what to do with lights: `AggregationEngine`
//! - Route events for one group: `Controller`
//! - Provide **in-process infrastructure** that doesn't need IO (debounce timers)
//!
//! ## Dependency rule
//! Depends on `occulight-domain` only (plus `tokio` for channels and timers).
//! Never imports adapter crates. Adapters depend on *this* crate, not the reverse.

pub mod aggregation;
pub mod controller;
pub mod debounce;
pub mod light_store;
pub mod ports;
pub mod registry;
