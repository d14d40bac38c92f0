//! # occulight-adapter-http-axum
//!
//! HTTP adapter built on [axum](https://docs.rs/axum).
//!
//! ## Responsibilities
//! - Serve a small **JSON API** for inspecting light groups
//!   (`/api/groups`, `/api/groups/{name}`)
//! - Accept raw sensor readings (`PUT /api/sensors/{id}/state`) and hand
//!   them to a [`SensorFeed`](occulight_app::ports::SensorFeed), which is
//!   how the virtual integration is driven from outside
//! - Map application errors into HTTP responses
//!
//! ## Dependency rule
//! Depends on `occulight-app` (port traits, controller status) and
//! `occulight-domain` (types used in request/response mapping). Never leaks
//! axum types into the domain.

pub mod api;
pub mod error;
pub mod router;
pub mod state;
