//! JSON API handler modules.

#[allow(clippy::missing_errors_doc)]
pub mod groups;
#[allow(clippy::missing_errors_doc)]
pub mod sensors;

use axum::Router;
use axum::routing::{get, put};

use occulight_app::ports::SensorFeed;

use crate::state::AppState;

/// Build the `/api` sub-router.
pub fn routes<F>() -> Router<AppState<F>>
where
    F: SensorFeed + Send + Sync + 'static,
{
    Router::new()
        .route("/groups", get(groups::list::<F>))
        .route("/groups/{name}", get(groups::get::<F>))
        .route("/sensors/{id}/state", put(sensors::update_state::<F>))
}
