//! JSON handlers for sensor readings.

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Deserialize;

use occulight_app::ports::SensorFeed;
use occulight_domain::id::SensorId;
use occulight_domain::sensor::SensorState;

use crate::error::ApiError;
use crate::state::AppState;

/// Request body for reporting a sensor reading.
///
/// Any string is accepted; values other than `on` and `off` are kept as-is
/// and treated as "not off" by the controllers.
#[derive(Deserialize)]
pub struct UpdateStateRequest {
    pub state: SensorState,
}

/// Possible responses from the update endpoint.
pub enum UpdateResponse {
    NoContent,
}

impl IntoResponse for UpdateResponse {
    fn into_response(self) -> Response {
        match self {
            Self::NoContent => StatusCode::NO_CONTENT.into_response(),
        }
    }
}

/// `PUT /api/sensors/{id}/state`
pub async fn update_state<F>(
    State(state): State<AppState<F>>,
    Path(id): Path<String>,
    Json(req): Json<UpdateStateRequest>,
) -> Result<UpdateResponse, ApiError>
where
    F: SensorFeed + Send + Sync + 'static,
{
    let sensor_id = SensorId::new(id)?;
    tracing::debug!(sensor = %sensor_id, state = %req.state, "sensor reading received");
    state.feed.report(&sensor_id, req.state).await?;
    Ok(UpdateResponse::NoContent)
}
