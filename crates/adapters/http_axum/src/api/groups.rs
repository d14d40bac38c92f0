//! JSON handlers for light group status.

use axum::Json;
use axum::extract::{Path, State};
use axum::response::{IntoResponse, Response};

use occulight_app::controller::GroupStatus;
use occulight_app::ports::SensorFeed;
use occulight_domain::error::NotFoundError;

use crate::error::ApiError;
use crate::state::AppState;

/// Possible responses from the list endpoint.
pub enum ListResponse {
    Ok(Json<Vec<GroupStatus>>),
}

impl IntoResponse for ListResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(json) => json.into_response(),
        }
    }
}

/// Possible responses from the get endpoint.
pub enum GetResponse {
    Ok(Json<GroupStatus>),
}

impl IntoResponse for GetResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(json) => json.into_response(),
        }
    }
}

/// `GET /api/groups`
pub async fn list<F>(State(state): State<AppState<F>>) -> ListResponse
where
    F: SensorFeed + Send + Sync + 'static,
{
    ListResponse::Ok(Json(state.statuses()))
}

/// `GET /api/groups/{name}`
pub async fn get<F>(
    State(state): State<AppState<F>>,
    Path(name): Path<String>,
) -> Result<GetResponse, ApiError>
where
    F: SensorFeed + Send + Sync + 'static,
{
    let status = state.status(&name).ok_or(NotFoundError {
        entity: "Group",
        id: name,
    })?;
    Ok(GetResponse::Ok(Json(status)))
}
