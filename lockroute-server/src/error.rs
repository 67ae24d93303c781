use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use lockroute_core::WaypointId;
use serde_json::json;
use tracing::error;

pub type ApiResult<T> = Result<T, ApiError>;

#[derive(Debug)]
pub enum ApiError {
    WaypointNotFound(WaypointId),
    /// Request body parsed but carries unusable values
    Invalid(String),
    Internal(String),
}

impl From<lockroute_core::Error> for ApiError {
    fn from(err: lockroute_core::Error) -> Self {
        match err {
            lockroute_core::Error::InvalidData(message) => Self::Invalid(message),
            other => Self::Internal(other.to_string()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            Self::WaypointNotFound(id) => (
                StatusCode::NOT_FOUND,
                format!("No waypoint with id {id}"),
            ),
            Self::Invalid(message) => (StatusCode::UNPROCESSABLE_ENTITY, message),
            Self::Internal(message) => {
                error!("Request failed: {message}");
                (StatusCode::INTERNAL_SERVER_ERROR, message)
            }
        };
        (status, Json(json!({ "error": message }))).into_response()
    }
}
