// Rust guideline compliant 2026-10-16

//! API error type and its `{ "error": "..." }` response body.

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use dispatcher::DispatchError;
use serde::Serialize;

pub const MISSING_COORDINATES: &str = "Missing latitude or longitude";
pub const INVALID_COORDINATES: &str = "Invalid latitude or longitude";
pub const LOCATION_FAILED: &str = "Failed to get address";
pub const HOSPITALS_FAILED: &str = "Failed to find hospitals";
pub const SEND_FAILED: &str = "Failed to send and log SOS alert";

/// Flat error body returned for every failure.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
}

/// API-level errors with HTTP status mapping.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Missing latitude or longitude")]
    MissingCoordinates,
    #[error("Invalid latitude or longitude")]
    InvalidCoordinates,
    #[error("Invalid request: {0}")]
    BadRequest(String),
    /// A required upstream failed. Only `public` reaches the client.
    #[error("{public}: {detail}")]
    Upstream { public: &'static str, detail: String },
}

impl ApiError {
    pub fn upstream(public: &'static str, cause: impl std::fmt::Display) -> Self {
        Self::Upstream { public, detail: cause.to_string() }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::MissingCoordinates => (StatusCode::BAD_REQUEST, MISSING_COORDINATES.to_owned()),
            ApiError::InvalidCoordinates => (StatusCode::BAD_REQUEST, INVALID_COORDINATES.to_owned()),
            ApiError::BadRequest(detail) => (StatusCode::BAD_REQUEST, format!("Invalid request: {detail}")),
            ApiError::Upstream { public, detail } => {
                tracing::error!(%detail, "api.upstream.failed");
                (StatusCode::INTERNAL_SERVER_ERROR, public.to_owned())
            }
        };
        (status, Json(ErrorBody { error: message })).into_response()
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

/// Dispatch failures all surface from `/api/sendsms`.
impl From<DispatchError> for ApiError {
    fn from(err: DispatchError) -> Self {
        match err {
            DispatchError::MissingCoordinates => ApiError::MissingCoordinates,
            DispatchError::InvalidCoordinates(_) => ApiError::InvalidCoordinates,
            other @ (DispatchError::InvalidConfig { .. }
            | DispatchError::Publish(_)
            | DispatchError::Record { .. }) => ApiError::upstream(SEND_FAILED, other),
        }
    }
}
