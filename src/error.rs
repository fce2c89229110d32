use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("not found: {0}")]
    NotFound(String),

    #[error("bad request: {0}")]
    BadRequest(String),

    #[error("configuration error: {0}")]
    Configuration(String),

    #[error("internal error: {0}")]
    Internal(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg.clone()),
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            AppError::Configuration(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg.clone()),
            AppError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg.clone()),
        };

        let body = Json(json!({
            "success": false,
            "error": message
        }));

        (status, body).into_response()
    }
}

/// Failure taxonomy of the estimation core. Stages 1-3 of the provider
/// chain swallow these into "try the next stage"; only a terminal failure
/// of the geometric fallback reaches a caller.
#[derive(Debug, Error)]
pub enum RouteError {
    #[error("address is not routable: {0}")]
    AddressInvalid(String),

    #[error("could not geocode address: {0}")]
    GeocodeNotFound(String),

    #[error("routing provider failed: {0}")]
    Provider(String),

    #[error("configuration error: {0}")]
    Configuration(String),
}

impl From<reqwest::Error> for RouteError {
    fn from(err: reqwest::Error) -> Self {
        RouteError::Provider(err.to_string())
    }
}
