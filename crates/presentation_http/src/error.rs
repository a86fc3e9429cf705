//! API error type and HTTP status mapping

use application::ApplicationError;
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

/// Errors surfaced to API clients
#[derive(Debug, Error)]
pub enum ApiError {
    /// The request was malformed
    #[error("{0}")]
    BadRequest(String),

    /// A backend this endpoint depends on is unavailable
    #[error("{0}")]
    ServiceUnavailable(String),

    /// Anything else
    #[error("Internal server error")]
    Internal(String),
}

impl From<ApplicationError> for ApiError {
    fn from(err: ApplicationError) -> Self {
        match err {
            ApplicationError::ExternalService(msg) => Self::ServiceUnavailable(msg),
            ApplicationError::Domain(e) => Self::BadRequest(e.to_string()),
            other => Self::Internal(other.to_string()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            Self::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            Self::ServiceUnavailable(msg) => (StatusCode::BAD_GATEWAY, msg),
            Self::Internal(msg) => {
                tracing::error!(error = %msg, "Internal server error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            },
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn external_service_maps_to_service_unavailable() {
        let err = ApiError::from(ApplicationError::ExternalService("down".to_string()));
        assert!(matches!(err, ApiError::ServiceUnavailable(_)));
    }

    #[test]
    fn internal_errors_hide_details() {
        let response =
            ApiError::Internal("secret stack trace".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn bad_request_status() {
        let response = ApiError::BadRequest("empty".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn service_unavailable_maps_to_bad_gateway() {
        let response = ApiError::ServiceUnavailable("tts down".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    }
}
