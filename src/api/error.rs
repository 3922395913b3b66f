//! Error types and response handling for the API.
//!
//! Service failures are classified into client and server errors and
//! rendered as a JSON body of the form
//! `{"error": {"type": ..., "message": ...}}`.

use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use thiserror::Error;

use crate::service::{ErrorKind, ServiceError};

/// Message returned for server-side failures; the details are only logged.
const INTERNAL_ERROR_MESSAGE: &str = "An error occurred while processing the request.";

/// Errors returned from API handlers.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The addressed pizza or topping does not exist
    #[error("{0}")]
    NotFound(String),

    /// Name already in use, or a reference to a missing topping
    #[error("{0}")]
    Conflict(String),

    /// The request body, path or field values are not acceptable
    #[error("{0}")]
    InvalidRequest(String),

    /// Anything else
    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<ServiceError> for ApiError {
    fn from(err: ServiceError) -> Self {
        let message = err.to_string();
        match err.kind() {
            ErrorKind::NotFound => ApiError::NotFound(message),
            ErrorKind::Conflict => ApiError::Conflict(message),
            ErrorKind::Invalid => ApiError::InvalidRequest(message),
            ErrorKind::Unexpected => ApiError::Internal(message),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::InvalidRequest(rejection.body_text())
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        ApiError::InvalidRequest(rejection.body_text())
    }
}

impl ApiError {
    /// Map error variant to appropriate HTTP status code
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Conflict(_) => StatusCode::BAD_REQUEST,
            ApiError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get error type string for JSON responses
    pub fn error_type(&self) -> &'static str {
        match self {
            ApiError::NotFound(_) => "not_found",
            ApiError::Conflict(_) => "conflict",
            ApiError::InvalidRequest(_) => "invalid_request",
            ApiError::Internal(_) => "internal_error",
        }
    }

    /// Message safe to show to the client.
    pub fn public_message(&self) -> String {
        match self {
            ApiError::Internal(_) => INTERNAL_ERROR_MESSAGE.to_string(),
            other => other.to_string(),
        }
    }
}

/// Builder for standardized error responses
pub struct ErrorResponse;

impl ErrorResponse {
    pub fn from_error(err: &ApiError) -> Response {
        let body = serde_json::json!({
            "error": {
                "type": err.error_type(),
                "message": err.public_message(),
            }
        });

        (err.status_code(), Json(body)).into_response()
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match &self {
            ApiError::Internal(detail) => tracing::error!(error = %detail, "Request failed"),
            other => tracing::warn!(error_type = other.error_type(), error = %other, "Request rejected"),
        }
        ErrorResponse::from_error(&self)
    }
}
