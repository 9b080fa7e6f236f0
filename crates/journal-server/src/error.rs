//! HTTP error responses.

use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use journal_core::Error;
use serde::Serialize;
use tracing::error;

/// Error returned from route handlers
#[derive(Debug)]
pub enum ApiError {
    NotFound(String),
    InvalidBody(JsonRejection),
    Core(Error),
}

#[derive(Serialize)]
struct ErrorResponse {
    error: String,
    code: String,
}

impl From<Error> for ApiError {
    fn from(e: Error) -> Self {
        ApiError::Core(e)
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::InvalidBody(rejection)
    }
}

impl ApiError {
    fn parts(&self) -> (StatusCode, &'static str) {
        match self {
            ApiError::NotFound(_) => (StatusCode::NOT_FOUND, "NOT_FOUND"),
            ApiError::InvalidBody(rejection) => (rejection.status(), "INVALID_BODY"),
            ApiError::Core(Error::LlmNotConfigured) => {
                (StatusCode::SERVICE_UNAVAILABLE, "LLM_NOT_CONFIGURED")
            }
            ApiError::Core(Error::EmptyResponse) => (StatusCode::BAD_GATEWAY, "EMPTY_RESPONSE"),
            ApiError::Core(Error::MalformedAnalysis(_)) => {
                (StatusCode::BAD_GATEWAY, "MALFORMED_ANALYSIS")
            }
            ApiError::Core(e) if e.is_upstream() => (StatusCode::BAD_GATEWAY, "LLM_ERROR"),
            ApiError::Core(_) => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL"),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code) = self.parts();
        let message = match &self {
            ApiError::NotFound(what) => format!("{} not found", what),
            ApiError::InvalidBody(rejection) => rejection.body_text(),
            ApiError::Core(e) => e.to_string(),
        };

        if status.is_server_error() {
            error!("{} ({})", message, code);
        }

        let body = Json(ErrorResponse {
            error: message,
            code: code.to_string(),
        });

        (status, body).into_response()
    }
}
