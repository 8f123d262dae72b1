//! API error responses.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::{ErrorKind, FlattextError};

use super::types::ErrorResponse;

/// Body detail for rejected API keys.
pub const UNAUTHORIZED_DETAIL: &str = "Invalid or missing API key";

/// An error rendered as a JSON body with a matching status code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiError {
    pub status: StatusCode,
    pub body: ErrorResponse,
}

impl ApiError {
    pub fn unauthorized() -> Self {
        Self {
            status: StatusCode::UNAUTHORIZED,
            body: ErrorResponse {
                error: UNAUTHORIZED_DETAIL.to_string(),
                kind: None,
            },
        }
    }

    pub fn from_failure(kind: ErrorKind, detail: impl Into<String>) -> Self {
        Self {
            status: status_for(kind),
            body: ErrorResponse {
                error: detail.into(),
                kind: Some(kind.to_string()),
            },
        }
    }
}

/// HTTP status for a failure category.
///
/// Client errors are 4xx; every other failure is a 500.
pub fn status_for(kind: ErrorKind) -> StatusCode {
    if !kind.is_client_error() {
        return StatusCode::INTERNAL_SERVER_ERROR;
    }

    match kind {
        ErrorKind::UnsupportedFormat => StatusCode::UNSUPPORTED_MEDIA_TYPE,
        _ => StatusCode::BAD_REQUEST,
    }
}

impl From<FlattextError> for ApiError {
    fn from(err: FlattextError) -> Self {
        Self::from_failure(err.kind(), err.detail())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if self.status.is_server_error() {
            tracing::error!(status = %self.status, error = %self.body.error, "Request failed");
        } else {
            tracing::debug!(status = %self.status, error = %self.body.error, "Request rejected");
        }
        (self.status, Json(self.body)).into_response()
    }
}
