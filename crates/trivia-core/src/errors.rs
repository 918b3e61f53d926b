//! Application error type.
//!
//! Every failure surfaced by a handler is an [`AppError`]: an HTTP status
//! paired with the underlying [`anyhow::Error`]. The inner error is logged
//! when the response is rendered; the client only ever sees the uniform body
//!
//! ```json
//! { "success": false, "error": 404, "message": "resource not found" }
//! ```

use anyhow::Error;
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug)]
pub struct AppError {
    pub status: StatusCode,
    pub error: Error,
}

/// Body returned for every error response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    /// Always `false`
    pub success: bool,
    /// HTTP status code
    pub error: u16,
    /// Canonical, client-safe description of the status
    pub message: String,
}

impl AppError {
    pub fn new<E>(status: StatusCode, err: E) -> Self
    where
        E: Into<Error>,
    {
        Self {
            status,
            error: err.into(),
        }
    }

    pub fn internal<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, err)
    }

    pub fn not_found<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::new(StatusCode::NOT_FOUND, err)
    }

    pub fn unprocessable<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::new(StatusCode::UNPROCESSABLE_ENTITY, err)
    }

    pub fn bad_request<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::new(StatusCode::BAD_REQUEST, err)
    }

    pub fn database<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, err)
    }

    /// The message shown to clients. Never includes the inner error.
    pub fn message(&self) -> String {
        match self.status {
            StatusCode::BAD_REQUEST => "bad request".to_string(),
            StatusCode::NOT_FOUND => "resource not found".to_string(),
            StatusCode::UNPROCESSABLE_ENTITY => "unprocessable entity".to_string(),
            StatusCode::INTERNAL_SERVER_ERROR => "internal server error".to_string(),
            other => other
                .canonical_reason()
                .map(str::to_lowercase)
                .unwrap_or_else(|| "internal server error".to_string()),
        }
    }

    pub fn to_body(&self) -> ErrorResponse {
        ErrorResponse {
            success: false,
            error: self.status.as_u16(),
            message: self.message(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        if self.status.is_server_error() {
            tracing::error!(status = %self.status.as_u16(), error = ?self.error, "Request failed");
        } else {
            tracing::warn!(status = %self.status.as_u16(), error = %self.error, "Request rejected");
        }

        (self.status, Json(self.to_body())).into_response()
    }
}

impl<E> From<E> for AppError
where
    E: Into<Error>,
{
    fn from(err: E) -> Self {
        AppError::internal(err)
    }
}
