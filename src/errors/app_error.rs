use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

use crate::core::session::SessionError;

/// Errors surfaced by the HTTP layer.
///
/// Rendered as `{"error": "...", "code": "..."}` with a matching status.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Session not found: {0}")]
    SessionNotFound(String),

    #[error(transparent)]
    Session(#[from] SessionError),

    #[error("Bad request: {0}")]
    BadRequest(String),
}

pub type AppResult<T> = Result<T, AppError>;

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::SessionNotFound(_) => StatusCode::NOT_FOUND,
            AppError::Session(SessionError::EmptyInput) => StatusCode::BAD_REQUEST,
            AppError::Session(SessionError::CallNotActive | SessionError::TurnInProgress) => {
                StatusCode::CONFLICT
            }
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
        }
    }

    /// Stable machine-readable code.
    pub fn code(&self) -> &'static str {
        match self {
            AppError::SessionNotFound(_) => "session_not_found",
            AppError::Session(SessionError::CallNotActive) => "call_not_active",
            AppError::Session(SessionError::TurnInProgress) => "turn_in_progress",
            AppError::Session(SessionError::EmptyInput) => "empty_input",
            AppError::BadRequest(_) => "bad_request",
        }
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        tracing::debug!(status = status.as_u16(), "Request rejected: {self}");

        (
            status,
            Json(json!({
                "error": self.to_string(),
                "code": self.code(),
            })),
        )
            .into_response()
    }
}
