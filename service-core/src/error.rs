use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

/// Error returned by a handler that can fail.
///
/// `cause` is only ever logged; `message` is what the caller sees, written as
/// a plain-text body with status `code`.
#[derive(Debug, Error)]
#[error("{message} (status {code}): {cause:#}")]
pub struct AppError {
    pub cause: anyhow::Error,
    pub message: String,
    pub code: StatusCode,
}

impl AppError {
    pub fn new(
        cause: impl Into<anyhow::Error>,
        message: impl Into<String>,
        code: StatusCode,
    ) -> Self {
        Self {
            cause: cause.into(),
            message: message.into(),
            code,
        }
    }

    /// A 500 carrying `cause` for the logs and `message` for the caller.
    pub fn internal(cause: impl Into<anyhow::Error>, message: impl Into<String>) -> Self {
        Self::new(cause, message, StatusCode::INTERNAL_SERVER_ERROR)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        tracing::error!(
            status = self.code.as_u16(),
            message = %self.message,
            cause = ?self.cause,
            "Handler error"
        );

        (self.code, self.message).into_response()
    }
}
