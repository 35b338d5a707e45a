//! Error translation at the HTTP boundary
//!
//! Every whole-request failure leaves the service as `{"error": "<message>"}`.
//! The [`ErrorMode`] decides the status code that goes with it.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use thiserror::Error;
use tracing::warn;

use crate::TimingError;

/// How failures map to HTTP status codes
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ErrorMode {
    /// Always 200, the error only shows in the body
    #[default]
    Legacy,
    /// Status codes by error kind
    Strict,
}

/// Whole-request failure
#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Timing(#[from] TimingError),

    #[error("Missing required query parameter: {0}")]
    MissingParameter(&'static str),

    #[error("Invalid year: {0}")]
    InvalidYear(String),

    #[error("Invalid query string: {0}")]
    InvalidQuery(String),
}

impl ApiError {
    /// Status code used in [`ErrorMode::Strict`].
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::MissingParameter(_) | ApiError::InvalidYear(_) | ApiError::InvalidQuery(_) => {
                StatusCode::BAD_REQUEST
            }
            ApiError::Timing(err) => match err {
                TimingError::SessionResolution { .. } | TimingError::NotFound { .. } => StatusCode::NOT_FOUND,
                TimingError::Schema { .. } => StatusCode::UNPROCESSABLE_ENTITY,
                TimingError::Timeout { .. } => StatusCode::GATEWAY_TIMEOUT,
                TimingError::File { source, .. } if source.kind() == std::io::ErrorKind::NotFound => {
                    StatusCode::NOT_FOUND
                }
                TimingError::File { .. } | TimingError::Parse { .. } | TimingError::Config { .. } => {
                    StatusCode::INTERNAL_SERVER_ERROR
                }
            },
        }
    }

    /// Attach the response mode.
    pub fn with_mode(self, mode: ErrorMode) -> ErrorReply {
        ErrorReply { mode, error: self }
    }
}

/// Wire shape of a failure
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorBody {
    pub error: String,
}

/// An [`ApiError`] ready to become a response
#[derive(Debug)]
pub struct ErrorReply {
    mode: ErrorMode,
    error: ApiError,
}

impl IntoResponse for ErrorReply {
    fn into_response(self) -> Response {
        let status = match self.mode {
            ErrorMode::Legacy => StatusCode::OK,
            ErrorMode::Strict => self.error.status(),
        };
        let retryable = matches!(&self.error, ApiError::Timing(err) if err.is_retryable());
        warn!(status = status.as_u16(), retryable, "Request failed: {}", self.error);
        (status, Json(ErrorBody { error: self.error.to_string() })).into_response()
    }
}
