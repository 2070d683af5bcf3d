//! HTTP-facing error type.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;
use tracing::error;

use crate::error::TelemetryError;

/// Errors a handler can return to the client.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("metrics exposition failed: {0}")]
    Exposition(#[from] TelemetryError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        error!(error = %self, "Request failed");
        match self {
            Self::Exposition(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "metrics unavailable").into_response()
            }
        }
    }
}
