//! Typed errors for the telemetry layer.

use thiserror::Error;

/// Failures raised while building or encoding the metrics registry.
#[derive(Debug, Error)]
pub enum TelemetryError {
    /// Instrument creation or registration was rejected by the registry.
    #[error("metrics registry error: {0}")]
    Registry(#[from] prometheus::Error),

    /// Encoded exposition was not valid UTF-8.
    #[error("exposition output is not valid UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
}
