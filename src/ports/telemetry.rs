//! Telemetry Ports - Metric Sink Interfaces
//!
//! The middleware and handlers only talk to these traits. The
//! Prometheus adapter implements all three; tests substitute mocks.
//! Every method is infallible: a metric write never fails a request.

use std::time::Duration;

use crate::domain::{RouteLabels, Sale};
use crate::error::TelemetryError;

/// In-flight and latency bookkeeping for HTTP requests.
pub trait RequestMetrics: Send + Sync + 'static {
    /// Called once when a request enters the pipeline.
    fn request_started(&self, labels: &RouteLabels);

    /// Called once when the request leaves the pipeline, on every path.
    fn request_finished(&self, labels: &RouteLabels, elapsed: Duration);
}

/// Domain counter for units sold.
pub trait SalesMetrics: Send + Sync + 'static {
    /// Add `sale.quantity` to the product's sold-units series.
    fn record_sale(&self, sale: &Sale);
}

/// Read-only serialization of the current registry state.
pub trait MetricsExposition: Send + Sync + 'static {
    /// Content-Type header value matching [`Self::render`].
    fn content_type(&self) -> &'static str;

    /// Encode every registered instrument in text exposition format.
    fn render(&self) -> Result<String, TelemetryError>;
}
