//! Shared router state.

use std::sync::Arc;

use crate::ports::telemetry::{MetricsExposition, RequestMetrics, SalesMetrics};

/// Metric handles injected into the middleware and handlers.
///
/// All three usually point at the same `MetricsRegistry`.
#[derive(Clone)]
pub struct AppState {
    pub requests: Arc<dyn RequestMetrics>,
    pub sales: Arc<dyn SalesMetrics>,
    pub exposition: Arc<dyn MetricsExposition>,
}

impl AppState {
    /// Wire every port to a single backend.
    pub fn from_registry<R>(registry: Arc<R>) -> Self
    where
        R: RequestMetrics + SalesMetrics + MetricsExposition,
    {
        Self {
            requests: Arc::clone(&registry) as Arc<dyn RequestMetrics>,
            sales: Arc::clone(&registry) as Arc<dyn SalesMetrics>,
            exposition: registry,
        }
    }
}
