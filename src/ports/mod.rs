//! Ports Layer - Hexagonal Architecture Boundaries
//!
//! Defines the interfaces (traits) that the middleware and use cases
//! require from the outside world. Adapters implement these traits.
//!
//! Port categories:
//! - `RequestMetrics`: in-flight gauge and latency histogram
//! - `SalesMetrics`: units-sold counter
//! - `MetricsExposition`: text exposition of the registry

pub mod telemetry;

pub use telemetry::{MetricsExposition, RequestMetrics, SalesMetrics};
