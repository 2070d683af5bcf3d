//! Metrics Adapters
//!
//! Prometheus-backed implementation of the telemetry ports, plus the
//! signed counter collector used for sales.

pub mod prometheus;
pub mod signed_counter;

pub use self::prometheus::MetricsRegistry;
pub use signed_counter::SignedCounterVec;
