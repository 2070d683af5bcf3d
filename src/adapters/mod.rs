//! Adapters Layer - Hexagonal Architecture Outer Ring
//!
//! Implements the port traits defined in `crate::ports` with concrete
//! external dependencies.
//!
//! Adapter categories:
//! - `http`: axum router, handlers, instrumentation middleware, server
//! - `metrics`: Prometheus registry and secondary exposition listener

pub mod http;
pub mod metrics;
