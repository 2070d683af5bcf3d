//! HTTP Adapter - axum Router, Handlers and Instrumentation
//!
//! The only inbound adapter. Metric handles reach handlers through
//! `AppState`; nothing here holds global state.

pub mod error;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod server;
pub mod state;

pub use error::ApiError;
pub use router::build_router;
pub use server::HttpServer;
pub use state::AppState;
