//! Application router.
//!
//! Layer order, outermost first: request tracing, panic-to-500
//! conversion, metrics instrumentation. Instrumentation sits inside
//! the panic catcher so a panicking handler unwinds through it.

use axum::middleware;
use axum::routing::{get, post};
use axum::Router;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::trace::TraceLayer;

use super::handlers;
use super::middleware::track_requests;
use super::state::AppState;

/// Build the application routes with instrumentation applied to all of them.
pub fn build_router(state: AppState) -> Router {
    routes()
        .layer(middleware::from_fn_with_state(state.clone(), track_requests))
        .layer(CatchPanicLayer::new())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::root))
        .route("/complete-sale", post(handlers::complete_sale))
        .route("/metrics", get(handlers::metrics))
}
