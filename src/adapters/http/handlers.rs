//! Route handlers.
//!
//! - `GET /`              greeting
//! - `POST /complete-sale` record a sale from query parameters
//! - `GET /metrics`       text exposition of the registry

use axum::extract::{Query, State};
use axum::http::header;
use axum::response::{IntoResponse, Response};
use axum::Json;

use super::error::ApiError;
use super::state::AppState;
use crate::domain::{Message, Sale};
use crate::ports::telemetry::MetricsExposition;
use crate::usecases::sales;

pub async fn root() -> Json<Message> {
    Json(Message::greeting())
}

/// Missing or non-integer parameters are rejected by `Query` with 400.
pub async fn complete_sale(
    State(state): State<AppState>,
    Query(sale): Query<Sale>,
) -> Json<Message> {
    Json(sales::complete_sale(state.sales.as_ref(), &sale))
}

pub async fn metrics(State(state): State<AppState>) -> Result<Response, ApiError> {
    exposition_response(state.exposition.as_ref())
}

/// Encode the registry with its matching Content-Type header.
pub fn exposition_response(exposition: &dyn MetricsExposition) -> Result<Response, ApiError> {
    let body = exposition.render()?;
    Ok(([(header::CONTENT_TYPE, exposition.content_type())], body).into_response())
}
