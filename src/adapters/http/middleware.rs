//! Request Instrumentation Middleware
//!
//! Wraps every request so that, whatever the handler does, the
//! active-requests gauge gets exactly one increment and one matching
//! decrement, and the latency histogram gets exactly one observation.
//!
//! Exit bookkeeping lives in the `Drop` of [`InFlight`], so it runs on
//! normal return, on panic unwinding and when the request future is
//! dropped before completion. The wrapped output is returned untouched.

use std::future::Future;
use std::time::Instant;

use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::Response;
use tracing::{trace, warn};

use super::state::AppState;
use crate::domain::RouteLabels;
use crate::ports::telemetry::RequestMetrics;

/// Guard for one in-flight request.
///
/// Increments on construction, records latency and decrements on drop.
pub struct InFlight<'a, M: RequestMetrics + ?Sized> {
    metrics: &'a M,
    labels: RouteLabels,
    started: Instant,
    completed: bool,
}

impl<'a, M: RequestMetrics + ?Sized> InFlight<'a, M> {
    /// Mark the request as entered.
    pub fn enter(metrics: &'a M, labels: RouteLabels) -> Self {
        metrics.request_started(&labels);
        Self {
            metrics,
            labels,
            started: Instant::now(),
            completed: false,
        }
    }

    /// Flag a normal completion. Only affects logging.
    pub fn complete(&mut self) {
        self.completed = true;
    }
}

impl<M: RequestMetrics + ?Sized> Drop for InFlight<'_, M> {
    fn drop(&mut self) {
        let elapsed = self.started.elapsed();
        self.metrics.request_finished(&self.labels, elapsed);

        if self.completed {
            trace!(
                route = %self.labels,
                elapsed_ms = elapsed.as_secs_f64() * 1000.0,
                "Request finished"
            );
        } else {
            warn!(
                route = %self.labels,
                elapsed_ms = elapsed.as_secs_f64() * 1000.0,
                "Request ended without completing (panic or cancellation)"
            );
        }
    }
}

/// Run `fut` with entry/exit bookkeeping recorded under `labels`.
pub async fn instrument<M, F>(metrics: &M, labels: RouteLabels, fut: F) -> F::Output
where
    M: RequestMetrics + ?Sized,
    F: Future,
{
    let mut in_flight = InFlight::enter(metrics, labels);
    let output = fut.await;
    in_flight.complete();
    output
}

/// Label pair for a request: method and raw path, query excluded.
pub fn route_labels(request: &Request) -> RouteLabels {
    RouteLabels::new(request.method().as_str(), request.uri().path())
}

/// Axum middleware applying [`instrument`] to the rest of the pipeline.
pub async fn track_requests(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Response {
    let labels = route_labels(&request);
    instrument(state.requests.as_ref(), labels, next.run(request)).await
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use axum::body::Body;
    use axum::http::Request as HttpRequest;
    use mockall::mock;

    use super::*;

    mock! {
        pub Requests {}

        impl RequestMetrics for Requests {
            fn request_started(&self, labels: &RouteLabels);
            fn request_finished(&self, labels: &RouteLabels, elapsed: Duration);
        }
    }

    fn expect_one_cycle(mock: &mut MockRequests, method: &'static str, route: &'static str) {
        mock.expect_request_started()
            .withf(move |l| l.method == method && l.route == route)
            .times(1)
            .return_const(());
        mock.expect_request_finished()
            .withf(move |l, _| l.method == method && l.route == route)
            .times(1)
            .return_const(());
    }

    #[tokio::test]
    async fn test_instrument_returns_output_unchanged() {
        let mut metrics = MockRequests::new();
        expect_one_cycle(&mut metrics, "GET", "/");

        let out = instrument(&metrics, RouteLabels::new("GET", "/"), async { 42 }).await;
        assert_eq!(out, 42);
    }

    #[tokio::test]
    async fn test_instrument_passes_errors_through() {
        let mut metrics = MockRequests::new();
        expect_one_cycle(&mut metrics, "POST", "/complete-sale");

        let out: Result<(), &str> = instrument(
            &metrics,
            RouteLabels::new("POST", "/complete-sale"),
            async { Err("boom") },
        )
        .await;
        assert_eq!(out, Err("boom"));
    }

    #[tokio::test]
    async fn test_dropped_future_still_finishes() {
        let mut metrics = MockRequests::new();
        expect_one_cycle(&mut metrics, "GET", "/slow");

        let fut = instrument(
            &metrics,
            RouteLabels::new("GET", "/slow"),
            std::future::pending::<()>(),
        );
        let timed_out = tokio::time::timeout(Duration::from_millis(10), fut).await;
        assert!(timed_out.is_err());
    }

    #[test]
    fn test_route_labels_ignore_query() {
        let request = HttpRequest::builder()
            .method("POST")
            .uri("/complete-sale?product_name=Widget&quantity=5")
            .body(Body::empty())
            .unwrap();

        let labels = route_labels(&request);
        assert_eq!(labels, RouteLabels::new("POST", "/complete-sale"));
    }

    #[test]
    fn test_route_labels_keep_concrete_path() {
        let request = HttpRequest::builder()
            .uri("/users/123")
            .body(Body::empty())
            .unwrap();

        assert_eq!(route_labels(&request).route, "/users/123");
    }
}
