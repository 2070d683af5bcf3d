//! Prometheus Metrics Registry - HTTP and Sales Observability
//!
//! Owns the process-wide `prometheus::Registry` and the three
//! instruments the service publishes. Constructed once in `main`,
//! shared through an `Arc`, never torn down before shutdown.
//!
//! Also serves the registry on its own listener (default :8001) so
//! scrapers can pull metrics without touching the application port.
//! That listener answers every path with the exposition.

use std::fmt::Write;
use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use prometheus::core::{Collector, Desc};
use prometheus::proto::MetricFamily;
use prometheus::{
    Encoder, GaugeVec, HistogramOpts, HistogramVec, Opts, Registry, TextEncoder,
};
use tokio::sync::broadcast;
use tracing::{debug, info, instrument};

use super::signed_counter::SignedCounterVec;
use crate::adapters::http::handlers::exposition_response;
use crate::config::MetricsConfig;
use crate::domain::{RouteLabels, Sale};
use crate::error::TelemetryError;
use crate::ports::telemetry::{MetricsExposition, RequestMetrics, SalesMetrics};

/// Histogram of request latency in seconds.
pub const REQUEST_DURATION: &str = "http_server_request_duration_seconds";
/// Gauge of requests currently in flight.
pub const ACTIVE_REQUESTS: &str = "http_server_active_requests";
/// Counter of units sold per product.
pub const PRODUCT_SOLD: &str = "contoso_product_sold_total";

/// Label dimensions shared by the HTTP instruments, in order.
pub const HTTP_LABELS: [&str; 2] = ["http_request_method", "http_route"];
/// Label dimension of the sales counter.
pub const PRODUCT_LABEL: &str = "product_name";

/// Centralized Prometheus metrics for the sales service.
pub struct MetricsRegistry {
    /// Prometheus registry.
    registry: Registry,
    /// Request latency histogram (seconds).
    pub request_duration: HistogramVec,
    /// In-flight request gauge.
    pub active_requests: GaugeVec,
    /// Units sold per product.
    pub products_sold: SignedCounterVec,
}

impl MetricsRegistry {
    /// Create and register all instruments.
    ///
    /// When `config.process_metrics` is set (Linux only) the standard
    /// `process_*` collector is registered as well.
    pub fn new(config: &MetricsConfig) -> Result<Self, TelemetryError> {
        let registry = Registry::new();

        let request_duration = HistogramVec::new(
            HistogramOpts::new(REQUEST_DURATION, "HTTP request duration in seconds")
                .buckets(config.duration_buckets.clone()),
            &HTTP_LABELS,
        )?;

        let active_requests = GaugeVec::new(
            Opts::new(ACTIVE_REQUESTS, "Number of HTTP requests currently in flight"),
            &HTTP_LABELS,
        )?;

        let products_sold = SignedCounterVec::new(
            Opts::new(PRODUCT_SOLD, "Units of product sold"),
            &[PRODUCT_LABEL],
        )?;

        registry.register(Box::new(request_duration.clone()))?;
        registry.register(Box::new(active_requests.clone()))?;
        registry.register(Box::new(products_sold.clone()))?;

        if config.process_metrics {
            register_process_collector(&registry)?;
        }

        Ok(Self {
            registry,
            request_duration,
            active_requests,
            products_sold,
        })
    }

    /// Router for the secondary listener: any method, any path.
    pub fn exposition_router(self: &Arc<Self>) -> Router {
        let metrics_self = Arc::clone(self);

        Router::new().fallback(move || {
            let registry = Arc::clone(&metrics_self);
            async move { exposition_response(&*registry) }
        })
    }

    /// Serve the exposition on a dedicated listener until shutdown.
    #[instrument(skip(self, shutdown_rx))]
    pub async fn serve(
        self: Arc<Self>,
        bind_address: String,
        mut shutdown_rx: broadcast::Receiver<()>,
    ) -> anyhow::Result<()> {
        let app = self.exposition_router();

        let listener = tokio::net::TcpListener::bind(&bind_address).await?;
        info!(address = %bind_address, "Prometheus metrics server started");

        axum::serve(listener, app)
            .with_graceful_shutdown(async move {
                let _ = shutdown_rx.recv().await;
            })
            .await?;

        Ok(())
    }

    /// Declared instruments with their exposition type.
    fn declared(&self) -> Vec<(&Desc, &'static str)> {
        let histograms = self.request_duration.desc().into_iter().map(|d| (d, "histogram"));
        let gauges = self.active_requests.desc().into_iter().map(|d| (d, "gauge"));
        let counters = self.products_sold.desc().into_iter().map(|d| (d, "counter"));
        histograms.chain(gauges).chain(counters).collect()
    }
}

/// `# HELP` / `# TYPE` lines for a family with no series yet.
///
/// `TextEncoder` refuses empty families and `Registry::gather` prunes
/// them, so these headers are written by hand.
fn write_empty_family(out: &mut String, desc: &Desc, kind: &str) {
    let help = desc.help.replace('\\', "\\\\").replace('\n', "\\n");
    let _ = writeln!(out, "# HELP {} {}", desc.fq_name, help);
    let _ = writeln!(out, "# TYPE {} {}", desc.fq_name, kind);
}

fn is_gathered(families: &[MetricFamily], name: &str) -> bool {
    families.iter().any(|family| family.get_name() == name)
}

#[cfg(target_os = "linux")]
fn register_process_collector(registry: &Registry) -> Result<(), TelemetryError> {
    use prometheus::process_collector::ProcessCollector;

    registry.register(Box::new(ProcessCollector::for_self()))?;
    Ok(())
}

#[cfg(not(target_os = "linux"))]
fn register_process_collector(_registry: &Registry) -> Result<(), TelemetryError> {
    debug!("Process collector unavailable on this platform");
    Ok(())
}

impl RequestMetrics for MetricsRegistry {
    fn request_started(&self, labels: &RouteLabels) {
        self.active_requests.with_label_values(&labels.values()).inc();
    }

    fn request_finished(&self, labels: &RouteLabels, elapsed: Duration) {
        let values = labels.values();
        self.request_duration
            .with_label_values(&values)
            .observe(elapsed.as_secs_f64());
        self.active_requests.with_label_values(&values).dec();
    }
}

impl SalesMetrics for MetricsRegistry {
    fn record_sale(&self, sale: &Sale) {
        self.products_sold
            .add(&[sale.product_name.as_str()], sale.quantity);
        debug!(
            product = %sale.product_name,
            quantity = sale.quantity,
            "Product sold counter updated"
        );
    }
}

impl MetricsExposition for MetricsRegistry {
    fn content_type(&self) -> &'static str {
        prometheus::TEXT_FORMAT
    }

    fn render(&self) -> Result<String, TelemetryError> {
        let encoder = TextEncoder::new();
        let metric_families = self.registry.gather();
        let mut buffer = Vec::new();
        encoder.encode(&metric_families, &mut buffer)?;

        let mut text = String::from_utf8(buffer)?;
        for (desc, kind) in self.declared() {
            if !is_gathered(&metric_families, &desc.fq_name) {
                write_empty_family(&mut text, desc, kind);
            }
        }
        Ok(text)
    }
}
