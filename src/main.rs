//! Contoso Sales Metrics — Entry Point
//!
//! Wiring sequence:
//! 1. Resolve config (CONTOSO_CONFIG, ./config.toml, or defaults)
//! 2. Init tracing (JSON structured logging)
//! 3. Build the metrics registry (single instance for the process)
//! 4. Spawn the secondary metrics listener on :8001
//! 5. Spawn the application server on :8000
//! 6. Wait for SIGINT → graceful shutdown of both listeners

#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: tikv_jemallocator::Jemalloc = tikv_jemallocator::Jemalloc;

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use tokio::signal;
use tokio::sync::broadcast;
use tracing::{error, info};

use contoso_sales_metrics::adapters::http::{build_router, AppState, HttpServer};
use contoso_sales_metrics::adapters::metrics::MetricsRegistry;
use contoso_sales_metrics::config::loader::resolve_config;

#[tokio::main]
async fn main() -> Result<()> {
    // ── 1. Load configuration ───────────────────────────────
    let config = resolve_config().context("Failed to load configuration")?;

    // ── 2. Initialize structured JSON logging ───────────────
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| {
                    tracing_subscriber::EnvFilter::new(&config.service.log_level)
                }),
        )
        .json()
        .init();

    info!(
        name = %config.service.name,
        version = env!("CARGO_PKG_VERSION"),
        bind = %config.service.bind_address,
        metrics_enabled = config.metrics.enabled,
        "Starting Contoso sales service"
    );

    // ── 3. Metrics registry ─────────────────────────────────
    let registry = Arc::new(
        MetricsRegistry::new(&config.metrics).context("Failed to build metrics registry")?,
    );

    let (shutdown_tx, _shutdown_rx) = broadcast::channel::<()>(1);

    // ── 4. Secondary metrics listener ───────────────────────
    let metrics_handle = if config.metrics.enabled {
        let metrics_shutdown = shutdown_tx.subscribe();
        let metrics_ref = Arc::clone(&registry);
        let bind_address = config.metrics.bind_address.clone();
        Some(tokio::spawn(async move {
            if let Err(e) = metrics_ref.serve(bind_address, metrics_shutdown).await {
                error!(error = %e, "Metrics server failed");
            }
        }))
    } else {
        info!("Secondary metrics listener disabled");
        None
    };

    // ── 5. Application server ───────────────────────────────
    let router = build_router(AppState::from_registry(Arc::clone(&registry)));
    let server = HttpServer::new(router, config.service.bind_address.clone());
    let server_shutdown = shutdown_tx.subscribe();
    let mut server_handle = tokio::spawn(async move { server.run(server_shutdown).await });

    // ── 6. Wait for SIGINT or a server failure ──────────────
    let exited_early = tokio::select! {
        _ = signal::ctrl_c() => {
            info!("SIGINT received, initiating graceful shutdown");
            None
        }
        joined = &mut server_handle => Some(joined),
    };

    let _ = shutdown_tx.send(());

    if let Some(metrics_handle) = metrics_handle {
        let _ = tokio::time::timeout(Duration::from_secs(5), metrics_handle).await;
    }

    let result = match exited_early {
        Some(joined) => joined.context("HTTP server task panicked")?,
        None => match tokio::time::timeout(Duration::from_secs(30), server_handle).await {
            Ok(joined) => joined.context("HTTP server task panicked")?,
            Err(_) => {
                error!("HTTP server did not drain within 30s");
                Ok(())
            }
        },
    };

    info!("Shutdown complete");
    result
}
