//! Application HTTP server.

use axum::Router;
use tokio::sync::broadcast;
use tracing::{info, instrument};

/// Serves the application router on the main port.
pub struct HttpServer {
    router: Router,
    bind_address: String,
}

impl HttpServer {
    pub fn new(router: Router, bind_address: impl Into<String>) -> Self {
        Self {
            router,
            bind_address: bind_address.into(),
        }
    }

    /// Accept connections until a shutdown signal arrives, then drain.
    #[instrument(skip(self, shutdown_rx), fields(address = %self.bind_address))]
    pub async fn run(self, mut shutdown_rx: broadcast::Receiver<()>) -> anyhow::Result<()> {
        let listener = tokio::net::TcpListener::bind(&self.bind_address).await?;
        info!(address = %self.bind_address, "HTTP server started");

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown_rx.recv().await;
            })
            .await?;

        info!("HTTP server stopped");
        Ok(())
    }
}
