//! ServerBuilder for fluent API to build HTTP servers

use super::exposure::RestExposure;
use super::handlers::AppState;
use crate::core::ProductService;
use anyhow::Result;
use axum::Router;
use std::sync::Arc;
use tokio::net::TcpListener;

/// Builder for the catalog HTTP server
///
/// # Example
///
/// ```ignore
/// ServerBuilder::new()
///     .with_product_service(InMemoryProductService::with_sample_data())
///     .serve("127.0.0.1:5000")
///     .await?;
/// ```
pub struct ServerBuilder {
    product_service: Option<Arc<dyn ProductService>>,
    custom_routes: Vec<Router>,
}

impl ServerBuilder {
    /// Create a new ServerBuilder
    pub fn new() -> Self {
        Self {
            product_service: None,
            custom_routes: Vec::new(),
        }
    }

    /// Set the product service (required)
    pub fn with_product_service(mut self, service: impl ProductService + 'static) -> Self {
        self.product_service = Some(Arc::new(service));
        self
    }

    /// Set an already shared product service (required)
    pub fn with_shared_product_service(mut self, service: Arc<dyn ProductService>) -> Self {
        self.product_service = Some(service);
        self
    }

    /// Add custom routes to the server
    ///
    /// Use this for routes outside the product API, such as static assets
    /// or diagnostics.
    pub fn with_custom_routes(mut self, routes: Router) -> Self {
        self.custom_routes.push(routes);
        self
    }

    /// Build the final REST router
    pub fn build(mut self) -> Result<Router> {
        let product_service = self.product_service.take().ok_or_else(|| {
            anyhow::anyhow!("ProductService is required. Call .with_product_service()")
        })?;

        let state = AppState { product_service };
        RestExposure::build_router(state, std::mem::take(&mut self.custom_routes))
    }

    /// Serve the application with graceful shutdown
    ///
    /// This will:
    /// - Bind to the provided address
    /// - Start serving requests
    /// - Handle SIGTERM and SIGINT (Ctrl+C) for graceful shutdown
    pub async fn serve(self, addr: &str) -> Result<()> {
        let app = self.build()?;
        let listener = TcpListener::bind(addr).await?;

        tracing::info!("Server listening on {}", addr);

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("Server shutdown complete");
        Ok(())
    }
}

impl Default for ServerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Wait for shutdown signal (SIGTERM or Ctrl+C)
async fn shutdown_signal() {
    use tokio::signal;

    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C signal, initiating graceful shutdown...");
        },
        _ = terminate => {
            tracing::info!("Received SIGTERM signal, initiating graceful shutdown...");
        },
    }
}
