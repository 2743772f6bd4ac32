//! Product catalog API server
//!
//! Serves the seed catalog from memory, or the `products` table when a
//! database URL is configured and the `postgres` feature is enabled.
//!
//! ```sh
//! cargo run --example catalog_server -- catalog.yaml
//! CATALOG_DATABASE_URL=postgres://... cargo run --example catalog_server --features postgres
//! ```

use anyhow::Result;
use catalog::prelude::*;
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config_path = std::env::args().nth(1).map(PathBuf::from);
    let config = CatalogConfig::load(config_path.as_deref())?;

    let service = product_service(&config).await?;

    println!("🚀 Catalog API on http://{}", config.server.bind_addr);
    println!("    GET /api/products                   - List all products");
    println!("    GET /api/products/{{product_id}}      - Get a specific product");
    println!("    GET /api/products/search/{{keyword}}  - Search by name or description");
    println!("    GET /health                         - Health check");

    ServerBuilder::new()
        .with_shared_product_service(service)
        .serve(&config.server.bind_addr)
        .await
}

async fn product_service(config: &CatalogConfig) -> Result<Arc<dyn ProductService>> {
    match config.database.url.as_deref() {
        #[cfg(feature = "postgres")]
        Some(url) => {
            let service = PostgresProductService::connect(url).await?;
            service.run_migrations().await?;
            Ok(Arc::new(service))
        }
        #[cfg(not(feature = "postgres"))]
        Some(_) => {
            tracing::warn!("database.url is set but the postgres feature is disabled, serving seed data");
            Ok(Arc::new(InMemoryProductService::with_sample_data()))
        }
        None => {
            tracing::info!("no database configured, serving seed data");
            Ok(Arc::new(InMemoryProductService::with_sample_data()))
        }
    }
}
