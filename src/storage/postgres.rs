//! PostgreSQL storage backend using sqlx.
//!
//! Provides `PostgresProductService`, backed by the `products` table via
//! `sqlx::PgPool`.
//!
//! # Feature flag
//!
//! This module is gated behind the `postgres` feature flag:
//! ```toml
//! [dependencies]
//! catalog-rs = { version = "0.1", features = ["postgres"] }
//! ```

use crate::core::error::StorageError;
use crate::core::{Product, ProductService};
use anyhow::Result;
use async_trait::async_trait;
use sqlx::postgres::{PgPoolOptions, PgRow};
use sqlx::{PgPool, Row};
use std::time::Duration;

const BACKEND: &str = "PostgreSQL";

// Casts keep the Rust side independent of SERIAL/INTEGER/NUMERIC column types
const COLUMNS: &str = "product_id::bigint AS product_id, \
     category_id::bigint AS category_id, \
     product_name, \
     price::float8 AS price, \
     stock::bigint AS stock, \
     description";

/// Product storage service backed by PostgreSQL.
#[derive(Clone, Debug)]
pub struct PostgresProductService {
    pool: PgPool,
}

impl PostgresProductService {
    /// Create a new `PostgresProductService` with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Open a pool for `database_url`
    pub async fn connect(database_url: &str) -> Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(5)
            .acquire_timeout(Duration::from_secs(10))
            .connect(database_url)
            .await
            .map_err(|e| StorageError::ConnectionError {
                backend: BACKEND.to_string(),
                message: e.to_string(),
            })?;

        tracing::info!("Connected to PostgreSQL database");
        Ok(Self::new(pool))
    }

    /// Create the `products` table if it does not exist
    pub async fn run_migrations(&self) -> Result<()> {
        sqlx::migrate!("./migrations")
            .run(&self.pool)
            .await
            .map_err(|e| query_error(e.to_string()))?;
        Ok(())
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

fn query_error(message: String) -> StorageError {
    StorageError::QueryError {
        backend: BACKEND.to_string(),
        message,
    }
}

fn product_from_row(row: &PgRow) -> Result<Product, sqlx::Error> {
    Ok(Product {
        product_id: row.try_get("product_id")?,
        category_id: row.try_get("category_id")?,
        product_name: row
            .try_get::<Option<String>, _>("product_name")?
            .unwrap_or_default(),
        price: row.try_get("price")?,
        stock: row.try_get("stock")?,
        description: row.try_get("description")?,
    })
}

#[async_trait]
impl ProductService for PostgresProductService {
    async fn list(&self) -> Result<Vec<Product>> {
        let sql = format!("SELECT {} FROM products ORDER BY product_id ASC", COLUMNS);
        let rows = sqlx::query(&sql)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| query_error(e.to_string()))?;

        let products = rows
            .iter()
            .map(product_from_row)
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| query_error(e.to_string()))?;
        Ok(products)
    }

    async fn get(&self, product_id: i64) -> Result<Option<Product>> {
        let sql = format!("SELECT {} FROM products WHERE product_id = $1", COLUMNS);
        let row = sqlx::query(&sql)
            .bind(product_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| query_error(e.to_string()))?;

        let product = row
            .as_ref()
            .map(product_from_row)
            .transpose()
            .map_err(|e| query_error(e.to_string()))?;
        Ok(product)
    }

    async fn search(&self, keyword: &str) -> Result<Vec<Product>> {
        let sql = format!(
            "SELECT {} FROM products \
             WHERE product_name ILIKE $1 OR description ILIKE $1 \
             ORDER BY stock DESC NULLS LAST, product_id ASC",
            COLUMNS
        );
        let rows = sqlx::query(&sql)
            .bind(format!("%{}%", escape_like(keyword)))
            .fetch_all(&self.pool)
            .await
            .map_err(|e| query_error(e.to_string()))?;

        let products = rows
            .iter()
            .map(product_from_row)
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| query_error(e.to_string()))?;
        Ok(products)
    }
}

/// Escape LIKE wildcards so the keyword matches literally
fn escape_like(keyword: &str) -> String {
    keyword
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_")
}
