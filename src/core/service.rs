//! Service trait for product storage

use crate::core::Product;
use anyhow::Result;
use async_trait::async_trait;

/// Read-only access to the product table
///
/// Implementations provide the three queries behind the HTTP API.
/// The server is agnostic to the underlying storage mechanism.
#[async_trait]
pub trait ProductService: Send + Sync {
    /// List every product, ordered by `product_id` ascending
    async fn list(&self) -> Result<Vec<Product>>;

    /// Get a product by id
    async fn get(&self, product_id: i64) -> Result<Option<Product>>;

    /// Case-insensitive substring search over name and description
    ///
    /// Results are ordered by stock descending, ties by `product_id`.
    async fn search(&self, keyword: &str) -> Result<Vec<Product>>;
}
