//! In-memory implementation of ProductService for testing and development

use crate::core::error::StorageError;
use crate::core::{Product, ProductService};
use anyhow::Result;
use async_trait::async_trait;
use std::cmp::Reverse;
use std::sync::{Arc, RwLock, RwLockReadGuard};

/// In-memory product service
///
/// Useful for testing and development. Uses RwLock for thread-safe access.
#[derive(Clone, Default)]
pub struct InMemoryProductService {
    products: Arc<RwLock<Vec<Product>>>,
}

impl InMemoryProductService {
    /// Create an empty in-memory product service
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a service holding `products`
    pub fn with_products(products: Vec<Product>) -> Self {
        Self {
            products: Arc::new(RwLock::new(products)),
        }
    }

    /// A small warung menu, used by the demo server
    pub fn with_sample_data() -> Self {
        Self::with_products(sample_products())
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, Vec<Product>>> {
        self.products.read().map_err(|e| {
            StorageError::LockPoisoned {
                message: e.to_string(),
            }
            .into()
        })
    }
}

#[async_trait]
impl ProductService for InMemoryProductService {
    async fn list(&self) -> Result<Vec<Product>> {
        let mut products = self.read()?.clone();
        products.sort_by_key(|p| p.product_id);
        Ok(products)
    }

    async fn get(&self, product_id: i64) -> Result<Option<Product>> {
        Ok(self
            .read()?
            .iter()
            .find(|p| p.product_id == product_id)
            .cloned())
    }

    async fn search(&self, keyword: &str) -> Result<Vec<Product>> {
        let needle = keyword.to_lowercase();
        let mut found: Vec<Product> = self
            .read()?
            .iter()
            .filter(|p| {
                p.product_name.to_lowercase().contains(&needle)
                    || p.description_text().to_lowercase().contains(&needle)
            })
            .cloned()
            .collect();

        // stock DESC, absent stock last
        found.sort_by_key(|p| (Reverse(p.stock.map(|s| (1, s)).unwrap_or((0, 0))), p.product_id));
        Ok(found)
    }
}

/// Demo catalog
pub fn sample_products() -> Vec<Product> {
    vec![
        Product::new(1, 5, "Nasi Goreng", 12000.0, 15)
            .with_description("Nasi goreng kampung dengan telur dan kerupuk"),
        Product::new(2, 5, "Mie Goreng", 10000.0, 60)
            .with_description("Mie goreng jawa, pedas sedang"),
        Product::new(3, 5, "Ayam Bakar", 25000.0, 8)
            .with_description("Ayam bakar madu dengan sambal terasi"),
        Product::new(4, 7, "Es Teh Manis", 4000.0, 120),
        Product::new(5, 7, "Kopi Tubruk", 6000.0, 75).with_description("Kopi robusta \"asli\" Lampung"),
        Product::new(6, 9, "Kerupuk Udang", 3000.0, 52),
        Product::new(7, 5, "Soto Ayam", 15000.0, 30).with_description("Soto ayam kuah kuning, koya"),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(products: &[Product]) -> Vec<i64> {
        products.iter().map(|p| p.product_id).collect()
    }

    #[tokio::test]
    async fn test_list_orders_by_id() {
        let service = InMemoryProductService::with_products(vec![
            Product::new(3, 1, "C", 1.0, 1),
            Product::new(1, 1, "A", 1.0, 1),
            Product::new(2, 1, "B", 1.0, 1),
        ]);

        let products = service.list().await.unwrap();
        assert_eq!(ids(&products), vec![1, 2, 3]);
    }

    #[tokio::test]
    async fn test_get_product() {
        let service = InMemoryProductService::with_sample_data();

        let found = service.get(2).await.unwrap();
        assert_eq!(found.unwrap().product_name, "Mie Goreng");

        assert!(service.get(999).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_search_orders_by_stock_desc() {
        let service = InMemoryProductService::with_sample_data();

        let found = service.search("GORENG").await.unwrap();
        assert_eq!(ids(&found), vec![2, 1]);
    }

    #[tokio::test]
    async fn test_search_matches_description() {
        let service = InMemoryProductService::with_sample_data();

        let found = service.search("sambal").await.unwrap();
        assert_eq!(ids(&found), vec![3]);
    }

    #[tokio::test]
    async fn test_search_ignores_category() {
        let service = InMemoryProductService::with_sample_data();
        assert!(service.search("7").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_search_absent_stock_sorts_last() {
        let mut unknown = Product::new(1, 1, "Teh", 1.0, 0);
        unknown.stock = None;
        let service = InMemoryProductService::with_products(vec![
            unknown,
            Product::new(2, 1, "Teh Tarik", 1.0, 0),
            Product::new(3, 1, "Teh Botol", 1.0, 5),
        ]);

        let found = service.search("teh").await.unwrap();
        assert_eq!(ids(&found), vec![3, 2, 1]);
    }

    #[tokio::test]
    async fn test_empty_service() {
        let service = InMemoryProductService::new();
        assert!(service.list().await.unwrap().is_empty());
    }
}
