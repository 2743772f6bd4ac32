//! End-to-end tests for the product REST API
//!
//! These tests drive the full router (health, product routes, CORS, tracing)
//! through `axum_test::TestServer` over the in-memory store and a store
//! that always fails.

use anyhow::Result;
use async_trait::async_trait;
use axum::http::StatusCode;
use axum_test::TestServer;
use catalog::prelude::*;
use catalog::server::{ProductListResponse, ProductResponse};
use serde_json::Value;

// =============================================================================
// Fixtures
// =============================================================================

fn create_test_server() -> TestServer {
    let app = ServerBuilder::new()
        .with_product_service(InMemoryProductService::with_sample_data())
        .build()
        .expect("Failed to build app");

    TestServer::new(app)
}

/// Storage whose every call fails
struct BrokenStore;

#[async_trait]
impl ProductService for BrokenStore {
    async fn list(&self) -> Result<Vec<Product>> {
        Err(anyhow::anyhow!("connection refused: products"))
    }

    async fn get(&self, _product_id: i64) -> Result<Option<Product>> {
        Err(anyhow::anyhow!("connection refused: products"))
    }

    async fn search(&self, _keyword: &str) -> Result<Vec<Product>> {
        Err(anyhow::anyhow!("connection refused: products"))
    }
}

fn create_broken_server() -> TestServer {
    let app = ServerBuilder::new()
        .with_product_service(BrokenStore)
        .build()
        .expect("Failed to build app");

    TestServer::new(app)
}

fn ids(products: &[Product]) -> Vec<i64> {
    products.iter().map(|p| p.product_id).collect()
}

// =============================================================================
// Health Check Tests
// =============================================================================

mod health_tests {
    use super::*;

    #[tokio::test]
    async fn test_health_endpoint() {
        let server = create_test_server();

        let response = server.get("/health").await;
        response.assert_status_ok();

        let body: Value = response.json();
        assert_eq!(body["status"], "ok");
        assert_eq!(body["service"], "catalog-rs");
    }

    #[tokio::test]
    async fn test_healthz_endpoint() {
        let server = create_test_server();

        let response = server.get("/healthz").await;
        response.assert_status_ok();

        let body: Value = response.json();
        assert_eq!(body["status"], "ok");
    }
}

// =============================================================================
// List Tests
// =============================================================================

mod list_tests {
    use super::*;

    #[tokio::test]
    async fn test_list_products_envelope() {
        let server = create_test_server();

        let response = server.get("/api/products").await;
        response.assert_status_ok();

        let body: ProductListResponse = response.json();
        assert!(body.success);
        assert_eq!(body.total, 7);
        assert_eq!(body.data.len(), 7);
        assert_eq!(ids(&body.data), vec![1, 2, 3, 4, 5, 6, 7]);
    }

    #[tokio::test]
    async fn test_list_products_wire_fields() {
        let server = create_test_server();

        let body: Value = server.get("/api/products").await.json();
        let first = &body["data"][0];
        assert_eq!(first["product_id"], 1);
        assert_eq!(first["category_id"], 5);
        assert_eq!(first["product_name"], "Nasi Goreng");
        assert_eq!(first["price"], 12000.0);
        assert_eq!(first["stock"], 15);
    }

    #[tokio::test]
    async fn test_list_empty_store() {
        let app = ServerBuilder::new()
            .with_product_service(InMemoryProductService::new())
            .build()
            .unwrap();
        let server = TestServer::new(app);

        let body: ProductListResponse = server.get("/api/products").await.json();
        assert!(body.success);
        assert_eq!(body.total, 0);
        assert!(body.data.is_empty());
    }
}

// =============================================================================
// Detail Tests
// =============================================================================

mod detail_tests {
    use super::*;

    #[tokio::test]
    async fn test_get_product_by_id() {
        let server = create_test_server();

        let response = server.get("/api/products/3").await;
        response.assert_status_ok();

        let body: ProductResponse = response.json();
        assert!(body.success);
        assert_eq!(body.data.product_name, "Ayam Bakar");
        assert_eq!(body.data.stock, Some(8));
    }

    #[tokio::test]
    async fn test_get_missing_product_returns_404() {
        let server = create_test_server();

        let response = server.get("/api/products/999").await;
        response.assert_status(StatusCode::NOT_FOUND);

        let body: Value = response.json();
        assert_eq!(body["success"], false);
        assert_eq!(body["message"], "Product not found");
    }

    #[tokio::test]
    async fn test_get_non_integer_id_returns_400() {
        let server = create_test_server();

        let response = server.get("/api/products/abc").await;
        response.assert_status(StatusCode::BAD_REQUEST);

        let body: Value = response.json();
        assert_eq!(body["success"], false);
        assert!(body["message"].as_str().unwrap().contains("abc"));
    }
}

// =============================================================================
// Search Tests
// =============================================================================

mod search_tests {
    use super::*;

    #[tokio::test]
    async fn test_search_orders_by_stock_desc() {
        let server = create_test_server();

        let body: ProductListResponse = server.get("/api/products/search/goreng").await.json();
        assert!(body.success);
        assert_eq!(body.total, 2);
        // Mie Goreng (60) before Nasi Goreng (15)
        assert_eq!(ids(&body.data), vec![2, 1]);
    }

    #[tokio::test]
    async fn test_search_matches_description_case_insensitively() {
        let server = create_test_server();

        let body: ProductListResponse = server.get("/api/products/search/SAMBAL").await.json();
        assert_eq!(ids(&body.data), vec![3]);
    }

    #[tokio::test]
    async fn test_search_with_encoded_space() {
        let server = create_test_server();

        let body: ProductListResponse = server.get("/api/products/search/teh%20manis").await.json();
        assert_eq!(ids(&body.data), vec![4]);
    }

    #[tokio::test]
    async fn test_search_without_match_is_empty_success() {
        let server = create_test_server();

        let response = server.get("/api/products/search/rendang").await;
        response.assert_status_ok();

        let body: ProductListResponse = response.json();
        assert!(body.success);
        assert_eq!(body.total, 0);
    }
}

// =============================================================================
// Storage Failure Tests
// =============================================================================

mod storage_failure_tests {
    use super::*;

    async fn assert_internal(server: &TestServer, path: &str, message: &str) {
        let response = server.get(path).await;
        response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);

        let body: Value = response.json();
        assert_eq!(body["success"], false);
        assert_eq!(body["message"], message);
        assert!(!body.to_string().contains("connection refused"));
    }

    #[tokio::test]
    async fn test_list_failure_message() {
        let server = create_broken_server();
        assert_internal(&server, "/api/products", "Error fetching data").await;
    }

    #[tokio::test]
    async fn test_detail_failure_message() {
        let server = create_broken_server();
        assert_internal(&server, "/api/products/1", "Error fetching product").await;
    }

    #[tokio::test]
    async fn test_search_failure_message() {
        let server = create_broken_server();
        assert_internal(&server, "/api/products/search/x", "Error searching products").await;
    }

    #[tokio::test]
    async fn test_health_unaffected_by_storage() {
        let server = create_broken_server();
        server.get("/health").await.assert_status_ok();
    }
}

// =============================================================================
// Custom Route Tests
// =============================================================================

mod custom_route_tests {
    use super::*;
    use axum::{Router, routing::get};

    #[tokio::test]
    async fn test_custom_routes_are_merged() {
        let app = ServerBuilder::new()
            .with_product_service(InMemoryProductService::with_sample_data())
            .with_custom_routes(Router::new().route("/version", get(|| async { "0.1.0" })))
            .build()
            .unwrap();
        let server = TestServer::new(app);

        let response = server.get("/version").await;
        response.assert_status_ok();
        response.assert_text("0.1.0");

        server.get("/api/products").await.assert_status_ok();
    }
}
