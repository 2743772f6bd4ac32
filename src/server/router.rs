//! Router builder utilities for product routes

use crate::server::handlers::{AppState, get_product, list_products, search_products};
use axum::{Router, routing::get};

/// Build the product API routes
///
/// - GET /api/products - List every product
/// - GET /api/products/{product_id} - Get one product
/// - GET /api/products/search/{keyword} - Search by name/description
pub fn build_product_routes(state: AppState) -> Router {
    Router::new()
        .route("/api/products", get(list_products))
        .route("/api/products/{product_id}", get(get_product))
        .route("/api/products/search/{keyword}", get(search_products))
        .with_state(state)
}
