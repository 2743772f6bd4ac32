//! HTTP handlers for the product endpoints
//!
//! Responses use the `{ success, data, total }` envelope; failures use
//! `{ success: false, message }` through [`CatalogError`].

use axum::{
    Json,
    extract::{Path, State},
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::core::error::{CatalogError, ProductError, ValidationError};
use crate::core::{Product, ProductService};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub product_service: Arc<dyn ProductService>,
}

/// Response for the list and search endpoints
#[derive(Debug, Serialize, Deserialize)]
pub struct ProductListResponse {
    pub success: bool,
    pub data: Vec<Product>,
    pub total: usize,
}

impl ProductListResponse {
    fn new(data: Vec<Product>) -> Self {
        Self {
            success: true,
            total: data.len(),
            data,
        }
    }
}

/// Response for the detail endpoint
#[derive(Debug, Serialize, Deserialize)]
pub struct ProductResponse {
    pub success: bool,
    pub data: Product,
}

/// Log the storage failure and hide it behind `message`
fn storage_failure(message: &str, err: anyhow::Error) -> CatalogError {
    tracing::error!(error = %err, "{}", message);
    CatalogError::Internal(message.to_string())
}

/// List every product
///
/// GET /api/products
pub async fn list_products(
    State(state): State<AppState>,
) -> Result<Json<ProductListResponse>, CatalogError> {
    let products = state
        .product_service
        .list()
        .await
        .map_err(|e| storage_failure("Error fetching data", e))?;

    Ok(Json(ProductListResponse::new(products)))
}

/// Get one product by id
///
/// GET /api/products/{product_id}
pub async fn get_product(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> Result<Json<ProductResponse>, CatalogError> {
    let product_id: i64 = raw_id
        .parse()
        .map_err(|_| ValidationError::InvalidId { value: raw_id })?;

    let product = state
        .product_service
        .get(product_id)
        .await
        .map_err(|e| storage_failure("Error fetching product", e))?
        .ok_or(ProductError::NotFound { id: product_id })?;

    Ok(Json(ProductResponse {
        success: true,
        data: product,
    }))
}

/// Search by name or description, most stocked first
///
/// GET /api/products/search/{keyword}
pub async fn search_products(
    State(state): State<AppState>,
    Path(keyword): Path<String>,
) -> Result<Json<ProductListResponse>, CatalogError> {
    let products = state
        .product_service
        .search(&keyword)
        .await
        .map_err(|e| storage_failure("Error searching products", e))?;

    tracing::debug!(keyword = %keyword, found = products.len(), "product search");
    Ok(Json(ProductListResponse::new(products)))
}
