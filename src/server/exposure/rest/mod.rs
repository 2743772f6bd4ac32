//! REST API exposure for the catalog
//!
//! This module provides REST-specific routing: the product endpoints, health
//! checks, CORS and request tracing. It consumes an `AppState` and produces
//! an Axum `Router`.

use crate::server::handlers::AppState;
use crate::server::router::build_product_routes;
use anyhow::Result;
use axum::{Json, Router, routing::get};
use serde_json::{Value, json};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

/// REST API exposure implementation
pub struct RestExposure;

impl RestExposure {
    /// Build the REST router
    ///
    /// # Arguments
    ///
    /// * `state` - Shared handler state
    /// * `custom_routes` - Additional custom routes to merge
    ///
    /// # Returns
    ///
    /// Returns a fully configured Axum router with:
    /// - Health check routes
    /// - Product routes
    /// - Custom routes
    /// - Permissive CORS (the catalog is read-only and public)
    /// - HTTP request tracing
    pub fn build_router(state: AppState, custom_routes: Vec<Router>) -> Result<Router> {
        let mut app = Self::health_routes().merge(build_product_routes(state));

        for custom_router in custom_routes {
            app = app.merge(custom_router);
        }

        Ok(app
            .layer(CorsLayer::permissive())
            .layer(TraceLayer::new_for_http()))
    }

    /// Build health check routes
    fn health_routes() -> Router {
        Router::new()
            .route("/health", get(Self::health_check))
            .route("/healthz", get(Self::health_check))
    }

    /// Health check endpoint handler
    async fn health_check() -> Json<Value> {
        Json(json!({
            "status": "ok",
            "service": "catalog-rs"
        }))
    }
}
