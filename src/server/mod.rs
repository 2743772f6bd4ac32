//! Server module for the catalog HTTP API
//!
//! This module provides a `ServerBuilder` that registers:
//! - The read-only product routes under `/api/products`
//! - Health check routes

pub mod builder;
pub mod exposure;
pub mod handlers;
pub mod router;

pub use builder::ServerBuilder;
pub use handlers::{AppState, ProductListResponse, ProductResponse};
