//! API Exposure modules
//!
//! Each exposure consumes the shared [`AppState`](crate::server::handlers::AppState)
//! and produces a Router for its protocol.

pub mod rest;

// Re-export for convenience
pub use rest::RestExposure;
