//! Core module containing the product record, storage trait and error types

pub mod error;
pub mod product;
pub mod service;

pub use error::{CatalogError, CatalogResult};
pub use product::Product;
pub use service::ProductService;
