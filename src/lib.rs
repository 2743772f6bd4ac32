//! # catalog
//!
//! A read-only product catalog: a REST API over a `products` table and a
//! client-side table view engine that turns the fetched records into pages,
//! CSV files and printable documents.
//!
//! ## Features
//!
//! - **Table View Engine**: search filter, stable single-column sort, pagination
//! - **Exports**: RFC 4180 CSV and printable HTML of the filtered set
//! - **Layouts**: table, grid and mobile renderings of the same view
//! - **REST API**: axum server with in-memory or PostgreSQL storage
//! - **Client**: typed API client with an in-flight fetch guard
//!
//! ## Quick Start
//!
//! ```rust
//! use catalog::prelude::*;
//!
//! let mut view = TableView::new(5).with_records(vec![
//!     Product::new(1, 5, "Nasi Goreng", 12000.0, 15),
//!     Product::new(2, 5, "Mie Goreng", 10000.0, 60),
//! ]);
//!
//! view.set_search_term("goreng");
//! view.toggle_sort(SortKey::Price);
//!
//! let names: Vec<_> = view.visible().into_iter().map(|p| p.product_name).collect();
//! assert_eq!(names, ["Mie Goreng", "Nasi Goreng"]);
//! ```

pub mod client;
pub mod config;
pub mod core;
pub mod engine;
pub mod layout;
pub mod server;
pub mod storage;

/// Re-exports of commonly used types and traits
pub mod prelude {
    // === Core ===
    pub use crate::core::{
        CatalogError, CatalogResult, Product, ProductService,
        error::{ConfigError, ProductError, StorageError, ValidationError},
    };

    // === Engine ===
    pub use crate::engine::{
        DEFAULT_PAGE_SIZE, Page, PageMeta, SortDirection, SortKey, SortState, StockThresholds,
        StockTier, TableView, ViewStats, format_currency,
    };

    // === Layouts ===
    pub use crate::layout::{DisplayRow, Layout, LayoutPreset, Renderer};

    // === Config ===
    pub use crate::config::CatalogConfig;

    // === Storage ===
    pub use crate::storage::InMemoryProductService;

    #[cfg(feature = "postgres")]
    pub use crate::storage::PostgresProductService;

    // === Server ===
    pub use crate::server::{AppState, ServerBuilder};

    // === Client ===
    pub use crate::client::{
        ApiClient, CatalogView, DetailState, FetchError, LoadState, RefreshOutcome,
    };
}
