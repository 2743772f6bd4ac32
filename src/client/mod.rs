//! Client side of the catalog
//!
//! - [`ApiClient`]: typed reqwest client for the product endpoints
//! - [`CatalogView`]: owns a [`TableView`](crate::engine::TableView), drives
//!   fetches and exports, and reports failures as state
//! - [`FetchGuard`]: keeps at most one list fetch in flight

pub mod api;
pub mod guard;
pub mod view;

pub use api::{ApiClient, FetchError};
pub use guard::{FetchGuard, FetchPermit};
pub use view::{CatalogView, DetailState, FETCH_FAILED_MESSAGE, LoadState, RefreshOutcome};
