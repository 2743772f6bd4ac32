//! View controller tying the API client to the table engine
//!
//! [`CatalogView`] is shared by reference: fetches run without holding the
//! view lock, so search, sort and paging stay responsive while a refresh is
//! in flight.

use super::api::{ApiClient, FetchError};
use super::guard::FetchGuard;
use crate::config::CatalogConfig;
use crate::core::Product;
use crate::engine::export::{self, ExportError};
use crate::engine::{SortKey, SortState, TableView, ViewStats};
use crate::layout::{DisplayRow, Layout, Renderer};
use chrono::Local;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard, PoisonError};

/// Shown when the product list cannot be fetched
pub const FETCH_FAILED_MESSAGE: &str = "Gagal mengambil data produk";

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum LoadState {
    #[default]
    Idle,
    Loading,
    Ready,
    Failed { message: String },
}

/// Result of [`CatalogView::refresh`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RefreshOutcome {
    Refreshed { count: usize },
    Failed { message: String },
    /// Another refresh holds the guard; nothing was requested
    AlreadyInFlight,
}

/// Result of [`CatalogView::product_detail`]
#[derive(Debug, Clone, PartialEq)]
pub enum DetailState {
    Found(Product),
    NotFound { id: i64 },
    Failed { message: String },
}

#[derive(Debug)]
struct ViewInner {
    table: TableView,
    renderer: Renderer,
    load_state: LoadState,
    notice: Option<String>,
}

#[derive(Debug)]
pub struct CatalogView {
    client: ApiClient,
    guard: FetchGuard,
    inner: Mutex<ViewInner>,
}

impl CatalogView {
    pub fn new(client: ApiClient, table: TableView, renderer: Renderer) -> Self {
        Self {
            client,
            guard: FetchGuard::new(),
            inner: Mutex::new(ViewInner {
                table,
                renderer,
                load_state: LoadState::Idle,
                notice: None,
            }),
        }
    }

    /// Client, page size and layout preset all taken from `config`
    pub fn from_config(config: &CatalogConfig, layout: Layout) -> Result<Self, FetchError> {
        let client = ApiClient::new(&config.client)?;
        Ok(Self::new(
            client,
            TableView::new(config.view.page_size),
            Renderer::new(layout, config.layouts.preset(layout)),
        ))
    }

    fn lock(&self) -> MutexGuard<'_, ViewInner> {
        // view state stays consistent even if a reader panicked
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Shared handle on the in-flight flag
    pub fn fetch_guard(&self) -> FetchGuard {
        self.guard.clone()
    }

    // === Fetching ===

    /// Reset the view and replace the records with a fresh fetch
    ///
    /// Ignored while another refresh is in flight. On failure the previous
    /// records stay and the load state carries the message.
    pub async fn refresh(&self) -> RefreshOutcome {
        let Some(_permit) = self.guard.try_acquire() else {
            tracing::debug!("refresh ignored, fetch already in flight");
            return RefreshOutcome::AlreadyInFlight;
        };

        {
            let mut inner = self.lock();
            inner.table.reset();
            inner.load_state = LoadState::Loading;
        }

        let result = self.client.fetch_products().await;

        let mut inner = self.lock();
        match result {
            Ok(records) => {
                let count = records.len();
                inner.table.set_records(records);
                inner.load_state = LoadState::Ready;
                tracing::info!(count, "products loaded");
                RefreshOutcome::Refreshed { count }
            }
            Err(e) => {
                tracing::warn!(error = %e, "product fetch failed");
                let message = FETCH_FAILED_MESSAGE.to_string();
                inner.load_state = LoadState::Failed {
                    message: message.clone(),
                };
                RefreshOutcome::Failed { message }
            }
        }
    }

    /// Fetch one product for a detail panel
    pub async fn product_detail(&self, id: i64) -> DetailState {
        match self.client.fetch_product(id).await {
            Ok(product) => DetailState::Found(product),
            Err(FetchError::NotFound { id }) => DetailState::NotFound { id },
            Err(e) => {
                tracing::warn!(error = %e, id, "product detail fetch failed");
                DetailState::Failed {
                    message: e.to_string(),
                }
            }
        }
    }

    // === Interaction ===

    pub fn set_search_term(&self, term: impl Into<String>) {
        self.lock().table.set_search_term(term);
    }

    pub fn toggle_sort(&self, key: SortKey) {
        self.lock().table.toggle_sort(key);
    }

    pub fn go_to_page(&self, page: usize) {
        self.lock().table.go_to_page(page);
    }

    pub fn next_page(&self) {
        self.lock().table.next_page();
    }

    pub fn prev_page(&self) {
        self.lock().table.prev_page();
    }

    /// Switch presentation; the view state is untouched
    pub fn set_renderer(&self, renderer: Renderer) {
        self.lock().renderer = renderer;
    }

    // === Read side ===

    pub fn load_state(&self) -> LoadState {
        self.lock().load_state.clone()
    }

    /// Last export failure, if any
    pub fn notice(&self) -> Option<String> {
        self.lock().notice.clone()
    }

    pub fn clear_notice(&self) {
        self.lock().notice = None;
    }

    pub fn sort_state(&self) -> SortState {
        self.lock().table.sort_state()
    }

    pub fn stats(&self) -> ViewStats {
        self.lock().table.stats()
    }

    pub fn visible(&self) -> Vec<Product> {
        self.lock().table.visible()
    }

    /// Current page as rendered by the active layout
    pub fn visible_rows(&self) -> Vec<DisplayRow> {
        let inner = self.lock();
        inner.renderer.render(&inner.table.visible())
    }

    /// Read access to the engine for anything not wrapped above
    pub fn with_table<R>(&self, f: impl FnOnce(&TableView) -> R) -> R {
        f(&self.lock().table)
    }

    // === Export ===

    /// Write today's CSV of the filtered set into `dir`
    ///
    /// Failures are kept as the view's notice instead of being returned.
    pub fn export_csv_to(&self, dir: &Path) -> Option<PathBuf> {
        let mut inner = self.lock();
        let result = export::write_csv(dir, inner.table.filtered(), Local::now().date_naive());
        Self::settle_export(&mut inner, result)
    }

    /// Printable HTML of the filtered set in the active layout
    pub fn printable(&self) -> Option<String> {
        let mut inner = self.lock();
        let result = inner.table.printable(&inner.renderer, Local::now());
        Self::settle_export(&mut inner, result)
    }

    fn settle_export<T>(inner: &mut ViewInner, result: Result<T, ExportError>) -> Option<T> {
        match result {
            Ok(value) => {
                inner.notice = None;
                Some(value)
            }
            Err(e) => {
                tracing::warn!(error = %e, "export failed");
                inner.notice = Some(format!("Gagal mengekspor data: {}", e));
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ClientConfig;

    fn offline_view(records: Vec<Product>) -> CatalogView {
        let client = ApiClient::new(&ClientConfig::default()).unwrap();
        CatalogView::new(
            client,
            TableView::new(2).with_records(records),
            Renderer::new(Layout::Grid, Layout::Grid.default_preset()),
        )
    }

    fn records() -> Vec<Product> {
        vec![
            Product::new(1, 5, "Nasi Goreng", 12000.0, 15),
            Product::new(2, 5, "Mie Goreng", 10000.0, 60),
            Product::new(3, 6, "Ayam Bakar", 25000.0, 8),
        ]
    }

    #[test]
    fn test_starts_idle_without_notice() {
        let view = offline_view(Vec::new());
        assert_eq!(view.load_state(), LoadState::Idle);
        assert_eq!(view.notice(), None);
    }

    #[tokio::test]
    async fn test_refresh_ignored_while_guard_held() {
        let view = offline_view(records());
        view.set_search_term("goreng");
        let guard = view.fetch_guard();
        let _permit = guard.try_acquire().unwrap();

        assert_eq!(view.refresh().await, RefreshOutcome::AlreadyInFlight);
        // no reset happened either
        assert_eq!(view.with_table(|t| t.search_term().to_string()), "goreng");
        assert_eq!(view.load_state(), LoadState::Idle);
    }

    #[test]
    fn test_visible_rows_use_active_layout() {
        let view = offline_view(records());
        view.toggle_sort(SortKey::Stock);
        let rows = view.visible_rows();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].name, "Ayam Bakar");
        assert_eq!(rows[0].tier_label, "Sedikit");

        view.set_renderer(Renderer::new(Layout::Table, Layout::Table.default_preset()));
        assert_eq!(view.visible_rows()[0].name, "Ayam Bakar");
    }

    #[test]
    fn test_export_failure_becomes_notice() {
        let view = offline_view(records());
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("does-not-exist");

        assert!(view.export_csv_to(&missing).is_none());
        let notice = view.notice().unwrap();
        assert!(notice.starts_with("Gagal mengekspor data"));

        let path = view.export_csv_to(dir.path()).unwrap();
        assert!(path.exists());
        assert_eq!(view.notice(), None);
    }

    #[test]
    fn test_printable_covers_filtered_set() {
        let view = offline_view(records());
        view.set_search_term("goreng");
        let html = view.printable().unwrap();
        assert!(html.contains("Total Produk: 2"));
        assert!(html.contains("Mie Goreng"));
        assert!(!html.contains("Ayam Bakar"));
    }

    #[test]
    fn test_printable_leaves_view_untouched() {
        let view = offline_view(records());
        view.toggle_sort(SortKey::Price);
        view.next_page();

        let snapshot = |view: &CatalogView| {
            view.with_table(|t| (t.search_term().to_string(), t.sort_state(), t.current_page()))
        };
        let before = snapshot(&view);
        let stats = view.stats();

        let html = view.printable().unwrap();
        // the whole filtered set, not just page 2
        assert!(html.contains("Total Produk: 3"));
        assert!(html.contains("Mie Goreng"));
        assert!(!html.contains("<input"));
        assert!(!html.contains("<button"));

        assert_eq!(snapshot(&view), before);
        assert_eq!(view.stats(), stats);
        assert_eq!(view.visible_rows().len(), 1);
    }
}
