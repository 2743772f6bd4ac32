//! Table view engine
//!
//! Derives what a product list shows from the raw fetched records:
//!
//! ```text
//! raw records ──▶ filter ──▶ sort ──▶ paginate ──▶ visible rows
//!                               │
//!                               └──▶ export (CSV / print), whole filtered set
//! ```
//!
//! The stages are pure functions ([`filter::filter`], [`sort::sort`],
//! [`paginate::paginate`], [`export::to_csv`]). [`TableView`] owns the view
//! state and keeps the derived sequence current after every operation.

pub mod export;
pub mod filter;
pub mod format;
pub mod paginate;
pub mod sort;

pub use export::{ExportError, csv_filename, to_csv, to_printable};
pub use format::{StockThresholds, StockTier, format_currency};
pub use paginate::{DEFAULT_PAGE_SIZE, Page, PageMeta, paginate};
pub use sort::{SortDirection, SortKey, SortState};

use crate::core::Product;
use crate::core::error::ValidationError;
use crate::layout::Renderer;
use chrono::{DateTime, Local};
use serde::Serialize;

/// Summary figures shown under the table
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ViewStats {
    /// All fetched records
    pub total: usize,
    /// Records passing the search filter
    pub filtered: usize,
    /// Records on the current page
    pub visible: usize,
    pub current_page: usize,
    pub total_pages: usize,
    /// Σ price × stock over all fetched records
    pub inventory_value: f64,
}

/// View state plus the records it is applied to
///
/// Operations never touch the raw records; the filtered and sorted sequence
/// is rebuilt whenever an input changes, and `current_page` is kept inside
/// `[1, total_pages]`.
#[derive(Debug, Clone)]
pub struct TableView {
    records: Vec<Product>,
    search_term: String,
    sort: SortState,
    current_page: usize,
    page_size: usize,
    processed: Vec<Product>,
}

impl Default for TableView {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE)
    }
}

impl TableView {
    /// Empty view.
    ///
    /// A zero page size falls back to [`DEFAULT_PAGE_SIZE`] here; use
    /// [`TableView::try_new`] to reject it instead, as
    /// [`TableView::set_page_size`] does.
    pub fn new(page_size: usize) -> Self {
        Self {
            records: Vec::new(),
            search_term: String::new(),
            sort: SortState::default(),
            current_page: 1,
            page_size: if page_size == 0 {
                DEFAULT_PAGE_SIZE
            } else {
                page_size
            },
            processed: Vec::new(),
        }
    }

    /// Empty view, rejecting a zero page size
    pub fn try_new(page_size: usize) -> Result<Self, ValidationError> {
        check_page_size(page_size)?;
        Ok(Self::new(page_size))
    }

    pub fn with_records(mut self, records: Vec<Product>) -> Self {
        self.set_records(records);
        self
    }

    // === Accessors ===

    pub fn records(&self) -> &[Product] {
        &self.records
    }

    pub fn search_term(&self) -> &str {
        &self.search_term
    }

    pub fn sort_state(&self) -> SortState {
        self.sort
    }

    pub fn current_page(&self) -> usize {
        self.current_page
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// Filtered and sorted records, the set every export works on
    pub fn filtered(&self) -> &[Product] {
        &self.processed
    }

    pub fn total_pages(&self) -> usize {
        paginate::total_pages(self.processed.len(), self.page_size)
    }

    pub fn page(&self) -> Page {
        paginate(&self.processed, self.page_size, self.current_page)
    }

    pub fn visible(&self) -> Vec<Product> {
        self.page().visible
    }

    // === Operations ===

    /// Replace the records wholesale (a fresh fetch)
    pub fn set_records(&mut self, records: Vec<Product>) {
        self.records = records;
        self.recompute();
        self.clamp_page();
    }

    /// Change the search term; returns to page 1
    pub fn set_search_term(&mut self, term: impl Into<String>) {
        self.search_term = term.into();
        self.current_page = 1;
        self.recompute();
    }

    /// Header click on `key`; returns to page 1
    pub fn toggle_sort(&mut self, key: SortKey) {
        self.set_sort(self.sort.toggled(key));
    }

    /// Set the sort explicitly; returns to page 1
    pub fn set_sort(&mut self, sort: SortState) {
        self.sort = sort;
        self.current_page = 1;
        self.recompute();
    }

    pub fn set_page_size(&mut self, page_size: usize) -> Result<(), ValidationError> {
        check_page_size(page_size)?;
        self.page_size = page_size;
        self.clamp_page();
        Ok(())
    }

    /// Jump to `page`, clamped into range
    pub fn go_to_page(&mut self, page: usize) {
        self.current_page = paginate::clamp_page(page, self.total_pages());
    }

    pub fn next_page(&mut self) {
        self.go_to_page(self.current_page.saturating_add(1));
    }

    pub fn prev_page(&mut self) {
        self.go_to_page(self.current_page.saturating_sub(1));
    }

    /// Back to defaults: empty search, first page, no sort
    pub fn reset(&mut self) {
        self.search_term.clear();
        self.sort = SortState::default();
        self.current_page = 1;
        self.recompute();
    }

    // === Derived output ===

    pub fn stats(&self) -> ViewStats {
        let page = self.page();
        ViewStats {
            total: self.records.len(),
            filtered: self.processed.len(),
            visible: page.visible.len(),
            current_page: self.current_page,
            total_pages: page.meta.total_pages,
            inventory_value: self.records.iter().map(Product::inventory_value).sum(),
        }
    }

    /// CSV of the filtered set, independent of the current page
    pub fn export_csv(&self) -> String {
        to_csv(&self.processed)
    }

    /// Printable document of the filtered set as rendered by `renderer`
    pub fn printable(
        &self,
        renderer: &Renderer,
        generated_at: DateTime<Local>,
    ) -> Result<String, ExportError> {
        to_printable(&renderer.render(&self.processed), generated_at)
    }

    fn recompute(&mut self) {
        let filtered = filter::filter(&self.records, &self.search_term);
        self.processed = sort::sort(&filtered, self.sort.key, self.sort.direction);
        tracing::debug!(
            total = self.records.len(),
            filtered = self.processed.len(),
            search = %self.search_term,
            "table view recomputed"
        );
    }

    fn clamp_page(&mut self) {
        self.current_page = paginate::clamp_page(self.current_page, self.total_pages());
    }
}

fn check_page_size(page_size: usize) -> Result<(), ValidationError> {
    if page_size == 0 {
        return Err(ValidationError::FieldError {
            field: "page_size".to_string(),
            message: "must be at least 1".to_string(),
        });
    }
    Ok(())
}
