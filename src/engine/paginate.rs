//! Client-side pagination

use crate::core::Product;
use serde::Serialize;

/// Default number of rows per page
pub const DEFAULT_PAGE_SIZE: usize = 5;

/// One page of records plus pagination metadata
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Page {
    /// Records on this page
    pub visible: Vec<Product>,

    /// Pagination metadata
    pub meta: PageMeta,
}

/// Pagination metadata
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PageMeta {
    /// Requested page number (starts at 1)
    pub page: usize,

    /// Number of rows per page
    pub page_size: usize,

    /// Number of records being paginated
    pub total: usize,

    /// Total number of pages, never below 1
    pub total_pages: usize,

    pub has_next: bool,
    pub has_prev: bool,
}

impl PageMeta {
    pub fn new(page: usize, page_size: usize, total: usize) -> Self {
        // A zero page size would divide by zero
        let page_size = page_size.max(1);
        let total_pages = total_pages(total, page_size);

        Self {
            page,
            page_size,
            total,
            total_pages,
            has_next: page < total_pages,
            has_prev: page > 1,
        }
    }
}

/// `max(1, ceil(total / page_size))`
pub fn total_pages(total: usize, page_size: usize) -> usize {
    total.div_ceil(page_size.max(1)).max(1)
}

/// Clamp a page number into `[1, total_pages]`
pub fn clamp_page(page: usize, total_pages: usize) -> usize {
    page.clamp(1, total_pages.max(1))
}

/// Slice `[(page-1)*size, page*size)` of `records`
///
/// An out-of-range page yields an empty slice; callers clamp first.
pub fn paginate(records: &[Product], page_size: usize, page: usize) -> Page {
    let meta = PageMeta::new(page, page_size, records.len());

    let start = page.saturating_sub(1).saturating_mul(meta.page_size);
    let end = start.saturating_add(meta.page_size).min(records.len());
    let visible = if page == 0 || start >= records.len() {
        Vec::new()
    } else {
        records[start..end].to_vec()
    };

    Page { visible, meta }
}
