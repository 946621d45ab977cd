//! # Pagination
//!
//! Page metadata is a pure function of `(page, page_size, total)` and is
//! recomputed from the latest result window every time it is needed.
//! Pages are zero-based; the displayed range is one-based and inclusive.

/// Fixed number of elements per page.
pub const PAGE_SIZE: u64 = 50;

/// Page metadata derived from the current page and the last known total.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    pub page: u64,
    pub page_size: u64,
    pub total: u64,
}

impl Pagination {
    pub fn new(page: u64, page_size: u64, total: u64) -> Self {
        Self {
            page,
            page_size,
            total,
        }
    }

    /// Offset of the first element of this page.
    pub fn offset(&self) -> u64 {
        self.page.saturating_mul(self.page_size)
    }

    /// `ceil(total / page_size)`.
    pub fn page_count(&self) -> u64 {
        if self.page_size == 0 {
            return 0;
        }
        self.total.div_ceil(self.page_size)
    }

    pub fn is_first_page(&self) -> bool {
        self.page == 0
    }

    pub fn is_last_page(&self) -> bool {
        self.page.saturating_add(1).saturating_mul(self.page_size) >= self.total
    }

    /// One-based inclusive `(first, last)` of the displayed elements, or
    /// `None` when there are no results.
    pub fn displayed_range(&self) -> Option<(u64, u64)> {
        if self.total == 0 {
            return None;
        }
        let first = self.offset().saturating_add(1);
        let last = self
            .page
            .saturating_add(1)
            .saturating_mul(self.page_size)
            .min(self.total);
        Some((first, last))
    }
}
