//! Page-number pagination used by the contact message inbox.
//!
//! Pages are 1-based. A [`PageRequest`] is built from raw query values and
//! clamped into range; [`PageInfo`] is computed once the total row count for
//! the active filter is known.

use serde::Serialize;

/// Page size used when the caller does not specify one.
pub const DEFAULT_PAGE_SIZE: i64 = 10;

/// Largest page size a caller may request.
pub const MAX_PAGE_SIZE: i64 = 100;

/// A validated page request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: i64,
    pub limit: i64,
}

impl PageRequest {
    /// Build a request from optional query values.
    ///
    /// `page` below 1 becomes 1; `limit` is clamped to `1..=MAX_PAGE_SIZE`.
    pub fn new(page: Option<i64>, limit: Option<i64>) -> Self {
        let page = page.unwrap_or(1).max(1);
        let limit = limit.unwrap_or(DEFAULT_PAGE_SIZE).clamp(1, MAX_PAGE_SIZE);
        Self { page, limit }
    }

    /// Number of rows to skip for this page.
    pub fn offset(&self) -> i64 {
        (self.page - 1).saturating_mul(self.limit)
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::new(None, None)
    }
}

/// Pagination metadata returned next to a page of results.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageInfo {
    pub page: i64,
    pub limit: i64,
    pub total_items: i64,
    pub total_pages: i64,
    pub has_next_page: bool,
    pub has_prev_page: bool,
}

impl PageInfo {
    pub fn new(request: PageRequest, total_items: i64) -> Self {
        let total_items = total_items.max(0);
        let total_pages = if total_items == 0 {
            0
        } else {
            (total_items + request.limit - 1) / request.limit
        };
        Self {
            page: request.page,
            limit: request.limit,
            total_items,
            total_pages,
            has_next_page: request.page.saturating_mul(request.limit) < total_items,
            has_prev_page: request.page > 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_when_absent() {
        let req = PageRequest::new(None, None);
        assert_eq!(req.page, 1);
        assert_eq!(req.limit, DEFAULT_PAGE_SIZE);
        assert_eq!(req.offset(), 0);
    }

    #[test]
    fn clamps_out_of_range_values() {
        let req = PageRequest::new(Some(0), Some(10_000));
        assert_eq!(req.page, 1);
        assert_eq!(req.limit, MAX_PAGE_SIZE);

        let req = PageRequest::new(Some(-3), Some(0));
        assert_eq!(req.page, 1);
        assert_eq!(req.limit, 1);
    }

    #[test]
    fn offset_skips_previous_pages() {
        let req = PageRequest::new(Some(3), Some(20));
        assert_eq!(req.offset(), 40);
    }

    #[test]
    fn second_page_of_fifteen() {
        let info = PageInfo::new(PageRequest::new(Some(2), Some(10)), 15);
        assert_eq!(info.total_pages, 2);
        assert!(!info.has_next_page);
        assert!(info.has_prev_page);
    }

    #[test]
    fn first_page_with_more_remaining() {
        let info = PageInfo::new(PageRequest::new(Some(1), Some(10)), 15);
        assert!(info.has_next_page);
        assert!(!info.has_prev_page);
    }

    #[test]
    fn exact_multiple_has_no_next_page() {
        let info = PageInfo::new(PageRequest::new(Some(2), Some(10)), 20);
        assert_eq!(info.total_pages, 2);
        assert!(!info.has_next_page);
    }

    #[test]
    fn empty_result_set() {
        let info = PageInfo::new(PageRequest::default(), 0);
        assert_eq!(info.total_pages, 0);
        assert!(!info.has_next_page);
        assert!(!info.has_prev_page);
    }
}
