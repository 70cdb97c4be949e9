//! Pagination response types

use serde::{Deserialize, Serialize};

/// Pagination metadata
///
/// ```json
/// {
///     "currentPage": 2,
///     "totalPages": 3,
///     "totalCount": 25,
///     "limit": 10,
///     "hasNextPage": true,
///     "hasPrevPage": true,
///     "nextPage": 3,
///     "prevPage": 1
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageMeta {
    /// Current page number (1-based)
    pub current_page: u64,
    pub total_pages: u64,
    pub total_count: u64,
    /// Items per page
    pub limit: u64,
    pub has_next_page: bool,
    pub has_prev_page: bool,
    pub next_page: Option<u64>,
    pub prev_page: Option<u64>,
}

impl PageMeta {
    /// Create pagination metadata for `page` of a listing with `total` items
    pub fn new(page: u64, limit: u64, total: u64) -> Self {
        let total_pages = if limit == 0 { 0 } else { total.div_ceil(limit) };
        let has_next_page = page < total_pages;
        let has_prev_page = page > 1;
        Self {
            current_page: page,
            total_pages,
            total_count: total,
            limit,
            has_next_page,
            has_prev_page,
            next_page: has_next_page.then_some(page + 1),
            prev_page: has_prev_page.then(|| page - 1),
        }
    }

    /// Number of items to skip before `page`, saturating for huge page numbers
    pub fn skip(page: u64, limit: u64) -> u64 {
        page.saturating_sub(1).saturating_mul(limit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_skip() {
        assert_eq!(PageMeta::skip(1, 10), 0);
        assert_eq!(PageMeta::skip(2, 10), 10);
        assert_eq!(PageMeta::skip(5, 25), 100);
    }

    #[test]
    fn test_skip_saturates() {
        assert_eq!(PageMeta::skip(9_223_372_036_854_775_807, 10), u64::MAX);
        assert_eq!(PageMeta::skip(u64::MAX, 100), u64::MAX);

        let meta = PageMeta::new(u64::MAX, 10, 25);
        assert!(!meta.has_next_page);
        assert_eq!(meta.prev_page, Some(u64::MAX - 1));
    }

    #[test]
    fn test_middle_page() {
        let meta = PageMeta::new(2, 10, 25);
        assert_eq!(meta.total_pages, 3);
        assert!(meta.has_next_page);
        assert!(meta.has_prev_page);
        assert_eq!(meta.next_page, Some(3));
        assert_eq!(meta.prev_page, Some(1));
    }

    #[test]
    fn test_first_and_last_page() {
        let first = PageMeta::new(1, 10, 20);
        assert_eq!(first.total_pages, 2);
        assert!(!first.has_prev_page);
        assert_eq!(first.prev_page, None);

        let last = PageMeta::new(2, 10, 20);
        assert!(!last.has_next_page);
        assert_eq!(last.next_page, None);
    }

    #[test]
    fn test_empty_listing() {
        let meta = PageMeta::new(1, 10, 0);
        assert_eq!(meta.total_pages, 0);
        assert!(!meta.has_next_page);
        assert!(!meta.has_prev_page);

        let json = serde_json::to_value(&meta).unwrap();
        assert!(json["nextPage"].is_null());
        assert!(json["prevPage"].is_null());
        assert_eq!(json["totalCount"], 0);
    }
}
