//! Orphan-aware pagination
//!
//! `Paginator` holds the page-size policy for a listing (items per page plus
//! an orphan threshold) and does the page math; `Page` carries one slice of
//! results together with the counts the templates need.
//!
//! The orphan rule: a trailing page with `orphans` or fewer items does not
//! form a page of its own, it merges into the previous page.

use serde::Serialize;

/// Page-size policy for a listing.
#[derive(Debug, Clone, Copy)]
pub struct Paginator {
    per_page: usize,
    orphans: usize,
}

impl Paginator {
    pub fn new(per_page: usize, orphans: usize) -> Self {
        Self {
            per_page: per_page.max(1),
            orphans,
        }
    }

    /// Total number of pages for `total` items. An empty result set has
    /// zero pages.
    pub fn total_pages(&self, total: usize) -> usize {
        if total == 0 {
            return 0;
        }
        let hits = total.saturating_sub(self.orphans).max(1);
        (hits + self.per_page - 1) / self.per_page
    }

    /// Clamp a 1-based page number into the valid range. Out-of-range
    /// requests land on the nearest valid page rather than failing.
    pub fn clamp(&self, page: usize, total: usize) -> usize {
        let last = self.total_pages(total).max(1);
        page.clamp(1, last)
    }

    /// Offset and limit for the given page. The final page's limit extends
    /// to absorb merged orphans.
    pub fn bounds(&self, page: usize, total: usize) -> (usize, usize) {
        let pages = self.total_pages(total);
        if pages == 0 {
            return (0, 0);
        }
        let page = self.clamp(page, total);
        let offset = (page - 1) * self.per_page;
        let limit = if page == pages {
            total - offset
        } else {
            self.per_page
        };
        (offset, limit)
    }
}

/// One page of results.
#[derive(Debug, Clone, Serialize)]
pub struct Page<T> {
    /// Items in this page.
    pub items: Vec<T>,
    /// 1-based page number (already clamped).
    pub number: usize,
    /// Total matching items across all pages.
    pub total_items: usize,
    /// Total page count honoring the orphan rule.
    pub total_pages: usize,
}

impl<T> Page<T> {
    pub fn new(items: Vec<T>, number: usize, total_items: usize, total_pages: usize) -> Self {
        Self {
            items,
            number,
            total_items,
            total_pages,
        }
    }

    pub fn has_other_pages(&self) -> bool {
        self.total_pages > 1
    }

    pub fn has_next(&self) -> bool {
        self.number < self.total_pages
    }

    pub fn has_prev(&self) -> bool {
        self.number > 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_orphans_merge_into_previous_page() {
        let paginator = Paginator::new(4, 1);
        // 5 items: the lone trailing item merges, one page of 5
        assert_eq!(paginator.total_pages(5), 1);
        assert_eq!(paginator.bounds(1, 5), (0, 5));
        // 6 items: trailing 2 exceed the orphan threshold, two pages
        assert_eq!(paginator.total_pages(6), 2);
        assert_eq!(paginator.bounds(1, 6), (0, 4));
        assert_eq!(paginator.bounds(2, 6), (4, 2));
    }

    #[test]
    fn test_no_orphans_is_plain_ceiling_division() {
        let paginator = Paginator::new(3, 0);
        assert_eq!(paginator.total_pages(9), 3);
        assert_eq!(paginator.total_pages(10), 4);
        assert_eq!(paginator.bounds(4, 10), (9, 1));
    }

    #[test]
    fn test_page_sum_equals_total() {
        let paginator = Paginator::new(4, 1);
        for total in 0..40 {
            let pages = paginator.total_pages(total);
            let mut sum = 0;
            for page in 1..=pages {
                let (_, limit) = paginator.bounds(page, total);
                sum += limit;
                if page < pages {
                    // only the merged last page may differ from per_page
                    assert_eq!(limit, 4);
                }
            }
            assert_eq!(sum, total);
        }
    }

    #[test]
    fn test_out_of_range_pages_clamp() {
        let paginator = Paginator::new(4, 1);
        assert_eq!(paginator.clamp(0, 6), 1);
        assert_eq!(paginator.clamp(99, 6), 2);
        assert_eq!(paginator.clamp(1, 0), 1);
    }

    #[test]
    fn test_empty_result_set() {
        let paginator = Paginator::new(4, 1);
        assert_eq!(paginator.total_pages(0), 0);
        assert_eq!(paginator.bounds(1, 0), (0, 0));
        let page: Page<i64> = Page::new(Vec::new(), 1, 0, 0);
        assert!(!page.has_other_pages());
        assert!(!page.has_next());
        assert!(!page.has_prev());
    }

    #[test]
    fn test_page_navigation() {
        let page = Page::new(vec![1, 2, 3, 4], 1, 6, 2);
        assert!(page.has_other_pages());
        assert!(page.has_next());
        assert!(!page.has_prev());
        let last = Page::new(vec![5, 6], 2, 6, 2);
        assert!(!last.has_next());
        assert!(last.has_prev());
    }
}
