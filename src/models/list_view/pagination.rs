// src/models/list_view/pagination.rs

use std::num::NonZeroUsize;
use std::ops::Range;

use serde::Serialize;

use super::ListError;

/// Requested page. Size is always positive; number is at least 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Page {
    number: usize,
    size: usize,
}

impl Page {
    /// Page numbers below 1 clamp to 1; a non-positive size is rejected rather
    /// than coerced.
    pub fn new(number: i64, size: i64) -> Result<Self, ListError> {
        if size <= 0 {
            return Err(ListError::invalid(format!("page size must be positive, got {size}")));
        }
        let number = usize::try_from(number.max(1)).unwrap_or(usize::MAX);
        let size = usize::try_from(size).unwrap_or(usize::MAX);
        Ok(Page { number, size })
    }

    pub fn first(size: i64) -> Result<Self, ListError> {
        Self::new(1, size)
    }

    /// First page of a size known to be positive.
    pub const fn top(size: NonZeroUsize) -> Self {
        Page { number: 1, size: size.get() }
    }

    pub fn number(&self) -> usize {
        self.number
    }

    pub fn size(&self) -> usize {
        self.size
    }
}

/// One rendered page of survivors plus the totals the pager needs.
#[derive(Debug, Clone, Serialize)]
pub struct ViewResult<'r, R> {
    pub items: Vec<&'r R>,
    pub total_matched: usize,
    pub total_pages: usize,
    pub applied_page: usize,
    pub page_size: usize,
}

impl<R> ViewResult<'_, R> {
    pub fn is_empty(&self) -> bool {
        self.total_matched == 0
    }

    pub fn has_previous(&self) -> bool {
        self.applied_page > 1
    }

    pub fn has_next(&self) -> bool {
        self.applied_page < self.total_pages
    }

    /// 1-based position of the first item on this page, 0 when empty.
    pub fn first_position(&self) -> usize {
        if self.items.is_empty() {
            0
        } else {
            (self.applied_page - 1) * self.page_size + 1
        }
    }

    pub fn last_position(&self) -> usize {
        if self.items.is_empty() {
            0
        } else {
            self.first_position() + self.items.len() - 1
        }
    }
}

/// Never less than 1, so an empty result still has a page to show.
pub fn total_pages(total: usize, size: usize) -> usize {
    total.div_ceil(size.max(1)).max(1)
}

/// Returns (total_pages, applied_page, index range) for `total` items.
pub fn page_bounds(total: usize, page: Page) -> (usize, usize, Range<usize>) {
    let pages = total_pages(total, page.size);
    let applied = page.number.clamp(1, pages);
    let start = ((applied - 1) * page.size).min(total);
    let end = start.saturating_add(page.size).min(total);
    (pages, applied, start..end)
}

pub fn paginate<'r, R>(survivors: Vec<&'r R>, page: Page) -> ViewResult<'r, R> {
    let total_matched = survivors.len();
    let (total_pages, applied_page, range) = page_bounds(total_matched, page);
    let items = survivors
        .into_iter()
        .skip(range.start)
        .take(range.len())
        .collect();
    ViewResult {
        items,
        total_matched,
        total_pages,
        applied_page,
        page_size: page.size,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seven() -> Vec<u32> {
        (0..7).collect()
    }

    fn page_of(records: &[u32], n: i64, size: i64) -> ViewResult<'_, u32> {
        paginate(records.iter().collect(), Page::new(n, size).unwrap())
    }

    fn values(view: &ViewResult<'_, u32>) -> Vec<u32> {
        view.items.iter().map(|v| **v).collect()
    }

    #[test]
    fn seven_records_three_per_page() {
        let records = seven();
        let p1 = page_of(&records, 1, 3);
        let p2 = page_of(&records, 2, 3);
        let p3 = page_of(&records, 3, 3);
        assert_eq!(values(&p1), vec![0, 1, 2]);
        assert_eq!(values(&p2), vec![3, 4, 5]);
        assert_eq!(values(&p3), vec![6]);
        assert_eq!(p1.total_pages, 3);
        assert_eq!(p3.applied_page, 3);
    }

    #[test]
    fn out_of_range_page_clamps_to_last() {
        let records = seven();
        let view = page_of(&records, 9999, 3);
        assert_eq!(view.applied_page, 3);
        assert_eq!(values(&view), vec![6]);
    }

    #[test]
    fn page_below_one_clamps_to_first() {
        let records = seven();
        let view = page_of(&records, -4, 3);
        assert_eq!(view.applied_page, 1);
        assert_eq!(values(&view), vec![0, 1, 2]);
    }

    #[test]
    fn pages_cover_survivors_exactly_once() {
        let records: Vec<u32> = (0..23).collect();
        for size in 1..=25 {
            let pages = page_of(&records, 1, size).total_pages;
            let mut seen = Vec::new();
            for n in 1..=pages {
                seen.extend(values(&page_of(&records, n as i64, size)));
            }
            assert_eq!(seen, records, "page size {size}");
        }
    }

    #[test]
    fn empty_survivors_have_one_empty_page() {
        let records: Vec<u32> = Vec::new();
        let view = page_of(&records, 3, 10);
        assert_eq!(view.total_pages, 1);
        assert_eq!(view.applied_page, 1);
        assert!(view.items.is_empty());
        assert!(view.is_empty());
        assert_eq!(view.first_position(), 0);
        assert!(!view.has_next());
        assert!(!view.has_previous());
    }

    #[test]
    fn non_positive_size_is_rejected() {
        assert!(matches!(Page::new(1, 0), Err(ListError::InvalidArgument(_))));
        assert!(matches!(Page::first(-5), Err(ListError::InvalidArgument(_))));
    }

    #[test]
    fn positions_for_pager_label() {
        let records = seven();
        let view = page_of(&records, 3, 3);
        assert_eq!(view.first_position(), 7);
        assert_eq!(view.last_position(), 7);
        assert!(view.has_previous());

        let view = page_of(&records, 2, 3);
        assert_eq!((view.first_position(), view.last_position()), (4, 6));
        assert!(view.has_next());
    }

    #[test]
    fn huge_page_size_does_not_overflow() {
        let records = seven();
        let view = page_of(&records, 1, i64::MAX);
        assert_eq!(view.total_pages, 1);
        assert_eq!(values(&view).len(), 7);
    }
}
