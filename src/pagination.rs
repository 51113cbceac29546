//! This modules defines the common functionality for paging rows of the data grid.

use std::ops::Range;

/// The config for pagination
#[derive(Debug, Clone)]
pub struct PaginationConfig {
    /// The page number to default to when not specified in a request.
    pub default_page: u64,
    /// The number of rows to display per page.
    pub page_size: u64,
    /// The maximum number of page links to show in the pagination indicator.
    pub max_pages: u64,
}

impl Default for PaginationConfig {
    fn default() -> Self {
        Self {
            default_page: 1,
            page_size: 10,
            max_pages: 5,
        }
    }
}

/// One element of the pagination bar under the data grid.
#[derive(Debug, PartialEq, Eq)]
pub enum PaginationIndicator {
    Page(u64),
    CurrPage(u64),
    Ellipsis,
    NextButton(u64),
    BackButton(u64),
}

/// The number of pages needed to show `row_count` rows, at least one.
pub fn page_count(row_count: usize, page_size: u64) -> u64 {
    let page_size = page_size.max(1);

    (row_count as u64).div_ceil(page_size).max(1)
}

/// The range of row indices on `page` (1-based), clamped to `row_count`.
pub fn page_rows(page: u64, page_size: u64, row_count: usize) -> Range<usize> {
    let page_size = page_size.max(1) as usize;
    let start = (page.max(1) as usize - 1).saturating_mul(page_size);
    let start = start.min(row_count);
    let end = start.saturating_add(page_size).min(row_count);

    start..end
}

/// Build the pagination bar for `curr_page` of `page_count` pages, showing at
/// most `max_pages` consecutive page links around the current page.
pub fn create_pagination_indicators(
    curr_page: u64,
    page_count: u64,
    max_pages: u64,
) -> Vec<PaginationIndicator> {
    let max_pages = max_pages.max(1);
    let half = max_pages / 2;

    // Centre the window on the current page, then slide it back inside 1..=page_count.
    let window_end = (curr_page + half).max(max_pages).min(page_count);
    let window_start = window_end.saturating_sub(max_pages - 1).max(1);

    let mut indicators = Vec::new();

    if curr_page > 1 {
        indicators.push(PaginationIndicator::BackButton(curr_page - 1));
    }

    if window_start > 1 {
        indicators.push(PaginationIndicator::Page(1));
    }

    if window_start > 2 {
        indicators.push(PaginationIndicator::Ellipsis);
    }

    indicators.extend((window_start..=window_end).map(|page| {
        if page == curr_page {
            PaginationIndicator::CurrPage(page)
        } else {
            PaginationIndicator::Page(page)
        }
    }));

    if window_end + 1 < page_count {
        indicators.push(PaginationIndicator::Ellipsis);
    }

    if window_end < page_count {
        indicators.push(PaginationIndicator::Page(page_count));
    }

    if curr_page < page_count {
        indicators.push(PaginationIndicator::NextButton(curr_page + 1));
    }

    indicators
}

#[cfg(test)]
mod tests {
    use crate::pagination::{
        PaginationIndicator, create_pagination_indicators, page_count, page_rows,
    };

    #[test]
    fn shows_all_pages() {
        let want = [
            PaginationIndicator::CurrPage(1),
            PaginationIndicator::Page(2),
            PaginationIndicator::Page(3),
            PaginationIndicator::Page(4),
            PaginationIndicator::Page(5),
            PaginationIndicator::NextButton(2),
        ];

        let got = create_pagination_indicators(1, 5, 5);

        assert_eq!(want, got.as_slice());
    }

    #[test]
    fn shows_page_subset_on_left() {
        let want = [
            PaginationIndicator::CurrPage(1),
            PaginationIndicator::Page(2),
            PaginationIndicator::Page(3),
            PaginationIndicator::Page(4),
            PaginationIndicator::Page(5),
            PaginationIndicator::Ellipsis,
            PaginationIndicator::Page(10),
            PaginationIndicator::NextButton(2),
        ];

        let got = create_pagination_indicators(1, 10, 5);

        assert_eq!(want, got.as_slice());
    }

    #[test]
    fn shows_page_subset_in_middle() {
        let want = [
            PaginationIndicator::BackButton(5),
            PaginationIndicator::Page(1),
            PaginationIndicator::Ellipsis,
            PaginationIndicator::Page(4),
            PaginationIndicator::Page(5),
            PaginationIndicator::CurrPage(6),
            PaginationIndicator::Page(7),
            PaginationIndicator::Page(8),
            PaginationIndicator::Ellipsis,
            PaginationIndicator::Page(10),
            PaginationIndicator::NextButton(7),
        ];

        let got = create_pagination_indicators(6, 10, 5);

        assert_eq!(want, got.as_slice());
    }

    #[test]
    fn shows_page_subset_on_right() {
        let want = [
            PaginationIndicator::BackButton(9),
            PaginationIndicator::Page(1),
            PaginationIndicator::Ellipsis,
            PaginationIndicator::Page(6),
            PaginationIndicator::Page(7),
            PaginationIndicator::Page(8),
            PaginationIndicator::Page(9),
            PaginationIndicator::CurrPage(10),
        ];

        let got = create_pagination_indicators(10, 10, 5);

        assert_eq!(want, got.as_slice());
    }

    #[test]
    fn single_page_has_no_buttons() {
        let got = create_pagination_indicators(1, 1, 5);

        assert_eq!([PaginationIndicator::CurrPage(1)], got.as_slice());
    }

    #[test]
    fn page_count_rounds_up_and_is_never_zero() {
        assert_eq!(page_count(0, 10), 1);
        assert_eq!(page_count(10, 10), 1);
        assert_eq!(page_count(11, 10), 2);
        assert_eq!(page_count(344, 10), 35);
    }

    #[test]
    fn page_rows_are_clamped_to_row_count() {
        assert_eq!(page_rows(1, 10, 25), 0..10);
        assert_eq!(page_rows(3, 10, 25), 20..25);
        assert_eq!(page_rows(4, 10, 25), 25..25);
        assert_eq!(page_rows(0, 10, 25), 0..10);
    }
}
