//! This modules defines the common functionality for paging data.

use serde::Serialize;

use crate::Error;

/// The config for pagination
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaginationConfig {
    /// The page number to start on.
    pub default_page: i64,
    /// The number of transactions to display per page.
    pub default_page_size: usize,
    /// The maximum number of pages to show in the pagination indicator.
    pub max_pages: usize,
}

impl Default for PaginationConfig {
    fn default() -> Self {
        Self {
            default_page: 1,
            default_page_size: 5,
            max_pages: 5,
        }
    }
}

/// A clamped window onto a sequence of items.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Page {
    /// The page number, starting from 1.
    pub page: usize,
    /// The number of pages, at least 1 even when there are no items.
    pub total_pages: usize,
    /// The index of the first item on the page.
    pub offset: usize,
    /// The maximum number of items on a page.
    pub page_size: usize,
}

impl Page {
    /// The indices of the items on this page, for a sequence of `len` items.
    pub fn range(&self, len: usize) -> std::ops::Range<usize> {
        let start = self.offset.min(len);
        let end = self.offset.saturating_add(self.page_size).min(len);

        start..end
    }

    /// The items of `items` that are on this page.
    pub fn slice<'a, T>(&self, items: &'a [T]) -> &'a [T] {
        &items[self.range(items.len())]
    }
}

/// Work out which page to show for `item_count` items split into pages of `page_size`.
///
/// `requested_page` is clamped to the pages that exist, so zero, negative or
/// too-large page numbers never produce an error. A `page_size` of zero is
/// treated as one.
pub fn paginate(item_count: usize, page_size: usize, requested_page: i64) -> Page {
    let page_size = page_size.max(1);
    let total_pages = item_count.div_ceil(page_size).max(1);
    let last_page = i64::try_from(total_pages).unwrap_or(i64::MAX);
    let page = requested_page.clamp(1, last_page) as usize;

    Page {
        page,
        total_pages,
        offset: (page - 1) * page_size,
        page_size,
    }
}

/// The page the user is looking at.
///
/// The page number may point past the last page after items are removed or the
/// filters change, so it is clamped, and written back, every time a view is
/// derived with [PageState::clamp].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageState {
    current_page: i64,
    page_size: usize,
}

impl PageState {
    /// Start on the first page.
    ///
    /// # Errors
    /// Returns [Error::InvalidPageSize] if `page_size` is zero.
    pub fn new(page_size: usize) -> Result<Self, Error> {
        if page_size == 0 {
            return Err(Error::InvalidPageSize);
        }

        Ok(Self {
            current_page: 1,
            page_size,
        })
    }

    /// The requested page number. This is only guaranteed to be in range right
    /// after [PageState::clamp].
    pub fn current_page(&self) -> i64 {
        self.current_page
    }

    /// The number of items per page.
    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// Request `page`. Out of range values are clamped on the next view.
    pub fn go_to(&mut self, page: i64) {
        self.current_page = page;
    }

    /// Move to the first page.
    pub fn reset(&mut self) {
        self.current_page = 1;
    }

    /// Request the page after the current one.
    pub fn next_page(&mut self) {
        self.current_page = self.current_page.saturating_add(1);
    }

    /// Request the page before the current one, stopping at the first page.
    pub fn previous_page(&mut self) {
        if self.current_page > 1 {
            self.current_page -= 1;
        }
    }

    /// Clamp the current page to the pages available for `item_count` items and
    /// return the resulting page.
    pub fn clamp(&mut self, item_count: usize) -> Page {
        let page = paginate(item_count, self.page_size, self.current_page);
        self.current_page = page.page as i64;

        page
    }
}

/// One element of the page navigation shown under a table.
#[derive(Debug, PartialEq, Eq)]
pub enum PaginationIndicator {
    /// A link to another page.
    Page(usize),
    /// The page being shown.
    CurrPage(usize),
    /// A gap in the page numbers.
    Ellipsis,
    /// A link to the next page.
    NextButton(usize),
    /// A link to the previous page.
    BackButton(usize),
}

/// Build the page navigation for `page`.
///
/// At most `max_pages` consecutive page numbers are listed, centred on the
/// current page where possible. The first and last pages are always reachable.
pub fn create_pagination_indicators(page: &Page, max_pages: usize) -> Vec<PaginationIndicator> {
    let current = page.page;
    let count = page.total_pages;
    let max_pages = max_pages.max(1);
    let half = max_pages / 2;

    let (first, last) = if count <= max_pages {
        (1, count)
    } else if current <= half {
        (1, max_pages)
    } else if current > count - half {
        (count - max_pages + 1, count)
    } else {
        (current - half, current - half + max_pages - 1)
    };

    let mut indicators = Vec::new();

    if current > 1 {
        indicators.push(PaginationIndicator::BackButton(current - 1));
    }

    if first > 1 {
        indicators.push(PaginationIndicator::Page(1));
        if first > 2 {
            indicators.push(PaginationIndicator::Ellipsis);
        }
    }

    indicators.extend((first..=last).map(|number| {
        if number == current {
            PaginationIndicator::CurrPage(number)
        } else {
            PaginationIndicator::Page(number)
        }
    }));

    if last < count {
        if last < count - 1 {
            indicators.push(PaginationIndicator::Ellipsis);
        }
        indicators.push(PaginationIndicator::Page(count));
    }

    if current < count {
        indicators.push(PaginationIndicator::NextButton(current + 1));
    }

    indicators
}


#[cfg(test)]
mod pagination_indicator_tests {
    use super::{PaginationIndicator, create_pagination_indicators, paginate};

    #[test]
    fn single_page_has_no_buttons() {
        let got = create_pagination_indicators(&paginate(3, 5, 1), 5);

        assert_eq!(got, [PaginationIndicator::CurrPage(1)]);
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

        let got = create_pagination_indicators(&paginate(50, 5, 1), 5);

        assert_eq!(want, got.as_slice());
    }

    #[test]
    fn shows_page_subset_in_center() {
        let want = [
            PaginationIndicator::BackButton(4),
            PaginationIndicator::Page(1),
            PaginationIndicator::Ellipsis,
            PaginationIndicator::Page(3),
            PaginationIndicator::Page(4),
            PaginationIndicator::CurrPage(5),
            PaginationIndicator::Page(6),
            PaginationIndicator::Page(7),
            PaginationIndicator::Ellipsis,
            PaginationIndicator::Page(10),
            PaginationIndicator::NextButton(6),
        ];

        let got = create_pagination_indicators(&paginate(50, 5, 5), 5);

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

        let got = create_pagination_indicators(&paginate(50, 5, 10), 5);

        assert_eq!(want, got.as_slice());
    }
}
