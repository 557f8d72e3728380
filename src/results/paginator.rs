use crate::models::ProductSummary;
use crate::view::PageNav;

/// Products per page in the quiz result grid
pub const PAGE_SIZE: usize = 3;

/// One rendered page
#[derive(Debug, Clone, PartialEq)]
pub struct PageSlice<'a> {
    pub page: usize,
    pub items: &'a [ProductSummary],
    pub nav: PageNav,
}

/// Splits a result set into fixed-size pages.
///
/// Invariant: when the result set is non-empty, `page < page_count()`.
#[derive(Debug, Clone)]
pub struct ResultPaginator {
    items: Vec<ProductSummary>,
    page: usize,
    page_size: usize,
}

impl Default for ResultPaginator {
    fn default() -> Self {
        Self::new()
    }
}

impl ResultPaginator {
    pub fn new() -> Self {
        Self::with_page_size(PAGE_SIZE)
    }

    pub fn with_page_size(page_size: usize) -> Self {
        Self { items: Vec::new(), page: 0, page_size: page_size.max(1) }
    }

    /// Swap in a new result set and go back to the first page
    pub fn replace(&mut self, items: Vec<ProductSummary>) {
        self.items = items;
        self.page = 0;
    }

    pub fn clear(&mut self) {
        self.replace(Vec::new());
    }

    pub fn items(&self) -> &[ProductSummary] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn page_count(&self) -> usize {
        self.items.len().div_ceil(self.page_size)
    }

    /// Move to `page` (clamped into range) and return what it shows
    pub fn render(&mut self, page: usize) -> PageSlice<'_> {
        self.page = page.min(self.page_count().saturating_sub(1));
        self.current()
    }

    /// The current page without moving
    pub fn current(&self) -> PageSlice<'_> {
        let n = self.items.len();
        if n == 0 {
            return PageSlice { page: 0, items: &[], nav: PageNav::HIDDEN };
        }

        let start = self.page * self.page_size;
        let end = (start + self.page_size).min(n);

        PageSlice {
            page: self.page,
            items: &self.items[start..end],
            nav: PageNav {
                visible: true,
                prev_disabled: self.page == 0,
                next_disabled: (self.page + 1) * self.page_size >= n,
            },
        }
    }

    /// Advance one page; false at the last page
    pub fn next(&mut self) -> bool {
        if (self.page + 1) * self.page_size < self.items.len() {
            self.page += 1;
            true
        } else {
            false
        }
    }

    /// Go back one page; false at the first page
    pub fn prev(&mut self) -> bool {
        if self.page > 0 {
            self.page -= 1;
            true
        } else {
            false
        }
    }
}
