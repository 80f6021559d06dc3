/// Items revealed per "load more" step unless configured otherwise
pub const DEFAULT_PAGE_SIZE: usize = 12;

/// A growable prefix window over a list of items
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page<'a, T> {
    /// The first `min(current_page * page_size, len)` items
    pub visible: &'a [T],
    /// Whether another `load_more` would reveal more items
    pub has_more: bool,
    pub total_pages: usize,
    pub current_page: usize,
}

/// Number of pages needed for `len` items, never dividing by zero
pub fn total_pages(len: usize, page_size: usize) -> usize {
    len.div_ceil(page_size.max(1))
}

/// Slice the prefix of `items` visible at `current_page`
pub fn paginate<T>(items: &[T], page_size: usize, current_page: usize) -> Page<'_, T> {
    let page_size = page_size.max(1);
    let current_page = current_page.max(1);
    let visible_count = current_page.saturating_mul(page_size).min(items.len());

    Page {
        visible: &items[..visible_count],
        has_more: visible_count < items.len(),
        total_pages: total_pages(items.len(), page_size),
        current_page,
    }
}

/// Tracks how many pages of the current result are revealed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Paginator {
    page_size: usize,
    current_page: usize,
}

impl Paginator {
    /// Start at page 1. A zero page size is treated as 1.
    pub fn new(page_size: usize) -> Self {
        Self {
            page_size: page_size.max(1),
            current_page: 1,
        }
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn current_page(&self) -> usize {
        self.current_page
    }

    /// Reveal one more page if any remain. Returns whether the window grew.
    pub fn load_more(&mut self, total_items: usize) -> bool {
        if self.current_page < total_pages(total_items, self.page_size) {
            self.current_page += 1;
            true
        } else {
            false
        }
    }

    pub fn reset(&mut self) {
        self.current_page = 1;
    }

    /// The window over `items` at the current page
    pub fn page<'a, T>(&self, items: &'a [T]) -> Page<'a, T> {
        paginate(items, self.page_size, self.current_page)
    }
}

impl Default for Paginator {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE)
    }
}
