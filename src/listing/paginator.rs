//! Page arithmetic for the list views.
//!
//! Pages are 1-based. The free functions are the raw arithmetic; [`Paginator`] holds the
//! per-panel page state and enforces `1 <= current_page <= max(1, total_pages)`.

use crate::error::{MedlistError, Result};
use std::fmt;

/// Page sizes offered by the page-size selector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PageSize {
    Five,
    #[default]
    Ten,
    TwentyFive,
    Fifty,
}

impl PageSize {
    pub const ALL: [PageSize; 4] = [
        PageSize::Five,
        PageSize::Ten,
        PageSize::TwentyFive,
        PageSize::Fifty,
    ];

    pub fn get(self) -> usize {
        match self {
            PageSize::Five => 5,
            PageSize::Ten => 10,
            PageSize::TwentyFive => 25,
            PageSize::Fifty => 50,
        }
    }

    /// Next size in the selector, wrapping around
    pub fn cycle(self) -> Self {
        match self {
            PageSize::Five => PageSize::Ten,
            PageSize::Ten => PageSize::TwentyFive,
            PageSize::TwentyFive => PageSize::Fifty,
            PageSize::Fifty => PageSize::Five,
        }
    }
}

impl TryFrom<usize> for PageSize {
    type Error = MedlistError;

    fn try_from(value: usize) -> Result<Self> {
        PageSize::ALL
            .into_iter()
            .find(|size| size.get() == value)
            .ok_or_else(|| {
                MedlistError::invalid_argument(format!(
                    "page size must be one of 5, 10, 25, 50 (got {value})"
                ))
            })
    }
}

impl fmt::Display for PageSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.get())
    }
}

/// `ceil(total / page_size)`; zero when there is nothing to show
pub fn total_pages(total: usize, page_size: usize) -> usize {
    if page_size == 0 {
        return 0;
    }
    total.div_ceil(page_size)
}

/// Index of the first item on `page`
pub fn start_index(page: usize, page_size: usize) -> usize {
    page.saturating_sub(1) * page_size
}

/// Items on `page`, clipped to the end of `items`. Empty when the page starts past the end.
pub fn page_slice<T>(items: &[T], page: usize, page_size: usize) -> &[T] {
    let start = start_index(page, page_size);
    if start >= items.len() {
        return &[];
    }
    let end = (start + page_size).min(items.len());
    &items[start..end]
}

/// Summary of one page of a filtered list
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageWindow {
    pub current_page: usize,
    pub total_pages: usize,
    /// 1-based row number of the first item on the page (0 when empty)
    pub start_row: usize,
    /// 1-based row number of the last item on the page
    pub end_row: usize,
    pub total: usize,
}

impl PageWindow {
    /// "صفحة 2 من 3"
    pub fn page_label(&self) -> String {
        format!("صفحة {} من {}", self.current_page, self.total_pages.max(1))
    }

    /// "عرض 11 إلى 20 من 23 نتيجة"
    pub fn summary(&self) -> String {
        format!(
            "عرض {} إلى {} من {} نتيجة",
            self.start_row, self.end_row, self.total
        )
    }
}

/// Per-panel pagination state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Paginator {
    current_page: usize,
    page_size: PageSize,
}

impl Default for Paginator {
    fn default() -> Self {
        Self::new(PageSize::default())
    }
}

impl Paginator {
    pub fn new(page_size: PageSize) -> Self {
        Self {
            current_page: 1,
            page_size,
        }
    }

    pub fn current_page(&self) -> usize {
        self.current_page
    }

    pub fn page_size(&self) -> PageSize {
        self.page_size
    }

    /// Change the page size. Always returns to page 1.
    pub fn set_page_size(&mut self, page_size: PageSize) {
        self.page_size = page_size;
        self.current_page = 1;
    }

    pub fn reset(&mut self) {
        self.current_page = 1;
    }

    /// Last reachable page for `total` items (at least 1)
    pub fn last_page(&self, total: usize) -> usize {
        total_pages(total, self.page_size.get()).max(1)
    }

    pub fn can_go_back(&self) -> bool {
        self.current_page > 1
    }

    pub fn can_go_forward(&self, total: usize) -> bool {
        self.current_page < self.last_page(total)
    }

    /// Jump to page 1. Returns whether the page changed.
    pub fn first(&mut self) -> bool {
        self.go_to(1)
    }

    pub fn previous(&mut self) -> bool {
        if !self.can_go_back() {
            return false;
        }
        self.go_to(self.current_page - 1)
    }

    pub fn next(&mut self, total: usize) -> bool {
        if !self.can_go_forward(total) {
            return false;
        }
        self.go_to(self.current_page + 1)
    }

    pub fn last(&mut self, total: usize) -> bool {
        let last = self.last_page(total);
        self.go_to(last)
    }

    /// Pull the current page back inside `1..=last_page(total)`
    pub fn clamp(&mut self, total: usize) {
        self.current_page = self.current_page.clamp(1, self.last_page(total));
    }

    fn go_to(&mut self, page: usize) -> bool {
        let changed = self.current_page != page;
        self.current_page = page;
        changed
    }

    /// Items on the current page
    pub fn slice<'a, T>(&self, items: &'a [T]) -> &'a [T] {
        page_slice(items, self.current_page, self.page_size.get())
    }

    /// Describe the current page for `total` filtered items
    pub fn window(&self, total: usize) -> PageWindow {
        let size = self.page_size.get();
        let start = start_index(self.current_page, size);
        let shown = total.saturating_sub(start).min(size);
        let (start_row, end_row) = if shown == 0 {
            (0, 0)
        } else {
            (start + 1, start + shown)
        };
        PageWindow {
            current_page: self.current_page,
            total_pages: total_pages(total, size),
            start_row,
            end_row,
            total,
        }
    }
}
