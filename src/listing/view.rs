//! Render model for one list panel.
//!
//! Everything here is recomputed from (records, query, loading flag, page state) on each
//! render. Nothing is cached between frames.

use crate::listing::filter::filter_records;
use crate::listing::paginator::{PageWindow, Paginator};
use crate::records::Record;

pub const LOADING_MESSAGE: &str = "جاري التحميل...";

/// Message for a query that matched nothing
pub fn no_match_message(query: &str) -> String {
    format!("لا توجد نتائج مطابقة لـ \"{query}\"")
}

/// Enabled state of the four pagination controls
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavControls {
    pub first: bool,
    pub previous: bool,
    pub next: bool,
    pub last: bool,
}

/// One rendered page of the table
#[derive(Debug)]
pub struct PageView<'a, R> {
    pub rows: Vec<&'a R>,
    pub window: PageWindow,
    pub controls: NavControls,
}

/// What a panel shows instead of, or as, its table
#[derive(Debug)]
pub enum ListContent<'a, R> {
    Loading,
    Empty { message: String, searching: bool },
    Page(PageView<'a, R>),
}

impl<R> ListContent<'_, R> {
    pub fn is_table(&self) -> bool {
        matches!(self, ListContent::Page(_))
    }
}

/// Build the panel content for the current state.
///
/// The paginator is clamped on a copy so a stale page number never produces an empty page.
pub fn build_list<'a, R: Record>(
    records: &'a [R],
    query: &str,
    loading: bool,
    paginator: &Paginator,
) -> ListContent<'a, R> {
    if loading {
        return ListContent::Loading;
    }

    let filtered = filter_records(records, query);
    if filtered.is_empty() {
        let searching = !query.is_empty();
        let message = if searching {
            no_match_message(query)
        } else {
            R::KIND.empty_message().to_string()
        };
        return ListContent::Empty { message, searching };
    }

    let total = filtered.len();
    let mut pager = *paginator;
    pager.clamp(total);

    let rows = pager.slice(&filtered).to_vec();
    let controls = NavControls {
        first: pager.can_go_back(),
        previous: pager.can_go_back(),
        next: pager.can_go_forward(total),
        last: pager.can_go_forward(total),
    };

    ListContent::Page(PageView {
        rows,
        window: pager.window(total),
        controls,
    })
}
