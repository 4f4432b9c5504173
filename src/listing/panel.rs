//! Local UI state of one list panel: search string, page state and row selection.

use crate::listing::filter::filter_records;
use crate::listing::paginator::{PageSize, Paginator};
use crate::listing::view::{build_list, ListContent};
use crate::records::{Record, RecordKind};

/// Page navigation requested by the user
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageMove {
    First,
    Previous,
    Next,
    Last,
}

#[derive(Debug, Clone)]
pub struct ListPanel {
    kind: RecordKind,
    query: String,
    paginator: Paginator,
    /// Row index inside the current page
    selected: usize,
}

impl ListPanel {
    pub fn new(kind: RecordKind, page_size: PageSize) -> Self {
        Self {
            kind,
            query: String::new(),
            paginator: Paginator::new(page_size),
            selected: 0,
        }
    }

    pub fn kind(&self) -> RecordKind {
        self.kind
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn paginator(&self) -> &Paginator {
        &self.paginator
    }

    pub fn selected(&self) -> usize {
        self.selected
    }

    /// Replace the search string. A different query returns to page 1.
    pub fn set_query(&mut self, query: impl Into<String>) {
        let query = query.into();
        if query != self.query {
            self.query = query;
            self.reset_position();
        }
    }

    /// The record list was replaced by the store
    pub fn records_replaced(&mut self) {
        self.reset_position();
    }

    pub fn set_page_size(&mut self, page_size: PageSize) {
        self.paginator.set_page_size(page_size);
        self.selected = 0;
    }

    pub fn cycle_page_size(&mut self) -> PageSize {
        let next = self.paginator.page_size().cycle();
        self.set_page_size(next);
        next
    }

    /// Move between pages of `total` filtered records. Returns whether the page changed.
    pub fn navigate(&mut self, movement: PageMove, total: usize) -> bool {
        let changed = match movement {
            PageMove::First => self.paginator.first(),
            PageMove::Previous => self.paginator.previous(),
            PageMove::Next => self.paginator.next(total),
            PageMove::Last => self.paginator.last(total),
        };
        if changed {
            self.selected = 0;
        }
        changed
    }

    pub fn select_previous(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    /// Move the selection down, staying on the `rows_on_page` visible rows
    pub fn select_next(&mut self, rows_on_page: usize) {
        if self.selected + 1 < rows_on_page {
            self.selected += 1;
        }
    }

    /// Number of records matching the current query
    pub fn filtered_len<R: Record>(&self, records: &[R]) -> usize {
        filter_records(records, &self.query).len()
    }

    /// Restore the page and selection invariants after the records changed size
    pub fn sync<R: Record>(&mut self, records: &[R]) {
        let total = self.filtered_len(records);
        self.paginator.clamp(total);
        let rows = self.paginator.slice(&filter_records(records, &self.query)).len();
        self.selected = self.selected.min(rows.saturating_sub(1));
    }

    pub fn content<'a, R: Record>(&self, records: &'a [R], loading: bool) -> ListContent<'a, R> {
        build_list(records, &self.query, loading, &self.paginator)
    }

    /// Record under the row cursor, if the table is showing
    pub fn selected_record<'a, R: Record>(&self, records: &'a [R]) -> Option<&'a R> {
        let filtered = filter_records(records, &self.query);
        self.paginator.slice(&filtered).get(self.selected).copied()
    }

    fn reset_position(&mut self) {
        self.paginator.reset();
        self.selected = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::records::Medication;
    use chrono::Utc;

    fn meds(count: usize) -> Vec<Medication> {
        (1..=count)
            .map(|i| Medication {
                id: format!("med-{i}"),
                name: if i % 2 == 0 {
                    format!("Even {i}")
                } else {
                    format!("Odd {i}")
                },
                instructions: None,
                created_at: Utc::now(),
            })
            .collect()
    }

    #[test]
    fn query_change_returns_to_first_page() {
        let records = meds(30);
        let mut panel = ListPanel::new(RecordKind::Medication, PageSize::Ten);
        panel.navigate(PageMove::Last, panel.filtered_len(&records));
        assert_eq!(panel.paginator().current_page(), 3);

        panel.set_query("even");
        assert_eq!(panel.paginator().current_page(), 1);
        assert_eq!(panel.filtered_len(&records), 15);
    }

    #[test]
    fn same_query_keeps_position() {
        let records = meds(30);
        let mut panel = ListPanel::new(RecordKind::Medication, PageSize::Five);
        panel.set_query("odd");
        panel.navigate(PageMove::Next, panel.filtered_len(&records));
        panel.set_query("odd");
        assert_eq!(panel.paginator().current_page(), 2);
    }

    #[test]
    fn page_size_change_and_reload_reset_page() {
        let records = meds(30);
        let mut panel = ListPanel::new(RecordKind::Medication, PageSize::Five);
        panel.navigate(PageMove::Next, records.len());
        assert_eq!(panel.cycle_page_size(), PageSize::Ten);
        assert_eq!(panel.paginator().current_page(), 1);

        panel.navigate(PageMove::Next, records.len());
        panel.records_replaced();
        assert_eq!(panel.paginator().current_page(), 1);
    }

    #[test]
    fn selection_stays_on_page_and_tracks_records() {
        let records = meds(12);
        let mut panel = ListPanel::new(RecordKind::Medication, PageSize::Ten);
        for _ in 0..20 {
            panel.select_next(10);
        }
        assert_eq!(panel.selected(), 9);
        assert_eq!(panel.selected_record(&records).unwrap().id, "med-10");

        panel.navigate(PageMove::Next, records.len());
        assert_eq!(panel.selected(), 0);
        assert_eq!(panel.selected_record(&records).unwrap().id, "med-11");

        panel.select_previous();
        assert_eq!(panel.selected(), 0);
    }

    #[test]
    fn sync_clamps_after_records_shrink() {
        let mut records = meds(12);
        let mut panel = ListPanel::new(RecordKind::Medication, PageSize::Ten);
        panel.navigate(PageMove::Last, records.len());
        panel.select_next(2);
        records.truncate(10);
        panel.sync(&records);
        assert_eq!(panel.paginator().current_page(), 1);
        assert_eq!(panel.selected(), 1);

        records.clear();
        panel.sync(&records);
        assert_eq!(panel.selected(), 0);
        assert!(panel.selected_record(&records).is_none());
    }
}
