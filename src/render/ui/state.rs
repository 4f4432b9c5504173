//! UI state management structures
//!
//! Holds the per-panel list state, the status line and the details overlay. Records
//! themselves live in the [`RecordStore`](crate::store::RecordStore).

use crate::listing::{ListPanel, Notifier, PageSize};
use crate::records::{format_date, Lab, Medication, RecordKind};
use crate::store::RecordStore;
use std::path::{Path, PathBuf};

/// State of the whole screen
#[derive(Debug)]
pub struct ViewState {
    /// Panel currently shown
    pub active: RecordKind,

    pub labs: ListPanel,
    pub medications: ListPanel,

    pub status_line: StatusLine,

    /// Record opened through the edit action
    pub details: Option<RecordDetails>,

    /// Data file path for display
    pub data_path: PathBuf,

    /// Viewport dimensions
    pub viewport_width: u16,
    pub viewport_height: u16,
}

impl ViewState {
    pub fn new(
        data_path: impl AsRef<Path>,
        viewport_width: u16,
        viewport_height: u16,
        active: RecordKind,
        page_size: PageSize,
    ) -> Self {
        Self {
            active,
            labs: ListPanel::new(RecordKind::Lab, page_size),
            medications: ListPanel::new(RecordKind::Medication, page_size),
            status_line: StatusLine::new(),
            details: None,
            data_path: data_path.as_ref().to_path_buf(),
            viewport_width,
            viewport_height,
        }
    }

    /// Get the data file name for display
    pub fn filename(&self) -> String {
        self.data_path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("<unnamed>")
            .to_string()
    }

    pub fn panel(&self, kind: RecordKind) -> &ListPanel {
        match kind {
            RecordKind::Lab => &self.labs,
            RecordKind::Medication => &self.medications,
        }
    }

    pub fn panel_mut(&mut self, kind: RecordKind) -> &mut ListPanel {
        match kind {
            RecordKind::Lab => &mut self.labs,
            RecordKind::Medication => &mut self.medications,
        }
    }

    pub fn active_panel(&self) -> &ListPanel {
        self.panel(self.active)
    }

    pub fn active_panel_mut(&mut self) -> &mut ListPanel {
        self.panel_mut(self.active)
    }

    pub fn switch_panel(&mut self) {
        self.active = match self.active {
            RecordKind::Lab => RecordKind::Medication,
            RecordKind::Medication => RecordKind::Lab,
        };
        self.details = None;
    }

    /// Filtered record count of the active panel
    pub fn active_total(&self, store: &RecordStore) -> usize {
        match self.active {
            RecordKind::Lab => self.labs.filtered_len(store.labs()),
            RecordKind::Medication => self.medications.filtered_len(store.medications()),
        }
    }

    /// Rows visible on the active panel's current page
    pub fn active_rows_on_page(&self, store: &RecordStore) -> usize {
        let window = self
            .active_panel()
            .paginator()
            .window(self.active_total(store));
        window.end_row - window.start_row.saturating_sub(1)
    }

    /// Re-establish page/selection invariants after the store changed
    pub fn sync_with(&mut self, store: &RecordStore) {
        self.labs.sync(store.labs());
        self.medications.sync(store.medications());
    }

    /// Update terminal dimensions. Returns true if they actually changed.
    pub fn update_terminal_size(&mut self, width: u16, height: u16) -> bool {
        let changed = self.viewport_width != width || self.viewport_height != height;
        if changed {
            self.viewport_width = width;
            self.viewport_height = height;
        }
        changed
    }

    /// Format the complete status line for this view state
    pub fn format_status_line(&self) -> String {
        self.status_line
            .format_status_line(&self.filename(), self.active.title())
    }
}

/// Severity of a status-line message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageLevel {
    Info,
    Warning,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusMessage {
    pub level: MessageLevel,
    pub text: String,
}

/// Status line information
#[derive(Debug, Clone, Default)]
pub struct StatusLine {
    pub message: Option<StatusMessage>,
    /// Search buffer while the prompt is open
    pub search_prompt: Option<String>,
}

impl StatusLine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_message(&mut self, text: impl Into<String>) {
        self.message = Some(StatusMessage {
            level: MessageLevel::Info,
            text: text.into(),
        });
    }

    pub fn set_warning(&mut self, text: impl Into<String>) {
        self.message = Some(StatusMessage {
            level: MessageLevel::Warning,
            text: text.into(),
        });
    }

    pub fn clear_message(&mut self) {
        self.message = None;
    }

    pub fn set_search_prompt(&mut self, buffer: impl Into<String>) {
        self.search_prompt = Some(buffer.into());
    }

    pub fn clear_search_prompt(&mut self) {
        self.search_prompt = None;
    }

    pub fn format_status_line(&self, filename: &str, panel_title: &str) -> String {
        if let Some(buffer) = &self.search_prompt {
            return format!("/{buffer}");
        }

        match &self.message {
            Some(message) => format!("{filename} | {panel_title} | {}", message.text),
            None => format!("{filename} | {panel_title}"),
        }
    }
}

impl Notifier for StatusLine {
    fn warning(&mut self, message: &str) {
        self.set_warning(message);
    }
}

/// Read-only field listing shown when a row is opened for editing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordDetails {
    pub title: String,
    pub fields: Vec<(&'static str, String)>,
}

fn or_dash(value: &Option<String>) -> String {
    value.clone().unwrap_or_else(|| "-".to_string())
}

impl From<&Lab> for RecordDetails {
    fn from(lab: &Lab) -> Self {
        Self {
            title: lab.name.clone(),
            fields: vec![
                ("المعرف", lab.id.clone()),
                ("الاسم", lab.name.clone()),
                ("التواصل", or_dash(&lab.contact)),
                ("العنوان", or_dash(&lab.address)),
                ("تاريخ الإضافة", format_date(lab.created_at)),
            ],
        }
    }
}

impl From<&Medication> for RecordDetails {
    fn from(med: &Medication) -> Self {
        Self {
            title: med.name.clone(),
            fields: vec![
                ("المعرف", med.id.clone()),
                ("الاسم", med.name.clone()),
                ("التعليمات", or_dash(&med.instructions)),
                ("تاريخ الإضافة", format_date(med.created_at)),
            ],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn state() -> ViewState {
        ViewState::new("/data/clinic.json", 80, 24, RecordKind::Lab, PageSize::Ten)
    }

    #[test]
    fn test_view_state_creation() {
        let state = state();
        assert_eq!(state.filename(), "clinic.json");
        assert_eq!(state.active, RecordKind::Lab);
        assert_eq!(state.labs.kind(), RecordKind::Lab);
        assert_eq!(state.medications.paginator().page_size(), PageSize::Ten);
        assert!(state.details.is_none());
    }

    #[test]
    fn test_switch_panel_closes_details() {
        let mut state = state();
        state.details = Some(RecordDetails {
            title: "x".to_string(),
            fields: Vec::new(),
        });
        state.switch_panel();
        assert_eq!(state.active, RecordKind::Medication);
        assert!(state.details.is_none());
        state.switch_panel();
        assert_eq!(state.active, RecordKind::Lab);
    }

    #[test]
    fn test_status_line_format() {
        let mut status = StatusLine::new();
        assert_eq!(
            status.format_status_line("clinic.json", "المختبرات"),
            "clinic.json | المختبرات"
        );

        status.set_message("done");
        assert_eq!(
            status.format_status_line("clinic.json", "الأدوية"),
            "clinic.json | الأدوية | done"
        );

        status.set_search_prompt("amo");
        assert_eq!(status.format_status_line("clinic.json", "الأدوية"), "/amo");

        status.clear_search_prompt();
        status.clear_message();
        assert_eq!(
            status.format_status_line("clinic.json", "الأدوية"),
            "clinic.json | الأدوية"
        );
    }

    #[test]
    fn test_status_line_is_a_notifier() {
        let mut status = StatusLine::new();
        status.warning("cannot delete");
        assert_eq!(
            status.message,
            Some(StatusMessage {
                level: MessageLevel::Warning,
                text: "cannot delete".to_string()
            })
        );
    }

    #[test]
    fn test_terminal_resize() {
        let mut state = state();
        assert!(!state.update_terminal_size(80, 24));
        assert!(state.update_terminal_size(120, 30));
        assert_eq!(state.viewport_width, 120);
        assert_eq!(state.viewport_height, 30);
    }

    #[test]
    fn test_rows_on_page_tracks_store() {
        let mut store = RecordStore::pending();
        let mut dataset = crate::store::Dataset::default();
        dataset.labs = (0..13)
            .map(|i| Lab {
                id: format!("l{i}"),
                name: format!("Lab {i}"),
                contact: None,
                address: None,
                created_at: Utc::now(),
            })
            .collect();
        store.replace(dataset);

        let mut state = state();
        assert_eq!(state.active_rows_on_page(&store), 10);
        let total = state.active_total(&store);
        state.labs.navigate(crate::listing::PageMove::Next, total);
        assert_eq!(state.active_rows_on_page(&store), 3);
    }

    #[test]
    fn test_details_from_lab() {
        let lab = Lab {
            id: "l1".to_string(),
            name: "Alpha".to_string(),
            contact: None,
            address: Some("Cairo".to_string()),
            created_at: Utc::now(),
        };
        let details = RecordDetails::from(&lab);
        assert_eq!(details.title, "Alpha");
        assert!(details.fields.contains(&("التواصل", "-".to_string())));
        assert!(details.fields.contains(&("العنوان", "Cairo".to_string())));
    }
}
