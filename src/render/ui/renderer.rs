//! UI renderer trait
//!
//! Defines the `UIRenderer` trait for drawing the list panels and managing terminal
//! lifecycle hooks such as initialization and cleanup.

use crate::error::Result;
use crate::render::ui::state::ViewState;
use crate::store::RecordStore;

/// Core trait for UI rendering
pub trait UIRenderer {
    /// Draw the active panel, the pagination bar, any overlay and the status line
    fn render(&mut self, view_state: &ViewState, store: &RecordStore) -> Result<()>;

    /// Enter raw mode and the alternate screen
    fn initialize(&mut self) -> Result<()>;

    /// Restore the terminal
    fn cleanup(&mut self) -> Result<()>;

    /// Get current terminal dimensions
    fn get_terminal_size(&self) -> Result<(u16, u16)>; // (width, height)
}

#[cfg(test)]
pub mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    /// What the mock saw, shared with the test after the renderer is boxed away
    #[derive(Debug, Default)]
    pub struct MockRenderLog {
        pub render_count: usize,
        pub status_lines: Vec<String>,
        pub initialized: bool,
        pub cleaned_up: bool,
    }

    /// Mock UI renderer for testing
    pub struct MockUIRenderer {
        pub terminal_size: (u16, u16),
        pub log: Arc<Mutex<MockRenderLog>>,
    }

    impl Default for MockUIRenderer {
        fn default() -> Self {
            Self::new()
        }
    }

    impl MockUIRenderer {
        pub fn new() -> Self {
            Self {
                terminal_size: (80, 24),
                log: Arc::new(Mutex::new(MockRenderLog::default())),
            }
        }

        pub fn log_handle(&self) -> Arc<Mutex<MockRenderLog>> {
            Arc::clone(&self.log)
        }
    }

    impl UIRenderer for MockUIRenderer {
        fn render(&mut self, view_state: &ViewState, _store: &RecordStore) -> Result<()> {
            let mut log = self.log.lock().unwrap();
            log.render_count += 1;
            log.status_lines.push(view_state.format_status_line());
            Ok(())
        }

        fn initialize(&mut self) -> Result<()> {
            self.log.lock().unwrap().initialized = true;
            Ok(())
        }

        fn cleanup(&mut self) -> Result<()> {
            self.log.lock().unwrap().cleaned_up = true;
            Ok(())
        }

        fn get_terminal_size(&self) -> Result<(u16, u16)> {
            Ok(self.terminal_size)
        }
    }

    #[test]
    fn test_mock_renderer_basic() {
        use crate::listing::PageSize;
        use crate::records::RecordKind;

        let mut renderer = MockUIRenderer::new();
        let log = renderer.log_handle();
        let view_state = ViewState::new("/data/clinic.json", 80, 24, RecordKind::Lab, PageSize::Ten);
        let store = RecordStore::pending();

        renderer.initialize().unwrap();
        renderer.render(&view_state, &store).unwrap();
        renderer.cleanup().unwrap();

        let log = log.lock().unwrap();
        assert!(log.initialized && log.cleaned_up);
        assert_eq!(log.render_count, 1);
        assert_eq!(log.status_lines[0], "clinic.json | المختبرات");
        assert_eq!(renderer.get_terminal_size().unwrap(), (80, 24));
    }
}
