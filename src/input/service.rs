//! High-level input service.
//!
//! Polls crossterm, runs the key-binding state machine, and yields `InputAction`s for the
//! render loop.

use crate::error::Result;
use crate::listing::PageMove;
use ratatui::crossterm::event::{
    self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseEvent, MouseEventKind,
};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;
use tokio::sync::mpsc::UnboundedSender;

/// Poll timeout used when the caller does not provide one.
const DEFAULT_POLL_TIMEOUT_MS: u64 = 50;

/// Current input mode (table navigation vs search prompt).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputState {
    Navigation,
    SearchInput,
}

/// High-level input actions emitted by the state machine/service.
#[derive(Debug, Clone, PartialEq)]
pub enum InputAction {
    SelectPrevious,
    SelectNext,
    Page(PageMove),
    CyclePageSize,
    SwitchPanel,
    StartSearch,
    /// Search buffer changed; the table filters live
    UpdateSearch(String),
    /// Leave the prompt and keep the query
    CommitSearch(String),
    ClearSearch,
    Edit,
    Delete,
    OpenContact,
    Dismiss,
    Reload,
    Quit,
    Resize {
        width: u16,
        height: u16,
    },
    NoAction,
    InvalidInput,
}

/// Key-binding state machine.
pub struct InputStateMachine {
    state: InputState,
    search_buffer: String,
}

impl InputStateMachine {
    pub fn new() -> Self {
        Self {
            state: InputState::Navigation,
            search_buffer: String::new(),
        }
    }

    pub fn handle_key_event(&mut self, key_event: KeyEvent) -> InputAction {
        if key_event.kind != KeyEventKind::Press {
            return InputAction::NoAction;
        }

        match self.state {
            InputState::Navigation => self.handle_navigation_key(key_event),
            InputState::SearchInput => self.handle_search_key(key_event),
        }
    }

    fn handle_navigation_key(&mut self, key_event: KeyEvent) -> InputAction {
        let modifiers = key_event.modifiers;
        if modifiers.contains(KeyModifiers::CONTROL) {
            return match key_event.code {
                KeyCode::Char('c') => InputAction::Quit,
                _ => InputAction::InvalidInput,
            };
        }
        if modifiers.contains(KeyModifiers::ALT) {
            return InputAction::InvalidInput;
        }

        match key_event.code {
            KeyCode::Char('j') | KeyCode::Down => InputAction::SelectNext,
            KeyCode::Char('k') | KeyCode::Up => InputAction::SelectPrevious,
            KeyCode::Char('l') | KeyCode::Right | KeyCode::PageDown => {
                InputAction::Page(PageMove::Next)
            }
            KeyCode::Char('h') | KeyCode::Left | KeyCode::PageUp => {
                InputAction::Page(PageMove::Previous)
            }
            KeyCode::Char('g') | KeyCode::Home => InputAction::Page(PageMove::First),
            KeyCode::Char('G') | KeyCode::End => InputAction::Page(PageMove::Last),
            KeyCode::Char('s') => InputAction::CyclePageSize,
            KeyCode::Tab | KeyCode::BackTab => InputAction::SwitchPanel,
            KeyCode::Char('e') | KeyCode::Enter => InputAction::Edit,
            KeyCode::Char('d') | KeyCode::Delete => InputAction::Delete,
            KeyCode::Char('o') => InputAction::OpenContact,
            KeyCode::Char('r') => InputAction::Reload,
            KeyCode::Esc => InputAction::Dismiss,
            KeyCode::Char('q') => InputAction::Quit,
            KeyCode::Char('/') => {
                self.state = InputState::SearchInput;
                self.search_buffer.clear();
                InputAction::StartSearch
            }
            _ => InputAction::InvalidInput,
        }
    }

    fn handle_search_key(&mut self, key_event: KeyEvent) -> InputAction {
        match (key_event.code, key_event.modifiers) {
            (KeyCode::Char('c'), KeyModifiers::CONTROL) | (KeyCode::Esc, _) => {
                self.leave_search();
                InputAction::ClearSearch
            }
            (KeyCode::Char(ch), modifiers)
                if !ch.is_control()
                    && !modifiers.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) =>
            {
                self.search_buffer.push(ch);
                InputAction::UpdateSearch(self.search_buffer.clone())
            }
            (KeyCode::Backspace, _) => {
                self.search_buffer.pop();
                if self.search_buffer.is_empty() {
                    self.leave_search();
                    InputAction::ClearSearch
                } else {
                    InputAction::UpdateSearch(self.search_buffer.clone())
                }
            }
            (KeyCode::Enter, _) => {
                let query = std::mem::take(&mut self.search_buffer);
                self.state = InputState::Navigation;
                if query.is_empty() {
                    InputAction::ClearSearch
                } else {
                    InputAction::CommitSearch(query)
                }
            }
            _ => InputAction::InvalidInput,
        }
    }

    fn leave_search(&mut self) {
        self.state = InputState::Navigation;
        self.search_buffer.clear();
    }

    pub fn get_search_buffer(&self) -> &str {
        &self.search_buffer
    }

    pub fn get_state(&self) -> InputState {
        self.state
    }
}

impl Default for InputStateMachine {
    fn default() -> Self {
        Self::new()
    }
}

/// Service responsible for producing high-level `InputAction`s from terminal events.
pub struct InputService {
    state_machine: InputStateMachine,
}

impl InputService {
    pub fn new() -> Self {
        Self {
            state_machine: InputStateMachine::new(),
        }
    }

    /// Wait up to `timeout` for the next terminal event and translate it
    pub fn poll_action(&mut self, timeout: Option<Duration>) -> Result<Option<InputAction>> {
        let poll_timeout = timeout.unwrap_or(Duration::from_millis(DEFAULT_POLL_TIMEOUT_MS));
        if !event::poll(poll_timeout)? {
            return Ok(None);
        }
        let event = event::read()?;
        Ok(self.process_event(event))
    }

    /// Translate one terminal event, dropping events with no effect
    pub fn process_event(&mut self, event: Event) -> Option<InputAction> {
        let action = match event {
            Event::Key(key_event) => self.state_machine.handle_key_event(key_event),
            Event::Resize(width, height) => InputAction::Resize { width, height },
            Event::Mouse(mouse_event) => Self::mouse_action(mouse_event),
            _ => InputAction::NoAction,
        };

        match action {
            InputAction::NoAction | InputAction::InvalidInput => None,
            _ => Some(action),
        }
    }

    fn mouse_action(mouse_event: MouseEvent) -> InputAction {
        match mouse_event.kind {
            MouseEventKind::ScrollUp => InputAction::SelectPrevious,
            MouseEventKind::ScrollDown => InputAction::SelectNext,
            _ => InputAction::NoAction,
        }
    }
}

impl Default for InputService {
    fn default() -> Self {
        Self::new()
    }
}

/// Spawn a blocking thread that polls for terminal events and forwards actions to the render loop.
pub fn spawn_input_thread(
    tx: UnboundedSender<InputAction>,
    shutdown: Arc<AtomicBool>,
    poll_interval: Duration,
) -> thread::JoinHandle<()> {
    thread::spawn(move || {
        let mut service = InputService::new();
        while !shutdown.load(Ordering::SeqCst) {
            match service.poll_action(Some(poll_interval)) {
                Ok(Some(action)) => {
                    if tx.send(action).is_err() {
                        return;
                    }
                }
                Ok(None) => continue,
                Err(err) => {
                    log::error!("input thread error: {err}");
                    break;
                }
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn type_text(sm: &mut InputStateMachine, text: &str) -> Vec<InputAction> {
        text.chars()
            .map(|ch| sm.handle_key_event(key(KeyCode::Char(ch))))
            .collect()
    }

    #[test]
    fn navigation_bindings() {
        let mut sm = InputStateMachine::new();
        assert_eq!(sm.handle_key_event(key(KeyCode::Char('j'))), InputAction::SelectNext);
        assert_eq!(sm.handle_key_event(key(KeyCode::Up)), InputAction::SelectPrevious);
        assert_eq!(
            sm.handle_key_event(key(KeyCode::Right)),
            InputAction::Page(PageMove::Next)
        );
        assert_eq!(
            sm.handle_key_event(key(KeyCode::Char('g'))),
            InputAction::Page(PageMove::First)
        );
        assert_eq!(
            sm.handle_key_event(key(KeyCode::Char('G'))),
            InputAction::Page(PageMove::Last)
        );
        assert_eq!(sm.handle_key_event(key(KeyCode::Char('d'))), InputAction::Delete);
        assert_eq!(
            sm.handle_key_event(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)),
            InputAction::Quit
        );
    }

    #[test]
    fn search_prompt_updates_live() {
        let mut sm = InputStateMachine::new();
        assert_eq!(sm.handle_key_event(key(KeyCode::Char('/'))), InputAction::StartSearch);
        assert_eq!(sm.get_state(), InputState::SearchInput);

        let actions = type_text(&mut sm, "lab");
        assert_eq!(actions.last(), Some(&InputAction::UpdateSearch("lab".to_string())));

        // 'q' and 'd' are text while the prompt is open
        assert_eq!(
            sm.handle_key_event(key(KeyCode::Char('q'))),
            InputAction::UpdateSearch("labq".to_string())
        );
        assert_eq!(
            sm.handle_key_event(key(KeyCode::Enter)),
            InputAction::CommitSearch("labq".to_string())
        );
        assert_eq!(sm.get_state(), InputState::Navigation);
        assert_eq!(sm.get_search_buffer(), "");
    }

    #[test]
    fn search_accepts_arabic_text() {
        let mut sm = InputStateMachine::new();
        sm.handle_key_event(key(KeyCode::Char('/')));
        let actions = type_text(&mut sm, "مختبر");
        assert_eq!(
            actions.last(),
            Some(&InputAction::UpdateSearch("مختبر".to_string()))
        );
    }

    #[test]
    fn escape_and_backspace_clear_search() {
        let mut sm = InputStateMachine::new();
        sm.handle_key_event(key(KeyCode::Char('/')));
        type_text(&mut sm, "ab");
        assert_eq!(
            sm.handle_key_event(key(KeyCode::Backspace)),
            InputAction::UpdateSearch("a".to_string())
        );
        assert_eq!(sm.handle_key_event(key(KeyCode::Backspace)), InputAction::ClearSearch);
        assert_eq!(sm.get_state(), InputState::Navigation);

        sm.handle_key_event(key(KeyCode::Char('/')));
        type_text(&mut sm, "x");
        assert_eq!(sm.handle_key_event(key(KeyCode::Esc)), InputAction::ClearSearch);
        assert_eq!(sm.get_state(), InputState::Navigation);
    }

    #[test]
    fn service_drops_invalid_input_and_maps_mouse() {
        let mut service = InputService::new();
        assert_eq!(service.process_event(Event::Key(key(KeyCode::F(5)))), None);
        assert_eq!(
            service.process_event(Event::Resize(100, 40)),
            Some(InputAction::Resize {
                width: 100,
                height: 40
            })
        );
        let scroll = Event::Mouse(MouseEvent {
            kind: MouseEventKind::ScrollDown,
            column: 0,
            row: 0,
            modifiers: KeyModifiers::NONE,
        });
        assert_eq!(service.process_event(scroll), Some(InputAction::SelectNext));
    }
}
