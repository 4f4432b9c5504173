//! Input subsystem: terminal events to key-binding actions.

pub mod service;

// Modules outside this crate should prefer importing from `crate::input` rather than
// reaching into submodules.
pub use service::{spawn_input_thread, InputAction, InputService, InputState, InputStateMachine};
