//! Rendering subsystem.
//!
//! [`service`] applies input actions and store worker responses to the view state,
//! [`protocol`] defines the worker messages and [`ui`] draws the result.

pub mod protocol;
pub mod service;
pub mod ui;

pub use service::RenderLoopState;
