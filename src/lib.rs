//! # medlist - Terminal Viewer for Lab and Medication Records
//!
//! Browses the laboratories and medications of a JSON data file as filtered, paginated
//! tables with per-row edit and delete actions.
//!
//! ## Architecture
//!
//! - [`records`] - Record types and their searchable fields
//! - [`listing`] - Search filter, pagination, list view model and row-action dispatch
//! - [`contact`] - Lab contact links and the platform URL launchers
//! - [`store`] - Data file access and the background store worker
//! - [`input`] - Key bindings and the terminal input thread
//! - [`render`] - Render coordination and the ratatui terminal UI
//! - [`config`] - Config file and resolved settings
//! - [`app`] - Application wiring
//! - [`error`] - Centralized error types and handling

pub mod error;
pub mod records;

pub mod contact;
pub mod listing;
pub mod store;

pub mod input;
pub mod render;

pub mod app;
pub mod config;

pub use error::{MedlistError, Result};

pub use app::Application;
pub use config::{Config, Settings};
pub use listing::{filter_records, PageSize, Paginator};
pub use records::{Lab, Medication, Order, Record, RecordKind};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
