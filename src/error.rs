//! Error types and handling infrastructure for medlist.
//!
//! Library code returns [`MedlistError`] through the crate-wide [`Result`] alias; the
//! binary wraps it in `anyhow` for context.
//!
//! A refused lab delete is *not* an error. It surfaces as an
//! [`ActionOutcome`](crate::listing::ActionOutcome) plus a warning notification.

use std::path::PathBuf;
use thiserror::Error;

/// The main error type for medlist operations.
#[derive(Error, Debug)]
pub enum MedlistError {
    /// File system related errors (file not found, permission denied, etc.)
    #[error("File operation failed: {message}")]
    FileError {
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// Data file missing at startup or reload
    #[error("Data file not found: {path}")]
    FileNotFound { path: PathBuf },

    /// Path exists but is not a regular file
    #[error("Path is not a regular file: {path}")]
    NotAFile { path: PathBuf },

    /// The data file is not a valid record document
    #[error("Invalid data file: {message}")]
    DataFormat {
        message: String,
        #[source]
        source: serde_json::Error,
    },

    /// A record referenced by id does not exist in the store
    #[error("Record not found: {id}")]
    RecordNotFound { id: String },

    /// Store worker errors (worker gone, persistence failed)
    #[error("Store operation failed: {message}")]
    StoreError { message: String },

    /// Terminal setup, teardown and size queries
    #[error("UI operation failed: {message}")]
    UIError { message: String },

    /// Configuration related errors
    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    /// Invalid command line arguments
    #[error("Invalid argument: {message}")]
    InvalidArgument { message: String },
}

/// Standard Result type for medlist operations.
pub type Result<T> = std::result::Result<T, MedlistError>;

impl MedlistError {
    /// Create a FileError from an io::Error with additional context
    pub fn file_error(message: impl Into<String>, source: std::io::Error) -> Self {
        Self::FileError {
            message: message.into(),
            source,
        }
    }

    /// Create a StoreError with a descriptive message
    pub fn store(message: impl Into<String>) -> Self {
        Self::StoreError {
            message: message.into(),
        }
    }

    /// Create a UIError with a descriptive message
    pub fn ui(message: impl Into<String>) -> Self {
        Self::UIError {
            message: message.into(),
        }
    }

    /// Create a ConfigError with a descriptive message
    pub fn config(message: impl Into<String>) -> Self {
        Self::ConfigError {
            message: message.into(),
        }
    }

    /// Create an InvalidArgument error
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            message: message.into(),
        }
    }
}

impl From<std::io::Error> for MedlistError {
    fn from(err: std::io::Error) -> Self {
        let message = match err.kind() {
            std::io::ErrorKind::NotFound => "File not found",
            std::io::ErrorKind::PermissionDenied => "Permission denied",
            _ => "IO operation failed",
        };
        Self::FileError {
            message: message.to_string(),
            source: err,
        }
    }
}

impl From<serde_json::Error> for MedlistError {
    fn from(err: serde_json::Error) -> Self {
        Self::DataFormat {
            message: format!("line {}, column {}", err.line(), err.column()),
            source: err,
        }
    }
}
