//! # Error Types
//!
//! Structured error types for memo_core. Every failure in the pipeline is
//! terminal: nothing is retried, the error propagates to the caller and the
//! run stops.
//!
//! ## Example
//!
//! ```rust
//! use memo_core::errors::{ReportError, ReportResult};
//!
//! fn check_column(headers: &[&str], name: &str) -> ReportResult<()> {
//!     if !headers.contains(&name) {
//!         return Err(ReportError::input_format(
//!             "beam_data.csv",
//!             format!("missing required column '{}'", name),
//!         ));
//!     }
//!     Ok(())
//! }
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias for memo_core operations
pub type ReportResult<T> = Result<T, ReportError>;

/// Structured error type for the report pipeline.
///
/// Each variant carries enough context (paths, column names, compiler
/// diagnostics) to diagnose a failed run from the message alone.
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "details")]
pub enum ReportError {
    /// The input spreadsheet does not exist
    #[error("Input file not found: '{path}'")]
    InputNotFound { path: String },

    /// The input spreadsheet exists but is malformed (missing required
    /// columns, non-numeric cells, unreadable rows)
    #[error("Malformed input '{path}': {reason}")]
    InputFormat { path: String, reason: String },

    /// Typesetting or PDF export failed
    #[error("Render failed: {reason}")]
    Render { reason: String },

    /// File I/O error on an output or resource file
    #[error("File error: {operation} on '{path}' - {reason}")]
    File {
        operation: String,
        path: String,
        reason: String,
    },
}

impl ReportError {
    /// Create an InputNotFound error
    pub fn input_not_found(path: impl Into<String>) -> Self {
        ReportError::InputNotFound { path: path.into() }
    }

    /// Create an InputFormat error
    pub fn input_format(path: impl Into<String>, reason: impl Into<String>) -> Self {
        ReportError::InputFormat {
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Create a Render error
    pub fn render(reason: impl Into<String>) -> Self {
        ReportError::Render {
            reason: reason.into(),
        }
    }

    /// Create a File error
    pub fn file_error(
        operation: impl Into<String>,
        path: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        ReportError::File {
            operation: operation.into(),
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Get a short error code for programmatic handling
    pub fn error_code(&self) -> &'static str {
        match self {
            ReportError::InputNotFound { .. } => "INPUT_NOT_FOUND",
            ReportError::InputFormat { .. } => "INPUT_FORMAT",
            ReportError::Render { .. } => "RENDER",
            ReportError::File { .. } => "FILE_ERROR",
        }
    }
}
