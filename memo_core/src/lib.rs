//! # memo_core - Beam Memorandum Engine
//!
//! `memo_core` turns a spreadsheet of pre-computed beam analysis samples
//! (position, shear force, bending moment) into a typeset PDF memorandum
//! with a cover sheet, a sampled data table, and shear/moment diagrams.
//!
//! There is no calculation engine here: the values are inputs, and the
//! pipeline is strictly sequential - load the table, build an immutable
//! document value, render it.
//!
//! ## Design Philosophy
//!
//! - **Pure building**: `build_document` is a deterministic function of the
//!   table and metadata; the document serializes to Typst source in one pass
//! - **Rich Errors**: Structured, serializable error types, not just strings
//! - **In-process rendering**: Typst compilation happens in memory, no
//!   external toolchain required
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use memo_core::pdf::render_to_file;
//! use memo_core::report::{build_document, ReportMetadata};
//! use memo_core::table::load_table;
//! use std::path::Path;
//!
//! let table = load_table(Path::new("beam_data.csv"))?;
//! let meta = ReportMetadata::new(
//!     "Structures Group",
//!     "SM-2024-116",
//!     "Simply Supported Beam - 12m Span Analysis",
//! );
//! let document = build_document(&table, &meta);
//! render_to_file(&document, Path::new("beam_memorandum.pdf"))?;
//! # Ok::<(), memo_core::errors::ReportError>(())
//! ```
//!
//! ## Modules
//!
//! - [`table`] - Spreadsheet loading and the immutable sample table
//! - [`report`] - Typed document model and Typst-source serialization
//! - [`charts`] - Shear/moment diagram markup generators
//! - [`pdf`] - In-process Typst compilation and artifact writing
//! - [`errors`] - Structured error types

pub mod charts;
pub mod errors;
pub mod pdf;
pub mod report;
pub mod table;

// Re-export commonly used types at crate root for convenience
pub use errors::{ReportError, ReportResult};
pub use pdf::{render_pdf, render_to_file};
pub use report::{build_document, ReportDocument, ReportMetadata};
pub use table::{load_table, BeamRecord, BeamTable};
