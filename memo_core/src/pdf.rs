//! # PDF Rendering Module
//!
//! Compiles the memorandum's Typst source to PDF bytes in-process.
//!
//! ## Architecture
//!
//! - The document serializes itself to Typst source ([`crate::report`])
//! - A minimal in-memory [`typst::World`] supplies fonts and the optional
//!   figure bytes; no real filesystem access happens during compilation
//! - Output is raw PDF bytes (`Vec<u8>`)
//!
//! [`render_to_file`] writes the `.typ` source next to the PDF before
//! compiling, so a failed render leaves the markup behind for diagnosis.
//!
//! ## Example
//!
//! ```rust,no_run
//! use memo_core::pdf::render_to_file;
//! use memo_core::report::{build_document, ReportMetadata};
//! use memo_core::table::load_table;
//! use std::path::Path;
//!
//! let table = load_table(Path::new("beam_data.csv")).unwrap();
//! let meta = ReportMetadata::new("Structures Group", "SM-2024-116", "Span Analysis");
//! let document = build_document(&table, &meta);
//! render_to_file(&document, Path::new("beam_memorandum.pdf")).unwrap();
//! ```

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use chrono::Utc;
use typst::diag::{FileError, FileResult};
use typst::foundations::{Bytes, Datetime};
use typst::syntax::{FileId, Source, VirtualPath};
use typst::text::{Font, FontBook};
use typst::utils::LazyHash;
use typst::{Library, LibraryExt, World};
use typst_pdf::PdfOptions;

use crate::errors::{ReportError, ReportResult};
use crate::report::{ReportDocument, FIGURE_VIRTUAL_PATH};

// ============================================================================
// Typst World Implementation
// ============================================================================

/// A minimal Typst world: one main source plus in-memory binary assets.
struct PdfWorld {
    /// The main source document
    main: Source,
    /// Binary assets (the figure) served by virtual path
    files: HashMap<FileId, Bytes>,
    /// Font book
    book: LazyHash<FontBook>,
    /// Available fonts
    fonts: Vec<Font>,
    /// Library (standard functions)
    library: LazyHash<Library>,
}

impl PdfWorld {
    fn new(source: String, assets: Vec<(String, Vec<u8>)>) -> Self {
        let fonts = Self::load_fonts();
        let book = FontBook::from_fonts(&fonts);

        let main_id = FileId::new(None, VirtualPath::new("/memorandum.typ"));
        let files = assets
            .into_iter()
            .map(|(name, bytes)| {
                let id = FileId::new(None, VirtualPath::new(format!("/{}", name)));
                (id, Bytes::new(bytes))
            })
            .collect();

        PdfWorld {
            main: Source::new(main_id, source),
            files,
            book: LazyHash::new(book),
            fonts,
            library: LazyHash::new(Library::default()),
        }
    }

    /// Bundled fonts from typst-assets (embedded at compile time)
    fn load_fonts() -> Vec<Font> {
        let mut fonts = Vec::new();

        for font_bytes in typst_assets::fonts() {
            let buffer = Bytes::new(font_bytes.to_vec());
            for font in Font::iter(buffer) {
                fonts.push(font);
            }
        }

        fonts
    }
}

impl World for PdfWorld {
    fn library(&self) -> &LazyHash<Library> {
        &self.library
    }

    fn book(&self) -> &LazyHash<FontBook> {
        &self.book
    }

    fn main(&self) -> FileId {
        self.main.id()
    }

    fn source(&self, id: FileId) -> FileResult<Source> {
        if id == self.main.id() {
            Ok(self.main.clone())
        } else {
            Err(FileError::NotFound(id.vpath().as_rootless_path().into()))
        }
    }

    fn file(&self, id: FileId) -> FileResult<Bytes> {
        self.files
            .get(&id)
            .cloned()
            .ok_or_else(|| FileError::NotFound(id.vpath().as_rootless_path().into()))
    }

    fn font(&self, index: usize) -> Option<Font> {
        self.fonts.get(index).cloned()
    }

    fn today(&self, _offset: Option<i64>) -> Option<Datetime> {
        let now = Utc::now();
        Datetime::from_ymd(
            now.format("%Y").to_string().parse().ok()?,
            now.format("%m").to_string().parse().ok()?,
            now.format("%d").to_string().parse().ok()?,
        )
    }
}

// ============================================================================
// Rendering Functions
// ============================================================================

/// Render a document to PDF bytes.
///
/// Reads the figure file (if the document carries one) and serves it to the
/// compiler as an in-memory asset.
///
/// # Returns
///
/// * `Ok(Vec<u8>)` - PDF file as bytes
/// * `Err(ReportError::Render)` - Typst compilation or PDF export failed
/// * `Err(ReportError::File)` - The figure file could not be read
pub fn render_pdf(document: &ReportDocument) -> ReportResult<Vec<u8>> {
    let mut assets = Vec::new();
    if let Some(figure_path) = document.figure() {
        let bytes = fs::read(figure_path).map_err(|e| {
            ReportError::file_error(
                "read figure",
                figure_path.display().to_string(),
                e.to_string(),
            )
        })?;
        assets.push((FIGURE_VIRTUAL_PATH.to_string(), bytes));
    }

    let world = PdfWorld::new(document.source(), assets);

    let warned = typst::compile(&world);

    let compiled = warned.output.map_err(|errors| {
        let error_msgs: Vec<String> = errors.iter().map(|e| e.message.to_string()).collect();
        ReportError::render(format!(
            "Typst compilation failed: {}",
            error_msgs.join("; ")
        ))
    })?;

    let pdf_bytes = typst_pdf::pdf(&compiled, &PdfOptions::default()).map_err(|errors| {
        let error_msgs: Vec<String> = errors.iter().map(|e| e.message.to_string()).collect();
        ReportError::render(format!("PDF export failed: {}", error_msgs.join("; ")))
    })?;

    Ok(pdf_bytes)
}

/// Render a document to a PDF file at `output_path`.
///
/// The Typst source is written to `<output stem>.typ` first; on a render
/// failure it stays in place as the diagnostic intermediate.
pub fn render_to_file(document: &ReportDocument, output_path: &Path) -> ReportResult<()> {
    let source_path = output_path.with_extension("typ");
    fs::write(&source_path, document.source()).map_err(|e| {
        ReportError::file_error(
            "write markup",
            source_path.display().to_string(),
            e.to_string(),
        )
    })?;

    let pdf_bytes = render_pdf(document)?;

    fs::write(output_path, pdf_bytes).map_err(|e| {
        ReportError::file_error(
            "write pdf",
            output_path.display().to_string(),
            e.to_string(),
        )
    })?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::{build_document_with_figure, ReportMetadata};
    use crate::table::{BeamRecord, BeamTable};
    use std::env::temp_dir;
    use std::path::PathBuf;

    fn sample_table() -> BeamTable {
        BeamTable::new(vec![
            BeamRecord { position_m: 0.0, shear_kn: 0.0, moment_knm: 0.0 },
            BeamRecord { position_m: 6.0, shear_kn: 10.0, moment_knm: -5.0 },
            BeamRecord { position_m: 12.0, shear_kn: 0.0, moment_knm: 0.0 },
        ])
    }

    fn sample_meta() -> ReportMetadata {
        ReportMetadata::new("Test Engineer", "TEST-001", "Test Span").with_date("2024-11-16")
    }

    fn missing_figure() -> PathBuf {
        let path = temp_dir().join("memo_core_test_pdf_no_figure.png");
        let _ = fs::remove_file(&path);
        path
    }

    #[test]
    fn test_pdf_generation() {
        let document =
            build_document_with_figure(&sample_table(), &sample_meta(), &missing_figure());

        let pdf = render_pdf(&document);
        assert!(pdf.is_ok(), "PDF generation failed: {:?}", pdf.err());

        let pdf_bytes = pdf.unwrap();
        // PDF should start with %PDF
        assert!(pdf_bytes.starts_with(b"%PDF"), "Output is not a valid PDF");
        // Should be a reasonable size (at least 1KB)
        assert!(pdf_bytes.len() > 1000, "PDF seems too small");
    }

    #[test]
    fn test_render_to_file_leaves_markup_beside_pdf() {
        let output = temp_dir().join("memo_core_test_render.pdf");
        let markup = output.with_extension("typ");
        let _ = fs::remove_file(&output);
        let _ = fs::remove_file(&markup);

        let document =
            build_document_with_figure(&sample_table(), &sample_meta(), &missing_figure());
        render_to_file(&document, &output).unwrap();

        assert!(output.exists());
        assert!(markup.exists());

        let _ = fs::remove_file(&output);
        let _ = fs::remove_file(&markup);
    }

    #[test]
    fn test_undecodable_figure_fails_render_and_keeps_markup() {
        let figure = temp_dir().join("memo_core_test_bogus_figure.png");
        fs::write(&figure, b"definitely not image data").unwrap();

        let output = temp_dir().join("memo_core_test_failed_render.pdf");
        let markup = output.with_extension("typ");
        let _ = fs::remove_file(&output);
        let _ = fs::remove_file(&markup);

        let document =
            build_document_with_figure(&sample_table(), &sample_meta(), &figure);

        let err = render_to_file(&document, &output).unwrap_err();
        assert_eq!(err.error_code(), "RENDER");

        // the intermediate stays for diagnosis, the PDF was never written
        assert!(markup.exists());
        assert!(!output.exists());

        let _ = fs::remove_file(&figure);
        let _ = fs::remove_file(&markup);
    }
}
