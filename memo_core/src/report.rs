//! # Report Document Model
//!
//! Builds the memorandum as a typed, immutable value. [`build_document`]
//! collects everything the final document needs (cover metadata, sampled
//! table rows, diagram markup, figure presence) in one pass;
//! [`ReportDocument::source`] serializes it to Typst source in one more.
//! Nothing is appended to a mutable document object in between, which keeps
//! document construction a pure function that tests can compare
//! byte-for-byte.
//!
//! ## Document Layout
//!
//! 1. Cover block: title, subtitle, project identifier box
//! 2. "Project Scope" narrative with the optional free-body-diagram figure
//! 3. "Numerical Computation Matrix": every other sample row
//! 4. "Internal Force Envelopes": shear and moment diagrams from the full
//!    table
//!
//! ## Example
//!
//! ```rust
//! use memo_core::report::{build_document, ReportMetadata};
//! use memo_core::table::{BeamRecord, BeamTable};
//!
//! let table = BeamTable::new(vec![
//!     BeamRecord { position_m: 0.0, shear_kn: 0.0, moment_knm: 0.0 },
//!     BeamRecord { position_m: 12.0, shear_kn: 0.0, moment_knm: 0.0 },
//! ]);
//! let meta = ReportMetadata::new(
//!     "Structures Group",
//!     "SM-2024-116",
//!     "Simply Supported Beam - 12m Span Analysis",
//! );
//!
//! let document = build_document(&table, &meta);
//! assert!(document.source().contains("TECHNICAL MEMORANDUM"));
//! ```

use std::path::{Path, PathBuf};

use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::charts::{moment_diagram_markup, shear_diagram_markup};
use crate::table::BeamTable;

/// Well-known filesystem path probed for the free-body-diagram figure
pub const DEFAULT_FIGURE_PATH: &str = "beam.png";

/// Name the figure is served under inside the Typst compilation
pub const FIGURE_VIRTUAL_PATH: &str = "beam.png";

/// Stride used to thin the rendered summary table
pub const TABLE_STRIDE: usize = 2;

/// Cover-sheet metadata, used verbatim in the identifier box and footer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportMetadata {
    /// Lead engineer name
    pub author: String,
    /// Registration / job identifier
    pub id: String,
    /// One-line subject of the memorandum
    pub subject: String,
    /// Date of issue, already formatted for display
    pub date: String,
}

impl ReportMetadata {
    /// Create metadata dated today.
    ///
    /// # Example
    ///
    /// ```rust
    /// use memo_core::report::ReportMetadata;
    ///
    /// let meta = ReportMetadata::new("Structures Group", "SM-2024-116", "Span Analysis");
    /// assert_eq!(meta.id, "SM-2024-116");
    /// ```
    pub fn new(
        author: impl Into<String>,
        id: impl Into<String>,
        subject: impl Into<String>,
    ) -> Self {
        ReportMetadata {
            author: author.into(),
            id: id.into(),
            subject: subject.into(),
            date: Utc::now().format("%Y-%m-%d").to_string(),
        }
    }

    /// Override the date of issue (keeps document building reproducible)
    pub fn with_date(mut self, date: impl Into<String>) -> Self {
        self.date = date.into();
        self
    }
}

/// Immutable, fully-assembled memorandum.
///
/// Holds typed section values rather than markup fragments for everything
/// that needs to be inspected after building (table rows, figure path).
#[derive(Debug, Clone, PartialEq)]
pub struct ReportDocument {
    meta: ReportMetadata,
    /// Filesystem path of the figure, when it exists
    figure: Option<PathBuf>,
    /// Pre-formatted `[position, shear, moment]` summary rows
    table_rows: Vec<[String; 3]>,
    sfd_markup: String,
    bmd_markup: String,
}

impl ReportDocument {
    /// Figure file to embed, if one was found at build time
    pub fn figure(&self) -> Option<&Path> {
        self.figure.as_deref()
    }

    /// Formatted summary-table rows (stride-sampled)
    pub fn table_rows(&self) -> &[[String; 3]] {
        &self.table_rows
    }

    /// Serialize the document to Typst source in one pass.
    ///
    /// Pure function of the document value: identical documents produce
    /// byte-identical source.
    pub fn source(&self) -> String {
        let figure_body = if self.figure.is_some() {
            format!("image(\"{}\", width: 60%)", FIGURE_VIRTUAL_PATH)
        } else {
            "[]".to_string()
        };

        let table_rows = self
            .table_rows
            .iter()
            .map(|[position, shear, moment]| {
                format!("  [{}], [{}], [{}],", position, shear, moment)
            })
            .collect::<Vec<_>>()
            .join("\n");

        MEMO_TEMPLATE
            .replace("{{AUTHOR}}", &escape_typst(&self.meta.author))
            .replace("{{ID}}", &escape_typst(&self.meta.id))
            .replace("{{SUBJECT}}", &escape_typst(&self.meta.subject))
            .replace("{{DATE}}", &escape_typst(&self.meta.date))
            .replace("{{FIGURE_BODY}}", &figure_body)
            .replace("{{TABLE_ROWS}}", &table_rows)
            .replace("{{SFD}}", &self.sfd_markup)
            .replace("{{BMD}}", &self.bmd_markup)
    }
}

/// Build the memorandum from the loaded table and cover metadata.
///
/// Probes the well-known [`DEFAULT_FIGURE_PATH`] for the free-body-diagram
/// figure; when absent the figure content is silently omitted while the
/// captioned subsection stays in place.
pub fn build_document(table: &BeamTable, meta: &ReportMetadata) -> ReportDocument {
    build_document_with_figure(table, meta, Path::new(DEFAULT_FIGURE_PATH))
}

/// [`build_document`] with an explicit figure location.
pub fn build_document_with_figure(
    table: &BeamTable,
    meta: &ReportMetadata,
    figure_path: &Path,
) -> ReportDocument {
    let figure = figure_path.exists().then(|| figure_path.to_path_buf());

    let table_rows = table
        .sampled(TABLE_STRIDE)
        .map(|record| {
            [
                format!("{:.2}", record.position_m),
                format!("{:.1}", record.shear_kn),
                format!("{:.1}", record.moment_knm),
            ]
        })
        .collect();

    ReportDocument {
        meta: meta.clone(),
        figure,
        table_rows,
        sfd_markup: shear_diagram_markup(table),
        bmd_markup: moment_diagram_markup(table),
    }
}

/// Escape special Typst characters in user-provided text
pub fn escape_typst(s: &str) -> String {
    s.chars()
        .map(|c| match c {
            '*' => "\\*".to_string(),
            '_' => "\\_".to_string(),
            '#' => "\\#".to_string(),
            '$' => "\\$".to_string(),
            '@' => "\\@".to_string(),
            '<' => "\\<".to_string(),
            '>' => "\\>".to_string(),
            '\\' => "\\\\".to_string(),
            '`' => "\\`".to_string(),
            _ => c.to_string(),
        })
        .collect()
}

/// Typst template for the memorandum.
///
/// `force-diagram` draws a closed-path area chart from raw data
/// coordinates: bounds and scaling are computed here in the template, so
/// the Rust side emits table values untouched.
const MEMO_TEMPLATE: &str = r##"#set page(
  paper: "a4",
  margin: 0.75in,
  footer: context [
    #line(length: 100%, stroke: 0.5pt + gray)
    #v(4pt)
    #grid(
      columns: (1fr, 1fr),
      align(left)[#text(size: 9pt, fill: gray)[{{AUTHOR}} | {{ID}}]],
      align(right)[#text(size: 9pt)[Page #counter(page).display()]],
    )
  ],
)

#set text(size: 11pt)

#let slate = rgb("#273746")
#let accent = rgb("#2E86C1")

#let force-diagram(points, color: accent, fill-opacity: 10%, ylabel: $V$, title-text: "") = {
  if points.len() == 0 {
    return
  }
  let w = 11cm
  let h = 5cm
  let xs = points.map(p => p.at(0))
  let ys = points.map(p => p.at(1))
  let x-min = calc.min(..xs)
  let x-max = calc.max(..xs)
  let y-min = calc.min(0, ..ys)
  let y-max = calc.max(0, ..ys)
  let x-span = if x-max - x-min == 0 { 1 } else { x-max - x-min }
  let y-span = if y-max - y-min == 0 { 1 } else { y-max - y-min }
  let to-xy(p) = (
    (p.at(0) - x-min) / x-span * w,
    h - (p.at(1) - y-min) / y-span * h,
  )

  align(center, text(weight: "bold", fill: color, title-text))
  v(6pt)
  align(center, box(width: w, height: h, {
    // dotted major grid
    for i in range(11) {
      place(top + left, dx: i / 10 * w, line(angle: 90deg, length: h,
        stroke: (paint: slate.transparentize(70%), thickness: 0.4pt, dash: "dotted")))
    }
    for i in range(6) {
      place(top + left, dy: i / 5 * h, line(length: w,
        stroke: (paint: slate.transparentize(70%), thickness: 0.4pt, dash: "dotted")))
    }
    // left y-axis and the zero line
    place(top + left, line(angle: 90deg, length: h, stroke: 0.8pt + slate))
    place(top + left, dy: h - (0 - y-min) / y-span * h,
      line(length: w, stroke: 0.8pt + slate))
    // closed data path
    let segments = (curve.move(to-xy(points.at(0))),)
    for p in points.slice(1) {
      segments.push(curve.line(to-xy(p)))
    }
    segments.push(curve.close())
    place(top + left, curve(
      fill: color.transparentize(100% - fill-opacity),
      stroke: 1.2pt + color,
      ..segments,
    ))
    // axis labels
    place(top + left, dx: 4pt, dy: 2pt, text(size: 9pt, fill: slate, ylabel))
    place(bottom + right, dx: -2pt, dy: -2pt, text(size: 9pt, fill: slate, $x$))
  }))
  v(10pt)
}

#align(center)[
  #text(size: 24pt, weight: "bold", fill: slate)[TECHNICAL MEMORANDUM]
  #v(0.5cm)
  #text(size: 14pt, style: "italic")[Structural Analysis of Flexural Members]
  #v(0.8cm)
  #block(width: 100%, stroke: 1pt + slate, inset: 12pt, radius: 2pt)[
    #align(left)[
      #text(weight: "bold", fill: slate)[Project Identifiers]
      #v(6pt)
      *Lead Engineer:* {{AUTHOR}} \
      *Registration ID:* {{ID}} \
      *Subject:* {{SUBJECT}} \
      *Date of Issue:* {{DATE}}
    ]
  ]
]

#v(0.5cm)

== Project Scope

This memorandum presents the calculated internal force distribution for a
primary structural element. The analysis focuses on deriving the Shear Force
Diagram (SFD) and Bending Moment Diagram (BMD) under static load conditions.

=== Configuration Modeling

The beam is modeled with ideal pinned-roller boundary conditions. The
geometry and loading path are visualized in the figure below:

#figure(
  {{FIGURE_BODY}},
  caption: [Analytical Free Body Diagram.],
)

#pagebreak()

== Numerical Computation Matrix

Sampled data points extracted from the finite element simulation:

#v(0.3cm)

#table(
  columns: (3cm, 3cm, 3cm),
  stroke: none,
  inset: (y: 6pt),
  table.header([*Point (m)*], [*Shear (kN)*], [*Moment (kNm)*]),
  table.hline(stroke: 0.75pt + slate),
{{TABLE_ROWS}}
)

== Internal Force Envelopes

The graphical plots below describe the mechanical response of the beam.

=== Shear Force Variance

{{SFD}}

=== Bending Moment Variance

{{BMD}}
"##;
