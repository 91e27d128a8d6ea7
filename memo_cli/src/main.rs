//! # Beamemo CLI
//!
//! No-argument entry point for the memorandum pipeline. All paths are
//! fixed: `beam_data.csv` in, `beam_memorandum.pdf` (plus its `.typ`
//! intermediate) out, with an optional `beam.png` figure picked up from
//! the working directory when present.
//!
//! Exit code is 0 on success; any load/build/render failure prints the
//! error (and its JSON form) to stderr and exits non-zero.

use std::path::Path;
use std::process::ExitCode;

use memo_core::pdf::render_to_file;
use memo_core::report::{build_document, ReportMetadata};
use memo_core::table::load_table;
use memo_core::ReportResult;

/// Fixed input spreadsheet path
const INPUT_PATH: &str = "beam_data.csv";
/// Fixed output artifact path (the .typ intermediate sits alongside)
const OUTPUT_PATH: &str = "beam_memorandum.pdf";

fn main() -> ExitCode {
    println!("Beamemo - Beam Memorandum Generator");
    println!("===================================");
    println!();

    match run() {
        Ok(()) => {
            println!("Success: {}", OUTPUT_PATH);
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            if let Ok(json) = serde_json::to_string_pretty(&e) {
                eprintln!();
                eprintln!("Error JSON:");
                eprintln!("{}", json);
            }
            ExitCode::FAILURE
        }
    }
}

fn run() -> ReportResult<()> {
    println!("Reading beam data from {}...", INPUT_PATH);
    let table = load_table(Path::new(INPUT_PATH))?;
    println!("Loaded {} sample points", table.len());

    let meta = ReportMetadata::new(
        "Structures Group",
        "SM-2024-116",
        "Simply Supported Beam - 12m Span Analysis",
    );
    let document = build_document(&table, &meta);

    println!("Generating memorandum PDF...");
    render_to_file(&document, Path::new(OUTPUT_PATH))
}
