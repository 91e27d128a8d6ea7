//! # Beam Data Table
//!
//! Loads the pre-computed shear/moment samples from a CSV spreadsheet export.
//! No mechanics is computed here: the spreadsheet already holds the analysis
//! results, this module only parses and holds them.
//!
//! ## Expected Columns
//!
//! | Column           | Meaning                  | Unit |
//! |------------------|--------------------------|------|
//! | `X`              | Position along the beam  | m    |
//! | `Shear force`    | Internal shear           | kN   |
//! | `Bending Moment` | Internal bending moment  | kN·m |
//!
//! Extra columns are ignored. Rows are kept in file order; the data is
//! expected (not enforced) to be sorted by position.
//!
//! ## Example
//!
//! ```rust,no_run
//! use memo_core::table::load_table;
//! use std::path::Path;
//!
//! let table = load_table(Path::new("beam_data.csv")).unwrap();
//! println!("{} sample points", table.len());
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::errors::{ReportError, ReportResult};

/// Header name of the position column (meters)
pub const COL_POSITION: &str = "X";
/// Header name of the shear force column (kN)
pub const COL_SHEAR: &str = "Shear force";
/// Header name of the bending moment column (kN·m)
pub const COL_MOMENT: &str = "Bending Moment";

/// One sampled point along the beam
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BeamRecord {
    /// Position along the beam (m from left support)
    pub position_m: f64,
    /// Internal shear force at this position (kN)
    pub shear_kn: f64,
    /// Internal bending moment at this position (kN·m)
    pub moment_knm: f64,
}

/// Ordered, immutable sequence of beam samples.
///
/// Loaded once per run via [`load_table`]; read-only afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BeamTable {
    records: Vec<BeamRecord>,
}

impl BeamTable {
    /// Create a table from raw records (mainly for tests and demos)
    pub fn new(records: Vec<BeamRecord>) -> Self {
        BeamTable { records }
    }

    /// All records in file order
    pub fn records(&self) -> &[BeamRecord] {
        &self.records
    }

    /// Number of sample points
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the table holds no samples
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Iterate every `stride`-th record, starting at index 0.
    ///
    /// Used to thin the rendered summary table; a stride of 0 is treated
    /// as 1.
    pub fn sampled(&self, stride: usize) -> impl Iterator<Item = &BeamRecord> {
        self.records.iter().step_by(stride.max(1))
    }
}

/// Load a beam table from a CSV spreadsheet at `path`.
///
/// # Returns
///
/// * `Ok(BeamTable)` - Parsed samples in file order
/// * `Err(ReportError::InputNotFound)` - File does not exist
/// * `Err(ReportError::InputFormat)` - Required column missing or a cell
///   in a required column is not numeric
pub fn load_table(path: &Path) -> ReportResult<BeamTable> {
    if !path.exists() {
        return Err(ReportError::input_not_found(path.display().to_string()));
    }

    let mut reader = csv::Reader::from_path(path).map_err(|e| {
        ReportError::input_format(path.display().to_string(), e.to_string())
    })?;

    let headers = reader.headers().map_err(|e| {
        ReportError::input_format(path.display().to_string(), e.to_string())
    })?;

    let position_idx = column_index(headers, COL_POSITION, path)?;
    let shear_idx = column_index(headers, COL_SHEAR, path)?;
    let moment_idx = column_index(headers, COL_MOMENT, path)?;

    let mut records = Vec::new();
    for (row_idx, row) in reader.records().enumerate() {
        let row = row.map_err(|e| {
            ReportError::input_format(path.display().to_string(), e.to_string())
        })?;

        records.push(BeamRecord {
            position_m: numeric_cell(&row, position_idx, COL_POSITION, row_idx, path)?,
            shear_kn: numeric_cell(&row, shear_idx, COL_SHEAR, row_idx, path)?,
            moment_knm: numeric_cell(&row, moment_idx, COL_MOMENT, row_idx, path)?,
        });
    }

    Ok(BeamTable::new(records))
}

/// Find a required column by exact header name
fn column_index(headers: &csv::StringRecord, name: &str, path: &Path) -> ReportResult<usize> {
    headers.iter().position(|h| h == name).ok_or_else(|| {
        ReportError::input_format(
            path.display().to_string(),
            format!("missing required column '{}'", name),
        )
    })
}

/// Parse a required numeric cell; `row_idx` is 0-based over data rows
fn numeric_cell(
    row: &csv::StringRecord,
    idx: usize,
    name: &str,
    row_idx: usize,
    path: &Path,
) -> ReportResult<f64> {
    let raw = row.get(idx).ok_or_else(|| {
        ReportError::input_format(
            path.display().to_string(),
            format!("row {}: missing '{}' cell", row_idx + 2, name),
        )
    })?;

    raw.trim().parse::<f64>().map_err(|_| {
        ReportError::input_format(
            path.display().to_string(),
            format!("row {}: non-numeric '{}' value '{}'", row_idx + 2, name, raw),
        )
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env::temp_dir;
    use std::fs;
    use std::path::PathBuf;

    fn temp_csv_path(name: &str) -> PathBuf {
        temp_dir().join(format!("memo_core_test_{}.csv", name))
    }

    fn write_csv(name: &str, contents: &str) -> PathBuf {
        let path = temp_csv_path(name);
        fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn test_load_parses_rows_in_order() {
        let path = write_csv(
            "in_order",
            "X,Shear force,Bending Moment\n0.0,0.0,0.0\n6.0,10.0,-5.0\n12.0,0.0,0.0\n",
        );

        let table = load_table(&path).unwrap();
        assert_eq!(table.len(), 3);
        assert_eq!(table.records()[1].position_m, 6.0);
        assert_eq!(table.records()[1].shear_kn, 10.0);
        assert_eq!(table.records()[1].moment_knm, -5.0);

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_extra_columns_ignored() {
        let path = write_csv(
            "extra_cols",
            "Node,X,Shear force,Bending Moment,Deflection\n1,0.0,5.0,2.5,0.001\n",
        );

        let table = load_table(&path).unwrap();
        assert_eq!(table.len(), 1);
        assert_eq!(table.records()[0].shear_kn, 5.0);

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_missing_file_is_input_not_found() {
        let path = temp_csv_path("does_not_exist");
        let _ = fs::remove_file(&path);

        let err = load_table(&path).unwrap_err();
        assert_eq!(err.error_code(), "INPUT_NOT_FOUND");
    }

    #[test]
    fn test_missing_shear_column_is_input_format() {
        let path = write_csv("no_shear", "X,Bending Moment\n0.0,0.0\n");

        let err = load_table(&path).unwrap_err();
        assert_eq!(err.error_code(), "INPUT_FORMAT");
        assert!(err.to_string().contains("Shear force"));

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_non_numeric_cell_is_input_format() {
        let path = write_csv(
            "non_numeric",
            "X,Shear force,Bending Moment\n0.0,n/a,0.0\n",
        );

        let err = load_table(&path).unwrap_err();
        assert_eq!(err.error_code(), "INPUT_FORMAT");
        assert!(err.to_string().contains("n/a"));

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_sampled_stride_two() {
        let table = BeamTable::new(
            (0..5)
                .map(|i| BeamRecord {
                    position_m: i as f64,
                    shear_kn: 0.0,
                    moment_knm: 0.0,
                })
                .collect(),
        );

        let positions: Vec<f64> = table.sampled(2).map(|r| r.position_m).collect();
        assert_eq!(positions, vec![0.0, 2.0, 4.0]);
    }

    #[test]
    fn test_empty_data_rows() {
        let path = write_csv("empty_rows", "X,Shear force,Bending Moment\n");

        let table = load_table(&path).unwrap();
        assert!(table.is_empty());

        let _ = fs::remove_file(&path);
    }
}
