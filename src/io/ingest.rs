//! CSV ingest.
//!
//! Turns a CSV with a header row into a `Dataset`. Columns are picked by
//! header name (case-insensitive); the weight column is optional.
//!
//! Every field goes through the numeric-literal check before parsing:
//! - in validating mode the first bad field aborts ingest with its row index
//!   and column
//! - otherwise bad rows are skipped and listed in `row_errors`

use std::collections::HashMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use csv::StringRecord;

use crate::error::{AppError, Field, LineFitError};
use crate::fit::Dataset;
use crate::fit::validate::parse_numeric;

/// Column names to read.
#[derive(Debug, Clone)]
pub struct CsvColumns {
    pub x: String,
    pub y: String,
    pub weight: Option<String>,
}

impl Default for CsvColumns {
    fn default() -> Self {
        Self {
            x: "x".to_string(),
            y: "y".to_string(),
            weight: None,
        }
    }
}

/// A row-level error encountered during ingest.
#[derive(Debug, Clone)]
pub struct RowError {
    /// 1-based line in the file (the header is line 1).
    pub line: usize,
    pub message: String,
}

#[derive(Debug, Clone)]
pub struct IngestedData {
    pub dataset: Dataset,
    pub row_errors: Vec<RowError>,
    pub rows_read: usize,
    pub rows_used: usize,
}

/// Load a dataset from a CSV file.
pub fn load_csv(path: &Path, columns: &CsvColumns, validate: bool) -> Result<IngestedData, AppError> {
    let file = File::open(path)
        .map_err(|e| AppError::new(2, format!("Failed to open CSV '{}': {e}", path.display())))?;
    read_csv(file, columns, validate)
}

/// Load a dataset from any CSV reader.
pub fn read_csv<R: Read>(reader: R, columns: &CsvColumns, validate: bool) -> Result<IngestedData, AppError> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = reader
        .headers()
        .map_err(|e| AppError::new(2, format!("Failed to read CSV headers: {e}")))?
        .clone();
    let header_map = build_header_map(&headers);

    let x_idx = require_column(&header_map, &columns.x)?;
    let y_idx = require_column(&header_map, &columns.y)?;
    let w_idx = columns
        .weight
        .as_deref()
        .map(|name| require_column(&header_map, name))
        .transpose()?;

    let mut x = Vec::new();
    let mut y = Vec::new();
    let mut w = Vec::new();
    let mut row_errors = Vec::new();
    let mut rows_read = 0usize;

    for (idx, result) in reader.records().enumerate() {
        let line = idx + 2;
        rows_read += 1;

        let record = match result {
            Ok(r) => r,
            Err(e) => {
                if validate {
                    return Err(AppError::new(2, format!("CSV parse error on line {line}: {e}")));
                }
                row_errors.push(RowError {
                    line,
                    message: format!("CSV parse error: {e}"),
                });
                continue;
            }
        };

        // Index into the accepted data, as the engine would report it.
        let index = x.len();
        let row = parse_row(&record, index, x_idx, y_idx, w_idx);
        match row {
            Ok((xv, yv, wv)) => {
                x.push(xv);
                y.push(yv);
                if let Some(wv) = wv {
                    w.push(wv);
                }
            }
            Err(err) if validate => return Err(err.into()),
            Err(err) => row_errors.push(RowError {
                line,
                message: err.to_string(),
            }),
        }
    }

    let weights = w_idx.map(|_| w.as_slice());
    let dataset = Dataset::from_columns(&x, &y, weights, validate)?;
    let rows_used = dataset.len();

    Ok(IngestedData {
        dataset,
        row_errors,
        rows_read,
        rows_used,
    })
}

fn parse_row(
    record: &StringRecord,
    index: usize,
    x_idx: usize,
    y_idx: usize,
    w_idx: Option<usize>,
) -> Result<(f64, f64, Option<f64>), LineFitError> {
    let field = |col: usize, which: Field| parse_numeric(record.get(col).unwrap_or(""), which, index);
    let x = field(x_idx, Field::X)?;
    let y = field(y_idx, Field::Y)?;
    let w = w_idx.map(|col| field(col, Field::Weight)).transpose()?;
    Ok((x, y, w))
}

fn build_header_map(headers: &StringRecord) -> HashMap<String, usize> {
    headers
        .iter()
        .enumerate()
        .map(|(i, h)| (h.trim().to_ascii_lowercase(), i))
        .collect()
}

fn require_column(header_map: &HashMap<String, usize>, name: &str) -> Result<usize, AppError> {
    header_map
        .get(&name.trim().to_ascii_lowercase())
        .copied()
        .ok_or_else(|| AppError::new(2, format!("Missing required CSV column '{name}'.")))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn columns(weight: Option<&str>) -> CsvColumns {
        CsvColumns {
            weight: weight.map(str::to_string),
            ..CsvColumns::default()
        }
    }

    #[test]
    fn reads_columns_by_header_name() {
        let csv = "id,Y,X\na,10,1\nb,20,2\nc,35,3\n";
        let data = read_csv(csv.as_bytes(), &columns(None), true).unwrap();
        assert_eq!(data.dataset.x(), &[1.0, 2.0, 3.0]);
        assert_eq!(data.dataset.y(), &[10.0, 20.0, 35.0]);
        assert_eq!(data.rows_used, 3);
        assert!(data.row_errors.is_empty());
    }

    #[test]
    fn reads_and_normalizes_weights() {
        let csv = "x,y,w\n1,2,1\n2,4,1\n3,5,2\n";
        let data = read_csv(csv.as_bytes(), &columns(Some("w")), false).unwrap();
        assert_eq!(data.dataset.weights(), Some(&[0.75, 0.75, 1.5][..]));
    }

    #[test]
    fn lenient_mode_skips_bad_rows() {
        let csv = "x,y\n1,2\n2,abc\n3,6\n4,\n5,10\n";
        let data = read_csv(csv.as_bytes(), &columns(None), false).unwrap();
        assert_eq!(data.rows_read, 5);
        assert_eq!(data.rows_used, 3);
        assert_eq!(data.row_errors.len(), 2);
        assert_eq!(data.row_errors[0].line, 3);
        assert!(data.row_errors[0].message.contains("y[1]"));
    }

    #[test]
    fn validate_mode_stops_at_first_bad_field() {
        let csv = "x,y\n1,2\n2x,3\n";
        let err = read_csv(csv.as_bytes(), &columns(None), true).unwrap_err();
        assert_eq!(err.exit_code(), 3);
        assert!(err.to_string().contains("x[1] is not a number: 2x"));
    }

    #[test]
    fn missing_column_is_an_input_error() {
        let err = read_csv("a,b\n1,2\n".as_bytes(), &columns(None), false).unwrap_err();
        assert_eq!(err.exit_code(), 2);
        assert!(err.to_string().contains("'x'"));
    }

    #[test]
    fn too_few_rows_is_rejected() {
        let err = read_csv("x,y\n1,2\n".as_bytes(), &columns(None), false).unwrap_err();
        assert_eq!(err.exit_code(), 3);
    }
}
