//! Exports: per-point CSV, report JSON, and raw x/y CSV for synthetic data.
//!
//! The CSV exports are meant to be easy to consume in spreadsheets or
//! downstream scripts; the JSON export carries the full report.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use chrono::{DateTime, Local};
use serde::Serialize;

use crate::error::AppError;
use crate::report::FitReport;

/// Top-level JSON document written by `write_report_json`.
#[derive(Debug, Serialize)]
pub struct ReportFile<'a> {
    pub tool: &'static str,
    pub version: &'static str,
    pub generated_at: DateTime<Local>,
    pub report: &'a FitReport,
}

/// Write per-point results to a CSV file.
pub fn write_points_csv(path: &Path, report: &FitReport) -> Result<(), AppError> {
    let mut file = File::create(path)
        .map_err(|e| AppError::new(2, format!("Failed to create export CSV '{}': {e}", path.display())))?;
    write_points(&mut file, report)
        .map_err(|e| AppError::new(2, format!("Failed to write export CSV: {e}")))
}

fn write_points<W: Write>(out: &mut W, report: &FitReport) -> std::io::Result<()> {
    writeln!(out, "x,y,weight,predicted,residual")?;
    for p in &report.points {
        writeln!(
            out,
            "{},{},{},{},{}",
            p.x,
            p.y,
            p.weight.map(|w| w.to_string()).unwrap_or_default(),
            p.predicted,
            p.residual,
        )?;
    }
    Ok(())
}

/// Write the report as pretty JSON.
pub fn write_report_json(path: &Path, report: &FitReport) -> Result<(), AppError> {
    let file = File::create(path)
        .map_err(|e| AppError::new(2, format!("Failed to create report JSON '{}': {e}", path.display())))?;

    let doc = ReportFile {
        tool: "linefit",
        version: env!("CARGO_PKG_VERSION"),
        generated_at: Local::now(),
        report,
    };

    serde_json::to_writer_pretty(file, &doc)
        .map_err(|e| AppError::new(2, format!("Failed to write report JSON: {e}")))
}

/// Write raw `x,y` columns (the format `read_csv` accepts by default).
pub fn write_xy_csv(path: &Path, x: &[f64], y: &[f64]) -> Result<(), AppError> {
    let mut file = File::create(path)
        .map_err(|e| AppError::new(2, format!("Failed to create CSV '{}': {e}", path.display())))?;
    write_xy(&mut file, x, y).map_err(|e| AppError::new(2, format!("Failed to write CSV: {e}")))
}

fn write_xy<W: Write>(out: &mut W, x: &[f64], y: &[f64]) -> std::io::Result<()> {
    writeln!(out, "x,y")?;
    for (x, y) in x.iter().zip(y) {
        writeln!(out, "{x},{y}")?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::EngineOptions;
    use crate::fit::LineFit;
    use crate::io::ingest::{CsvColumns, read_csv};

    fn report() -> FitReport {
        let mut engine = LineFit::new(EngineOptions {
            validate: false,
            hush: true,
        });
        engine
            .set_data(&[1.0, 2.0, 3.0], &[2.0, 4.5, 5.5], Some(&[1.0, 1.0, 1.0]))
            .unwrap();
        FitReport::from_engine(&engine, &[4.0]).unwrap()
    }

    #[test]
    fn points_csv_has_one_row_per_point() {
        let mut buf = Vec::new();
        write_points(&mut buf, &report()).unwrap();
        let txt = String::from_utf8(buf).unwrap();
        let lines: Vec<&str> = txt.lines().collect();
        assert_eq!(lines[0], "x,y,weight,predicted,residual");
        assert_eq!(lines.len(), 4);
        assert!(lines[1].starts_with("1,2,1,"));
    }

    #[test]
    fn xy_csv_round_trips_through_ingest() {
        let mut buf = Vec::new();
        write_xy(&mut buf, &[0.5, 1.5, -2.25], &[1.0, 2.0, 3.0]).unwrap();
        let data = read_csv(buf.as_slice(), &CsvColumns::default(), true).unwrap();
        assert_eq!(data.dataset.x(), &[0.5, 1.5, -2.25]);
    }

    #[test]
    fn report_json_has_expected_shape() {
        let report = report();
        let doc = ReportFile {
            tool: "linefit",
            version: "test",
            generated_at: Local::now(),
            report: &report,
        };
        let value = serde_json::to_value(&doc).unwrap();
        assert_eq!(value["tool"], "linefit");
        assert!(value["report"]["coefficients"]["slope"].is_number());
        assert_eq!(value["report"]["points"].as_array().unwrap().len(), 3);
        assert_eq!(value["report"]["forecasts"][0]["x"], 4.0);
        assert!(value["report"].get("solver_deviation").is_none());
    }
}
