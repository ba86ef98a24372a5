//! Shared "fit pipeline" logic used by every subcommand.
//!
//! Keeping this in one place avoids duplicating the core workflow:
//! loaded engine -> report -> optional SVD check -> print/plot/export

use crate::domain::FitConfig;
use crate::error::AppError;
use crate::fit::LineFit;
use crate::report::FitReport;

/// Build the report for an engine that already holds its dataset.
pub fn run_fit(engine: &LineFit, config: &FitConfig) -> Result<FitReport, AppError> {
    let mut report = FitReport::from_engine(engine, &config.forecast_xs)?;

    if config.verify {
        let data = engine
            .dataset()
            .ok_or_else(|| AppError::new(4, "No dataset to verify."))?;
        let svd = crate::math::solve_line(data)
            .ok_or_else(|| AppError::new(4, "SVD solve failed during verification."))?;
        report.solver_deviation = Some(crate::math::max_deviation(&svd, &report.coefficients));
    }

    Ok(report)
}

/// Print the report (and plot), then write any requested exports.
pub fn emit(report: &FitReport, config: &FitConfig) -> Result<(), AppError> {
    println!("{}", crate::report::format_report(report));

    if config.plot {
        let plot = crate::plot::render_ascii_plot(report, config.plot_width, config.plot_height);
        println!("{plot}");
    }

    if let Some(path) = &config.export_json {
        crate::io::export::write_report_json(path, report)?;
    }
    if let Some(path) = &config.export_points {
        crate::io::export::write_points_csv(path, report)?;
    }

    Ok(())
}
