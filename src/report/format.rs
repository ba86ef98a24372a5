//! Formatted terminal output.
//!
//! We keep formatting code in one place so:
//! - the fitting code stays clean and testable
//! - output changes are localized

use crate::report::FitReport;

/// Format the full fit summary.
pub fn format_report(report: &FitReport) -> String {
    let mut out = String::new();
    let c = &report.coefficients;
    let s = &report.stats;

    out.push_str("=== linefit ===\n");
    out.push_str(&format!(
        "Points: n={} | x=[{:.4}, {:.4}] | y=[{:.4}, {:.4}] | {}\n",
        s.n_points,
        s.x_min,
        s.x_max,
        s.y_min,
        s.y_max,
        if s.weighted { "weighted" } else { "unweighted" },
    ));
    out.push('\n');

    out.push_str(&format!("Slope: {}  Y-Intercept: {}\n", c.slope, c.intercept));
    out.push_str(&format!("r-Squared: {}\n", report.r_squared));
    out.push_str(&format!("Mean Squared Error: {}\n", report.mean_sq_error));
    out.push_str(&format!("Durbin Watson Test: {}\n", report.durbin_watson));
    out.push_str(&format!("Sigma: {}\n", report.sigma));
    out.push_str(&format!(
        "t Stat Intercept: {}  t Stat Slope: {}\n",
        report.t_statistics.intercept, report.t_statistics.slope
    ));
    match &report.variance_of_estimates {
        Some(v) => out.push_str(&format!(
            "Variance Intercept: {}  Variance Slope: {}\n",
            v.intercept, v.slope
        )),
        None => out.push_str("Variance Intercept: -  Variance Slope: -\n"),
    }
    if let Some(dev) = report.solver_deviation {
        out.push_str(&format!("SVD cross-check: max |Δcoef| = {dev:.3e}\n"));
    }

    out.push_str("\nPoints:\n");
    out.push_str(&format_points_table(report));

    if !report.forecasts.is_empty() {
        out.push_str("\nForecasts:\n");
        for f in &report.forecasts {
            out.push_str(&format!("  x={}  y={}\n", f.x, f.y));
        }
    }

    out
}

fn format_points_table(report: &FitReport) -> String {
    let mut out = String::new();
    let weighted = report.stats.weighted;

    if weighted {
        out.push_str(&format!(
            "{:>12} {:>14} {:>10} {:>16} {:>14}\n",
            "x", "y", "weight", "predicted", "residual"
        ));
    } else {
        out.push_str(&format!(
            "{:>12} {:>14} {:>16} {:>14}\n",
            "x", "y", "predicted", "residual"
        ));
    }

    for p in &report.points {
        match p.weight {
            Some(w) if weighted => out.push_str(&format!(
                "{:>12.4} {:>14.4} {:>10.4} {:>16.6} {:>14.6}\n",
                p.x, p.y, w, p.predicted, p.residual
            )),
            _ => out.push_str(&format!(
                "{:>12.4} {:>14.4} {:>16.6} {:>14.6}\n",
                p.x, p.y, p.predicted, p.residual
            )),
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::EngineOptions;
    use crate::fit::LineFit;

    fn report(weights: Option<&[f64]>) -> FitReport {
        let mut engine = LineFit::new(EngineOptions {
            validate: false,
            hush: true,
        });
        engine
            .set_data(&[0.0, 1.0, 2.0, 3.0], &[1.0, 3.5, 4.5, 7.0], weights)
            .unwrap();
        FitReport::from_engine(&engine, &[10.0]).unwrap()
    }

    #[test]
    fn summary_lists_statistics_and_forecasts() {
        let txt = format_report(&report(None));
        assert!(txt.starts_with("=== linefit ===\n"));
        assert!(txt.contains("Points: n=4"));
        assert!(txt.contains("unweighted"));
        assert!(txt.contains("r-Squared: "));
        assert!(txt.contains("Durbin Watson Test: "));
        assert!(txt.contains("Forecasts:\n  x=10  y="));
        // header + 4 rows
        let table: Vec<&str> = txt
            .split("Points:\n")
            .nth(1)
            .unwrap()
            .lines()
            .take_while(|l| !l.is_empty())
            .collect();
        assert_eq!(table.len(), 5);
    }

    #[test]
    fn weighted_summary_has_weight_column() {
        let txt = format_report(&report(Some(&[1.0, 2.0, 1.0, 0.0])));
        assert!(txt.contains("weighted"));
        assert!(txt.contains("weight"));
        assert!(txt.contains("0.0000"));
    }
}
