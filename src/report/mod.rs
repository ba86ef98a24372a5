//! Reporting: every statistic of one fit gathered in a single value.
//!
//! Statistics are requested in bulk here, so a failed fit must not abort the
//! whole report: the fit reason becomes an error, while individually undefined
//! statistics (e.g. a singular variance system) stay `None`.

use serde::Serialize;

use crate::domain::{Coefficients, DatasetStats, TStatistics, VarianceEstimates};
use crate::error::LineFitError;
use crate::fit::LineFit;

pub mod format;

pub use format::*;

/// One forecast request and its answer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Forecast {
    pub x: f64,
    pub y: f64,
}

/// Per-point fitted values.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PointFit {
    pub x: f64,
    pub y: f64,
    pub weight: Option<f64>,
    pub predicted: f64,
    pub residual: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct FitReport {
    pub stats: DatasetStats,
    pub coefficients: Coefficients,
    pub r_squared: f64,
    pub sum_sq_errors: f64,
    pub mean_sq_error: f64,
    pub sigma: f64,
    pub durbin_watson: f64,
    pub t_statistics: TStatistics,
    pub variance_of_estimates: Option<VarianceEstimates>,
    pub forecasts: Vec<Forecast>,
    pub points: Vec<PointFit>,
    /// Coefficient deviation between the closed form and the SVD solve.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub solver_deviation: Option<f64>,
}

impl FitReport {
    /// Collect all statistics from an engine, fitting it if needed.
    pub fn from_engine(engine: &LineFit, forecast_xs: &[f64]) -> Result<Self, LineFitError> {
        let fit = engine.fit()?;
        let data = engine.dataset().ok_or(LineFitError::NoData)?;

        let predicted = defined(engine.predicted_ys(), "predicted ys")?;
        let residuals = defined(engine.residuals(), "residuals")?;

        let points = (0..data.len())
            .map(|i| PointFit {
                x: data.x()[i],
                y: data.y()[i],
                weight: data.weights().map(|w| w[i]),
                predicted: predicted[i],
                residual: residuals[i],
            })
            .collect();

        let forecasts = forecast_xs
            .iter()
            .map(|&x| Forecast {
                x,
                y: fit.coefficients.predict(x),
            })
            .collect();

        Ok(Self {
            stats: data.stats(),
            coefficients: fit.coefficients,
            r_squared: defined(engine.r_squared(), "r-squared")?,
            sum_sq_errors: defined(engine.sum_sq_errors(), "sum of squared errors")?,
            mean_sq_error: defined(engine.mean_sq_error(), "mean squared error")?,
            sigma: defined(engine.sigma(), "sigma")?,
            durbin_watson: defined(engine.durbin_watson(), "Durbin-Watson")?,
            t_statistics: defined(engine.t_statistics(), "t statistics")?,
            variance_of_estimates: engine.variance_of_estimates(),
            forecasts,
            points,
            solver_deviation: None,
        })
    }
}

fn defined<T>(value: Option<T>, statistic: &'static str) -> Result<T, LineFitError> {
    value.ok_or(LineFitError::Undefined { statistic })
}
