//! The line-fitting engine.
//!
//! `LineFit` owns one dataset at a time. Nothing is computed when data is set:
//! the first accessor call runs the regression, and every statistic is then
//! computed at most once and cached until the next `set_data`/`set_pairs`.
//!
//! Dependency order of the cached values:
//!
//! ```text
//! sums -> fit (a, b) -> SSE -> {R², MSE, sigma, DW, t, variance, ŷ, residuals}
//! ```
//!
//! Accessors return `None` when there is no dataset or the fit failed. The
//! reason is available from `fit()` / `fit_state()`.
//!
//! The caches use `OnceCell`, so an engine can move between threads but not be
//! shared by them.

use std::cell::OnceCell;

use tracing::{debug, warn};

use crate::domain::{Coefficients, EngineOptions, Fit, TStatistics, VarianceEstimates};
use crate::error::LineFitError;
use crate::fit::{Dataset, sums};

/// Where the regression stands for the current dataset.
#[derive(Debug, Clone, PartialEq)]
pub enum FitState {
    NotAttempted,
    Failed(LineFitError),
    Succeeded(Fit),
}

#[derive(Debug, Clone, Default)]
struct Cache {
    outcome: OnceCell<Result<Fit, LineFitError>>,
    predicted_ys: OnceCell<Vec<f64>>,
    residuals: OnceCell<Vec<f64>>,
    sum_sq_errors: OnceCell<f64>,
    mean_sq_error: OnceCell<f64>,
    r_squared: OnceCell<f64>,
    sigma: OnceCell<f64>,
    durbin_watson: OnceCell<f64>,
    t_statistics: OnceCell<TStatistics>,
    variance_of_estimates: OnceCell<Option<VarianceEstimates>>,
}

/// Weighted or unweighted least-squares line fit with lazily derived statistics.
///
/// ```
/// use linefit::fit::LineFit;
///
/// let mut fit = LineFit::default();
/// fit.set_data(&[1.0, 2.0, 3.0], &[2.0, 4.0, 6.5], None).unwrap();
///
/// let c = fit.coefficients().unwrap();
/// assert!((c.slope - 2.25).abs() < 1e-12);
/// assert!(fit.forecast(10.0).is_some());
/// ```
#[derive(Debug, Clone, Default)]
pub struct LineFit {
    options: EngineOptions,
    data: Option<Dataset>,
    cache: Cache,
}

impl LineFit {
    pub fn new(options: EngineOptions) -> Self {
        Self {
            options,
            data: None,
            cache: Cache::default(),
        }
    }

    /// Set data from parallel `x`/`y` columns and optional weights.
    ///
    /// The new dataset replaces the current one only if it passes every check.
    /// On error the engine keeps its previous dataset and cached results, so
    /// accessors keep answering for the last accepted dataset (including after
    /// a rejected all-equal-x input).
    pub fn set_data(&mut self, x: &[f64], y: &[f64], weights: Option<&[f64]>) -> Result<(), LineFitError> {
        let dataset = Dataset::from_columns(x, y, weights, self.options.validate);
        self.accept(dataset)
    }

    /// Set data from `(x, y)` pairs and optional weights.
    ///
    /// Same checks and the same keep-on-error behavior as [`LineFit::set_data`].
    pub fn set_pairs(&mut self, pairs: &[(f64, f64)], weights: Option<&[f64]>) -> Result<(), LineFitError> {
        let dataset = Dataset::from_pairs(pairs, weights, self.options.validate);
        self.accept(dataset)
    }

    /// Set an already-built dataset (e.g. from CSV ingest).
    pub fn set_dataset(&mut self, dataset: Dataset) -> Result<(), LineFitError> {
        let checked = if self.options.validate {
            dataset.ensure_finite().map(|()| dataset)
        } else {
            Ok(dataset)
        };
        self.accept(checked)
    }

    fn accept(&mut self, dataset: Result<Dataset, LineFitError>) -> Result<(), LineFitError> {
        match dataset {
            Ok(dataset) => {
                self.data = Some(dataset);
                self.cache = Cache::default();
                Ok(())
            }
            Err(err) => {
                self.report(&err);
                Err(err)
            }
        }
    }

    pub fn dataset(&self) -> Option<&Dataset> {
        self.data.as_ref()
    }

    /// Run the regression if it has not run for this dataset.
    ///
    /// Returns whether a line could be fitted. Repeated calls return the
    /// memoized outcome.
    pub fn regress(&self) -> bool {
        self.fit().is_ok()
    }

    /// The fit for the current dataset, or why there is none.
    ///
    /// A missing dataset is reported on every call; a failed regression only
    /// the first time.
    pub fn fit(&self) -> Result<Fit, LineFitError> {
        let outcome = self.outcome();
        if let Err(err @ LineFitError::NoData) = &outcome {
            self.report(err);
        }
        outcome
    }

    fn outcome(&self) -> Result<Fit, LineFitError> {
        let Some(data) = &self.data else {
            return Err(LineFitError::NoData);
        };

        let outcome = self.cache.outcome.get_or_init(|| {
            let outcome = sums::solve(data);
            match &outcome {
                Ok(fit) => debug!(
                    n = fit.n,
                    weighted = data.is_weighted(),
                    intercept = fit.coefficients.intercept,
                    slope = fit.coefficients.slope,
                    "line fitted"
                ),
                Err(err) => self.report(err),
            }
            outcome
        });
        outcome.clone()
    }

    /// Fit status without triggering the regression.
    pub fn fit_state(&self) -> FitState {
        match self.cache.outcome.get() {
            None => FitState::NotAttempted,
            Some(Ok(fit)) => FitState::Succeeded(*fit),
            Some(Err(err)) => FitState::Failed(err.clone()),
        }
    }

    fn fitted(&self) -> Option<(&Dataset, Fit)> {
        let fit = self.outcome().ok()?;
        Some((self.data.as_ref()?, fit))
    }

    fn report(&self, err: &LineFitError) {
        if !self.options.hush {
            warn!(kind = ?err.kind(), "{err}");
        }
    }

    pub fn coefficients(&self) -> Option<Coefficients> {
        self.outcome().ok().map(|fit| fit.coefficients)
    }

    /// `intercept + slope * x` for each input x.
    pub fn predicted_ys(&self) -> Option<&[f64]> {
        let (data, fit) = self.fitted()?;
        let predicted = self.cache.predicted_ys.get_or_init(|| {
            data.x()
                .iter()
                .map(|&x| fit.coefficients.predict(x))
                .collect()
        });
        Some(predicted)
    }

    /// Observed minus predicted y.
    pub fn residuals(&self) -> Option<&[f64]> {
        let (data, _) = self.fitted()?;
        let predicted = self.predicted_ys()?;
        let residuals = self.cache.residuals.get_or_init(|| {
            data.y()
                .iter()
                .zip(predicted)
                .map(|(y, p)| y - p)
                .collect()
        });
        Some(residuals)
    }

    /// `Syy - Sxx·b²`, clamped at zero against rounding.
    pub fn sum_sq_errors(&self) -> Option<f64> {
        let (_, fit) = self.fitted()?;
        Some(*self.cache.sum_sq_errors.get_or_init(|| {
            let s = fit.sums;
            let sse = s.sq_dev_y - s.sq_dev_x * fit.coefficients.slope.powi(2);
            if sse < 0.0 { 0.0 } else { sse }
        }))
    }

    pub fn mean_sq_error(&self) -> Option<f64> {
        let (_, fit) = self.fitted()?;
        let sse = self.sum_sq_errors()?;
        Some(*self.cache.mean_sq_error.get_or_init(|| sse / fit.n as f64))
    }

    /// Squared correlation. Defined as 1 when y has no spread.
    pub fn r_squared(&self) -> Option<f64> {
        let (_, fit) = self.fitted()?;
        Some(*self.cache.r_squared.get_or_init(|| {
            let s = fit.sums;
            let denom = s.sq_dev_x * s.sq_dev_y;
            if denom != 0.0 { s.sq_dev_xy.powi(2) / denom } else { 1.0 }
        }))
    }

    /// Standard error of the estimate. Zero with only two points.
    pub fn sigma(&self) -> Option<f64> {
        let (_, fit) = self.fitted()?;
        let sse = self.sum_sq_errors()?;
        Some(*self.cache.sigma.get_or_init(|| {
            if fit.n > 2 {
                (sse / (fit.n - 2) as f64).sqrt()
            } else {
                0.0
            }
        }))
    }

    /// First-order autocorrelation of the residuals, in `[0, 4]`.
    ///
    /// Residual differences are unweighted; the denominator is the (weighted)
    /// SSE. Zero when the fit is exact.
    pub fn durbin_watson(&self) -> Option<f64> {
        let (data, fit) = self.fitted()?;
        let sse = self.sum_sq_errors()?;
        Some(*self.cache.durbin_watson.get_or_init(|| {
            let errors: Vec<f64> = data
                .x()
                .iter()
                .zip(data.y())
                .map(|(&x, &y)| y - fit.coefficients.predict(x))
                .collect();
            let sum_err_diff: f64 = errors.windows(2).map(|e| (e[1] - e[0]).powi(2)).sum();
            if sse > 0.0 { sum_err_diff / sse } else { 0.0 }
        }))
    }

    /// t ratios of the intercept and slope (0 where the standard error is 0).
    pub fn t_statistics(&self) -> Option<TStatistics> {
        let (_, fit) = self.fitted()?;
        let sigma = self.sigma()?;
        Some(*self.cache.t_statistics.get_or_init(|| {
            let s = fit.sums;
            let c = fit.coefficients;

            let bias_intercept = sigma * (s.sum_xx / (s.sq_dev_x * fit.n as f64)).sqrt();
            let bias_slope = sigma / s.sq_dev_x.sqrt();
            TStatistics {
                intercept: if bias_intercept != 0.0 { c.intercept / bias_intercept } else { 0.0 },
                slope: if bias_slope != 0.0 { c.slope / bias_slope } else { 0.0 },
            }
        }))
    }

    /// Variances of the intercept and slope estimates.
    ///
    /// Each point is weighted by the inverse of its squared residual. Points
    /// that lie exactly on the line are left out of the accumulation. `None`
    /// when the resulting system is singular (e.g. an exact fit).
    pub fn variance_of_estimates(&self) -> Option<VarianceEstimates> {
        let (data, _) = self.fitted()?;
        let predicted = self.predicted_ys()?;
        *self.cache.variance_of_estimates.get_or_init(|| {
            let mut s = 0.0;
            let mut sx = 0.0;
            let mut sxx = 0.0;
            for (i, (&x, &y)) in data.x().iter().zip(data.y()).enumerate() {
                let variance = (predicted[i] - y).powi(2);
                if variance == 0.0 {
                    continue;
                }
                let w = data.weights().map_or(1.0, |w| w[i]);
                s += 1.0 / variance;
                sx += w * x / variance;
                sxx += w * x * x / variance;
            }

            let denominator = s * sxx - sx * sx;
            if denominator == 0.0 {
                None
            } else {
                Some(VarianceEstimates {
                    intercept: sxx / denominator,
                    slope: s / denominator,
                })
            }
        })
    }

    /// y on the fitted line at `x` (any x, including outside the data range).
    pub fn forecast(&self, x: f64) -> Option<f64> {
        self.coefficients().map(|c| c.predict(x))
    }
}
