//! Shared domain types.
//!
//! These types are intentionally kept lightweight and serializable so they can be:
//!
//! - returned from the engine accessors by value
//! - gathered into reports and exported to JSON
//! - compared in tests without reaching into engine internals

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Engine construction options.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineOptions {
    /// Reject datasets containing non-finite x, y or weight entries.
    pub validate: bool,
    /// Suppress advisory diagnostics. Never changes a return value.
    pub hush: bool,
}

impl EngineOptions {
    pub const ENV_VALIDATE: &'static str = "LINEFIT_VALIDATE";
    pub const ENV_HUSH: &'static str = "LINEFIT_HUSH";

    /// Read options from the environment (and `.env`, if present).
    ///
    /// Unset or unrecognized values leave the default (`false`) in place.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();
        Self {
            validate: env_flag(Self::ENV_VALIDATE),
            hush: env_flag(Self::ENV_HUSH),
        }
    }
}

fn env_flag(name: &str) -> bool {
    std::env::var(name).map(|v| parse_flag(&v)).unwrap_or(false)
}

fn parse_flag(raw: &str) -> bool {
    matches!(
        raw.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}

/// Fitted line `y = intercept + slope * x`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coefficients {
    pub intercept: f64,
    pub slope: f64,
}

impl Coefficients {
    pub fn predict(&self, x: f64) -> f64 {
        self.intercept + self.slope * x
    }
}

/// Raw and central sums the fit and every statistic are derived from.
///
/// With weights, every raw sum term is multiplied by the normalized weight.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Sums {
    pub sum_x: f64,
    pub sum_y: f64,
    pub sum_xx: f64,
    pub sum_yy: f64,
    pub sum_xy: f64,
    /// `Σx² - (Σx)²/n`
    pub sq_dev_x: f64,
    /// `Σy² - (Σy)²/n`
    pub sq_dev_y: f64,
    /// `Σxy - ΣxΣy/n`
    pub sq_dev_xy: f64,
}

/// A successful fit: coefficients plus the sums they came from.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Fit {
    pub coefficients: Coefficients,
    pub sums: Sums,
    pub n: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TStatistics {
    pub intercept: f64,
    pub slope: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VarianceEstimates {
    pub intercept: f64,
    pub slope: f64,
}

/// Summary stats about the points actually fitted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatasetStats {
    pub n_points: usize,
    pub x_min: f64,
    pub x_max: f64,
    pub y_min: f64,
    pub y_max: f64,
    pub weighted: bool,
}

/// A full run's configuration as understood by the pipeline.
///
/// This is derived from the output flags of a subcommand.
#[derive(Debug, Clone)]
pub struct FitConfig {
    pub forecast_xs: Vec<f64>,
    pub plot: bool,
    pub plot_width: usize,
    pub plot_height: usize,
    /// Re-solve the fit through the generic SVD solver and report the deviation.
    pub verify: bool,
    pub export_json: Option<PathBuf>,
    pub export_points: Option<PathBuf>,
}

impl Default for FitConfig {
    fn default() -> Self {
        Self {
            forecast_xs: Vec::new(),
            plot: false,
            plot_width: 72,
            plot_height: 20,
            verify: false,
            export_json: None,
            export_points: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_accept_common_spellings() {
        for raw in ["1", "true", "TRUE", " yes ", "on"] {
            assert!(parse_flag(raw), "{raw}");
        }
        for raw in ["0", "false", "", "maybe"] {
            assert!(!parse_flag(raw), "{raw}");
        }
    }

    #[test]
    fn coefficients_predict_on_the_line() {
        let c = Coefficients {
            intercept: 2.0,
            slope: 3.0,
        };
        assert_eq!(c.predict(0.0), 2.0);
        assert_eq!(c.predict(-1.0), -1.0);
    }
}
