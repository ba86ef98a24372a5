//! Command-line parsing for the `linefit` binary.
//!
//! The goal of this module is to keep **argument parsing** and **command dispatch**
//! separate from the fitting code.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "linefit", version, about = "Least-squares line fitting with regression diagnostics")]
pub struct Cli {
    #[command(flatten)]
    pub engine: EngineArgs,

    #[command(subcommand)]
    pub command: Command,
}

/// Engine switches. Each one can also be enabled through the environment
/// (`LINEFIT_VALIDATE`, `LINEFIT_HUSH`).
#[derive(Debug, Args, Clone)]
pub struct EngineArgs {
    /// Reject non-numeric input values instead of skipping them.
    #[arg(long, global = true)]
    pub validate: bool,

    /// Suppress diagnostic messages from the engine.
    #[arg(long, global = true)]
    pub hush: bool,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Fit the built-in 18-point reference series.
    Demo(DemoArgs),
    /// Fit x/y (and optional weight) columns from a CSV file.
    Fit(FitArgs),
    /// Generate a noisy synthetic line, then write it out or fit it.
    Synth(SynthArgs),
}

/// Output options shared by every subcommand that fits.
#[derive(Debug, Args, Clone)]
pub struct OutputArgs {
    /// Forecast y at this x (repeatable).
    #[arg(long = "forecast", value_name = "X", allow_negative_numbers = true)]
    pub forecast: Vec<f64>,

    /// Render an ASCII plot of the points and the fitted line.
    #[arg(long)]
    pub plot: bool,

    /// Plot width (columns).
    #[arg(long, default_value_t = 72)]
    pub width: usize,

    /// Plot height (rows).
    #[arg(long, default_value_t = 20)]
    pub height: usize,

    /// Re-solve through SVD and report the coefficient deviation.
    #[arg(long)]
    pub verify: bool,

    /// Write the full report as JSON.
    #[arg(long, value_name = "JSON")]
    pub json: Option<PathBuf>,

    /// Write per-point predicted values and residuals as CSV.
    #[arg(long, value_name = "CSV")]
    pub export: Option<PathBuf>,
}

#[derive(Debug, Args, Clone)]
pub struct DemoArgs {
    /// Use the reference weights.
    #[arg(long)]
    pub weighted: bool,

    #[command(flatten)]
    pub output: OutputArgs,
}

#[derive(Debug, Args, Clone)]
pub struct FitArgs {
    /// Input CSV with a header row.
    #[arg(long, value_name = "CSV")]
    pub csv: PathBuf,

    /// Header of the x column.
    #[arg(long, default_value = "x")]
    pub x_col: String,

    /// Header of the y column.
    #[arg(long, default_value = "y")]
    pub y_col: String,

    /// Header of the weight column (unweighted fit if omitted).
    #[arg(long)]
    pub weight_col: Option<String>,

    #[command(flatten)]
    pub output: OutputArgs,
}

#[derive(Debug, Args, Clone)]
pub struct SynthArgs {
    /// Number of points.
    #[arg(short = 'n', long, default_value_t = 50)]
    pub count: usize,

    #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
    pub x_min: f64,

    #[arg(long, default_value_t = 100.0, allow_negative_numbers = true)]
    pub x_max: f64,

    #[arg(long, default_value_t = 10.0, allow_negative_numbers = true)]
    pub intercept: f64,

    #[arg(long, default_value_t = 2.0, allow_negative_numbers = true)]
    pub slope: f64,

    /// Standard deviation of the Gaussian noise on y.
    #[arg(long, default_value_t = 5.0)]
    pub noise: f64,

    /// Random seed.
    #[arg(long, default_value_t = 42)]
    pub seed: u64,

    /// Write the sample as `x,y` CSV instead of fitting it.
    #[arg(long, value_name = "CSV")]
    pub out: Option<PathBuf>,

    #[command(flatten)]
    pub output: OutputArgs,
}
