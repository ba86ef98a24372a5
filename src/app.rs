//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - parses CLI arguments
//! - resolves engine options (a flag or its environment variable switches each one on)
//! - loads data (reference series, CSV, or synthetic sample)
//! - runs the fit and prints/exports the report

use clap::Parser;
use tracing::{info, warn};

use crate::cli::{Cli, Command, DemoArgs, EngineArgs, FitArgs, OutputArgs, SynthArgs};
use crate::data::sample::{REFERENCE_WEIGHTS, SampleSpec, generate_sample, reference_x, reference_y};
use crate::domain::{EngineOptions, FitConfig};
use crate::error::AppError;
use crate::fit::LineFit;
use crate::io::ingest::{CsvColumns, load_csv};

pub mod pipeline;

/// Entry point for the `linefit` binary.
pub fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let engine = engine_options(&cli.engine, EngineOptions::from_env());

    match cli.command {
        Command::Demo(args) => handle_demo(args, engine),
        Command::Fit(args) => handle_fit(args, engine),
        Command::Synth(args) => handle_synth(args, engine),
    }
}

/// An option is on when its flag is given or its environment variable is set.
fn engine_options(args: &EngineArgs, env: EngineOptions) -> EngineOptions {
    EngineOptions {
        validate: args.validate || env.validate,
        hush: args.hush || env.hush,
    }
}

fn handle_demo(args: DemoArgs, engine: EngineOptions) -> Result<(), AppError> {
    let mut config = fit_config_from_args(&args.output);
    if config.forecast_xs.is_empty() {
        config.forecast_xs.push(24.0);
    }

    let mut linefit = LineFit::new(engine);
    let weights = args.weighted.then_some(&REFERENCE_WEIGHTS[..]);
    linefit.set_data(&reference_x(), &reference_y(), weights)?;

    let report = pipeline::run_fit(&linefit, &config)?;
    pipeline::emit(&report, &config)
}

fn handle_fit(args: FitArgs, engine: EngineOptions) -> Result<(), AppError> {
    let config = fit_config_from_args(&args.output);
    let columns = CsvColumns {
        x: args.x_col.clone(),
        y: args.y_col.clone(),
        weight: args.weight_col.clone(),
    };

    let ingest = load_csv(&args.csv, &columns, engine.validate)?;
    if !engine.hush {
        for e in &ingest.row_errors {
            warn!(line = e.line, "skipped row: {}", e.message);
        }
    }
    info!(
        rows_read = ingest.rows_read,
        rows_used = ingest.rows_used,
        "loaded {}",
        args.csv.display()
    );

    let mut linefit = LineFit::new(engine);
    linefit.set_dataset(ingest.dataset)?;

    let report = pipeline::run_fit(&linefit, &config)?;
    pipeline::emit(&report, &config)
}

fn handle_synth(args: SynthArgs, engine: EngineOptions) -> Result<(), AppError> {
    let sample = generate_sample(&SampleSpec {
        n: args.count,
        x_min: args.x_min,
        x_max: args.x_max,
        intercept: args.intercept,
        slope: args.slope,
        noise_sd: args.noise,
        seed: args.seed,
    })?;

    if let Some(path) = &args.out {
        crate::io::export::write_xy_csv(path, &sample.x, &sample.y)?;
        println!("Wrote {} points to {}", sample.x.len(), path.display());
        return Ok(());
    }

    let config = fit_config_from_args(&args.output);
    let mut linefit = LineFit::new(engine);
    linefit.set_data(&sample.x, &sample.y, None)?;

    let report = pipeline::run_fit(&linefit, &config)?;
    pipeline::emit(&report, &config)
}

pub fn fit_config_from_args(args: &OutputArgs) -> FitConfig {
    FitConfig {
        forecast_xs: args.forecast.clone(),
        plot: args.plot,
        plot_width: args.width,
        plot_height: args.height,
        verify: args.verify,
        export_json: args.json.clone(),
        export_points: args.export.clone(),
    }
}
