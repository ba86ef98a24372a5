//! `linefit` library crate.
//!
//! Weighted or unweighted least-squares fitting of `y = a + b·x`, with the
//! usual regression diagnostics (R², MSE, sigma, Durbin–Watson, t statistics,
//! variance of the estimates) computed lazily from one set of cached sums.
//!
//! The binary (`linefit`) is a thin wrapper around this library so that:
//!
//! - the engine (`fit::LineFit`) is usable and testable on its own
//! - CSV ingest, reports and plots stay out of the numerical code

pub mod app;
pub mod cli;
pub mod data;
pub mod domain;
pub mod error;
pub mod fit;
pub mod io;
pub mod math;
pub mod plot;
pub mod report;

pub use domain::{Coefficients, EngineOptions, TStatistics, VarianceEstimates};
pub use error::{ErrorKind, LineFitError};
pub use fit::{Dataset, FitState, LineFit};
