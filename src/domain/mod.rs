//! Domain types used throughout the crate.
//!
//! This module defines:
//!
//! - engine configuration (`EngineOptions`) and the run configuration (`FitConfig`)
//! - fit outputs (`Fit`, `Coefficients`, `Sums`, `TStatistics`, `VarianceEstimates`)
//! - dataset summaries (`DatasetStats`)

pub mod types;

pub use types::*;
