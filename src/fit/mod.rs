//! Straight-line least squares.
//!
//! Responsibilities:
//!
//! - accept and normalize input data (`dataset`, `validate`)
//! - compute the sums and the fit (`sums`)
//! - derive and cache the regression statistics (`linefit`)

pub mod dataset;
pub mod linefit;
pub mod sums;
pub mod validate;

pub use dataset::Dataset;
pub use linefit::{FitState, LineFit};
