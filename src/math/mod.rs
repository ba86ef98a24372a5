//! Mathematical utilities: generic weighted least squares.

pub mod ols;

pub use ols::*;
