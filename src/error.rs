//! Error types.
//!
//! - `LineFitError`: typed failures of the regression engine and the input
//!   validator (recoverable at the call site).
//! - `AppError`: what the binary reports, with a process exit code.

use std::fmt;

use thiserror::Error;

/// Which input column a validation error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    X,
    Y,
    Weight,
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Field::X => "x",
            Field::Y => "y",
            Field::Weight => "weights",
        };
        f.write_str(name)
    }
}

/// Coarse reason category for a `LineFitError`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Mismatched lengths or fewer than two points.
    InputShape,
    /// Negative weights, too few nonzero weights, wrong weight count.
    Weight,
    /// A non-numeric entry in x, y or the weights.
    Validation,
    /// All x values identical, no line can be fitted.
    DegenerateFit,
    /// Regression requested before a dataset was accepted.
    NoData,
    /// The line was fitted but a statistic derived from it is not defined.
    Undefined,
}

/// Failures of the line-fitting engine.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LineFitError {
    #[error("must input more than one data point (got {got})")]
    TooFewPoints { got: usize },

    #[error("length of x and y arrays must be equal (x has {x_len}, y has {y_len})")]
    MismatchedLengths { x_len: usize, y_len: usize },

    #[error("length of weight array must equal length of data array ({got} weights, {expected} points)")]
    WeightLength { got: usize, expected: usize },

    #[error("weights must be non-negative numbers (weights[{index}] = {value})")]
    NegativeWeight { index: usize, value: f64 },

    #[error("at least two weights must be nonzero (got {nonzero})")]
    TooFewNonzeroWeights { nonzero: usize },

    #[error("input {field}[{index}] is not a number: {value}")]
    NotNumeric {
        field: Field,
        index: usize,
        value: String,
    },

    #[error("can't fit line when x values are all equal")]
    DegenerateFit,

    #[error("no valid data input - can't do regression")]
    NoData,

    #[error("{statistic} is undefined for this fit")]
    Undefined { statistic: &'static str },
}

impl LineFitError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            LineFitError::TooFewPoints { .. } | LineFitError::MismatchedLengths { .. } => {
                ErrorKind::InputShape
            }
            LineFitError::WeightLength { .. }
            | LineFitError::NegativeWeight { .. }
            | LineFitError::TooFewNonzeroWeights { .. } => ErrorKind::Weight,
            LineFitError::NotNumeric { .. } => ErrorKind::Validation,
            LineFitError::DegenerateFit => ErrorKind::DegenerateFit,
            LineFitError::NoData => ErrorKind::NoData,
            LineFitError::Undefined { .. } => ErrorKind::Undefined,
        }
    }
}

#[derive(Clone)]
pub struct AppError {
    exit_code: u8,
    message: String,
}

impl AppError {
    pub fn new(exit_code: u8, message: impl Into<String>) -> Self {
        Self {
            exit_code,
            message: message.into(),
        }
    }

    pub fn exit_code(&self) -> u8 {
        self.exit_code
    }
}

impl From<LineFitError> for AppError {
    fn from(err: LineFitError) -> Self {
        let exit_code = match err.kind() {
            ErrorKind::DegenerateFit | ErrorKind::NoData | ErrorKind::Undefined => 4,
            ErrorKind::InputShape | ErrorKind::Weight | ErrorKind::Validation => 3,
        };
        AppError::new(exit_code, err.to_string())
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl fmt::Debug for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppError")
            .field("exit_code", &self.exit_code)
            .field("message", &self.message)
            .finish()
    }
}

impl std::error::Error for AppError {}
