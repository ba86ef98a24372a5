//! Accepted input data for a line fit.
//!
//! A `Dataset` can only be built through the checks below, so holding one
//! means the shape and weight invariants hold:
//!
//! - at least two points, `x` and `y` of equal length
//! - x values not all identical
//! - weights (if any) non-negative, at least two nonzero, normalized so that
//!   `Σw == n`

use crate::domain::DatasetStats;
use crate::error::{Field, LineFitError};
use crate::fit::validate::ensure_finite;

#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    x: Vec<f64>,
    y: Vec<f64>,
    weights: Option<Vec<f64>>,
}

impl Dataset {
    /// Build from two parallel columns.
    ///
    /// With `validate`, non-finite entries are rejected.
    pub fn from_columns(
        x: &[f64],
        y: &[f64],
        weights: Option<&[f64]>,
        validate: bool,
    ) -> Result<Self, LineFitError> {
        if x.len() < 2 {
            return Err(LineFitError::TooFewPoints { got: x.len() });
        }
        if x.len() != y.len() {
            return Err(LineFitError::MismatchedLengths {
                x_len: x.len(),
                y_len: y.len(),
            });
        }
        Self::build(x.to_vec(), y.to_vec(), weights, validate)
    }

    /// Build from `(x, y)` pairs.
    pub fn from_pairs(
        pairs: &[(f64, f64)],
        weights: Option<&[f64]>,
        validate: bool,
    ) -> Result<Self, LineFitError> {
        if pairs.len() < 2 {
            return Err(LineFitError::TooFewPoints { got: pairs.len() });
        }
        let (x, y) = pairs.iter().copied().unzip();
        Self::build(x, y, weights, validate)
    }

    fn build(
        x: Vec<f64>,
        y: Vec<f64>,
        weights: Option<&[f64]>,
        validate: bool,
    ) -> Result<Self, LineFitError> {
        let n = x.len();
        let weights = match weights {
            Some(w) => Some(normalize_weights(w, n, validate)?),
            None => None,
        };

        if validate {
            ensure_finite(&x, Field::X)?;
            ensure_finite(&y, Field::Y)?;
        }

        if x.iter().all(|&v| v == x[0]) {
            return Err(LineFitError::DegenerateFit);
        }

        Ok(Self { x, y, weights })
    }

    /// Re-run the finiteness checks on an already-built dataset.
    pub fn ensure_finite(&self) -> Result<(), LineFitError> {
        if let Some(w) = &self.weights {
            ensure_finite(w, Field::Weight)?;
        }
        ensure_finite(&self.x, Field::X)?;
        ensure_finite(&self.y, Field::Y)
    }

    pub fn len(&self) -> usize {
        self.x.len()
    }

    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }

    pub fn x(&self) -> &[f64] {
        &self.x
    }

    pub fn y(&self) -> &[f64] {
        &self.y
    }

    /// Normalized weights, if the dataset is weighted.
    pub fn weights(&self) -> Option<&[f64]> {
        self.weights.as_deref()
    }

    pub fn is_weighted(&self) -> bool {
        self.weights.is_some()
    }

    pub fn stats(&self) -> DatasetStats {
        let (x_min, x_max) = min_max(&self.x);
        let (y_min, y_max) = min_max(&self.y);
        DatasetStats {
            n_points: self.len(),
            x_min,
            x_max,
            y_min,
            y_max,
            weighted: self.is_weighted(),
        }
    }
}

/// Check weights and scale them so they sum to `n`.
///
/// Only relative sizes matter; scaling keeps the sums comparable with the
/// unweighted case.
fn normalize_weights(weights: &[f64], n: usize, validate: bool) -> Result<Vec<f64>, LineFitError> {
    if weights.len() != n {
        return Err(LineFitError::WeightLength {
            got: weights.len(),
            expected: n,
        });
    }
    if validate {
        ensure_finite(weights, Field::Weight)?;
    }

    let mut sum = 0.0;
    let mut nonzero = 0;
    for (index, &w) in weights.iter().enumerate() {
        if w < 0.0 {
            return Err(LineFitError::NegativeWeight { index, value: w });
        }
        sum += w;
        if w != 0.0 {
            nonzero += 1;
        }
    }
    if nonzero < 2 {
        return Err(LineFitError::TooFewNonzeroWeights { nonzero });
    }

    let factor = n as f64 / sum;
    Ok(weights.iter().map(|w| w * factor).collect())
}

fn min_max(values: &[f64]) -> (f64, f64) {
    values
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| (lo.min(v), hi.max(v)))
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn weights_are_normalized_to_point_count() {
        let x = [1.0, 2.0, 3.0, 4.0];
        let y = [1.0, 3.0, 2.0, 5.0];
        let w = [1.0, 0.0, 3.0, 4.0];
        let data = Dataset::from_columns(&x, &y, Some(&w), false).unwrap();

        let normalized = data.weights().unwrap();
        assert_relative_eq!(normalized.iter().sum::<f64>(), 4.0, max_relative = 1e-12);
        // Relative influence is preserved.
        assert_relative_eq!(normalized[3] / normalized[0], 4.0, max_relative = 1e-12);
        assert_eq!(normalized[1], 0.0);
    }

    #[test]
    fn rejects_shape_violations() {
        let err = Dataset::from_columns(&[1.0], &[1.0], None, false).unwrap_err();
        assert_eq!(err, LineFitError::TooFewPoints { got: 1 });

        let err = Dataset::from_columns(&[1.0, 2.0, 3.0], &[1.0, 2.0], None, false).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InputShape);

        let err = Dataset::from_pairs(&[], None, false).unwrap_err();
        assert_eq!(err, LineFitError::TooFewPoints { got: 0 });
    }

    #[test]
    fn rejects_weight_violations() {
        let x = [1.0, 2.0, 3.0];
        let y = [2.0, 4.0, 7.0];

        let err = Dataset::from_columns(&x, &y, Some(&[1.0, 1.0]), false).unwrap_err();
        assert_eq!(err, LineFitError::WeightLength { got: 2, expected: 3 });

        let err = Dataset::from_columns(&x, &y, Some(&[1.0, -0.5, 1.0]), false).unwrap_err();
        assert_eq!(err, LineFitError::NegativeWeight { index: 1, value: -0.5 });

        let err = Dataset::from_columns(&x, &y, Some(&[0.0, 3.0, 0.0]), false).unwrap_err();
        assert_eq!(err, LineFitError::TooFewNonzeroWeights { nonzero: 1 });
        assert_eq!(err.kind(), ErrorKind::Weight);
    }

    #[test]
    fn rejects_identical_x_values() {
        let err = Dataset::from_columns(&[5.0; 4], &[1.0, 2.0, 3.0, 4.0], None, false).unwrap_err();
        assert_eq!(err, LineFitError::DegenerateFit);
    }

    #[test]
    fn validate_mode_rejects_non_finite_values() {
        let x = [1.0, 2.0, f64::NAN];
        let y = [1.0, 2.0, 3.0];
        assert!(Dataset::from_columns(&x, &y, None, false).is_ok());

        let err = Dataset::from_columns(&x, &y, None, true).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);

        let err = Dataset::from_columns(&[1.0, 2.0], &[1.0, 2.0], Some(&[1.0, f64::INFINITY]), true)
            .unwrap_err();
        match err {
            LineFitError::NotNumeric { field, index, .. } => {
                assert_eq!(field, Field::Weight);
                assert_eq!(index, 1);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn pairs_split_into_columns() {
        let data = Dataset::from_pairs(&[(1.0, 10.0), (2.0, 20.0), (4.0, 5.0)], None, false).unwrap();
        assert_eq!(data.x(), &[1.0, 2.0, 4.0]);
        assert_eq!(data.y(), &[10.0, 20.0, 5.0]);

        let stats = data.stats();
        assert_eq!(stats.n_points, 3);
        assert_eq!((stats.x_min, stats.x_max), (1.0, 4.0));
        assert_eq!((stats.y_min, stats.y_max), (5.0, 20.0));
        assert!(!stats.weighted);
    }
}
