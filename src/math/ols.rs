//! Generic weighted least squares solver.
//!
//! The engine fits the line through closed-form sums. This module solves the
//! same problem the generic way:
//!
//! ```text
//! minimize Σ w_i (y_i - a - b·x_i)^2
//! ```
//!
//! by scaling rows of the `[1, x]` design matrix by `sqrt(w_i)` and running an
//! SVD solve. It serves as an independent check of the closed form.

use nalgebra::{DMatrix, DVector};

use crate::domain::Coefficients;
use crate::fit::Dataset;

/// Solve a least squares problem using SVD.
///
/// Returns `None` if the system is too ill-conditioned to solve robustly.
pub fn solve_least_squares(x: &DMatrix<f64>, y: &DVector<f64>) -> Option<DVector<f64>> {
    let svd = x.clone().svd(true, true);

    // Try progressively looser tolerances if strict solve fails.
    for &tol in &[1e-10, 1e-8, 1e-6] {
        if let Ok(beta) = svd.solve(y, tol) {
            if beta.iter().all(|v| v.is_finite()) {
                return Some(beta);
            }
        }
    }

    None
}

/// Fit the dataset's line through the SVD solver.
pub fn solve_line(data: &Dataset) -> Option<Coefficients> {
    let n = data.len();
    let mut design = DMatrix::zeros(n, 2);
    let mut rhs = DVector::zeros(n);

    for i in 0..n {
        let sw = data.weights().map_or(1.0, |w| w[i].sqrt());
        design[(i, 0)] = sw;
        design[(i, 1)] = sw * data.x()[i];
        rhs[i] = sw * data.y()[i];
    }

    let beta = solve_least_squares(&design, &rhs)?;
    Some(Coefficients {
        intercept: beta[0],
        slope: beta[1],
    })
}

/// Largest absolute difference between two coefficient pairs.
pub fn max_deviation(a: &Coefficients, b: &Coefficients) -> f64 {
    (a.intercept - b.intercept)
        .abs()
        .max((a.slope - b.slope).abs())
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;
    use crate::data::sample::{REFERENCE_WEIGHTS, reference_x, reference_y};
    use crate::fit::sums;

    #[test]
    fn least_squares_solves_simple_system() {
        // Fit y = 2 + 3x on x = [0,1,2]
        let x = DMatrix::from_row_slice(3, 2, &[1.0, 0.0, 1.0, 1.0, 1.0, 2.0]);
        let y = DVector::from_row_slice(&[2.0, 5.0, 8.0]);

        let beta = solve_least_squares(&x, &y).unwrap();
        assert!((beta[0] - 2.0).abs() < 1e-10);
        assert!((beta[1] - 3.0).abs() < 1e-10);
    }

    #[test]
    fn svd_agrees_with_closed_form() {
        for weights in [None, Some(&REFERENCE_WEIGHTS[..])] {
            let data = Dataset::from_columns(&reference_x(), &reference_y(), weights, false).unwrap();
            let closed = sums::solve(&data).unwrap().coefficients;
            let svd = solve_line(&data).unwrap();

            assert_relative_eq!(svd.intercept, closed.intercept, max_relative = 1e-9);
            assert_relative_eq!(svd.slope, closed.slope, max_relative = 1e-9);
            assert!(max_deviation(&svd, &closed) < 1e-6);
        }
    }
}
