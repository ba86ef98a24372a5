//! Closed-form least squares for a straight line.
//!
//! ```text
//! Sxx = Σx² - (Σx)²/n
//! Syy = Σy² - (Σy)²/n
//! Sxy = Σxy - ΣxΣy/n
//! b   = Sxy / Sxx
//! a   = (Σy - b·Σx) / n
//! ```
//!
//! With weights every raw sum term is multiplied by the normalized weight.

use crate::domain::{Coefficients, Fit, Sums};
use crate::error::LineFitError;
use crate::fit::Dataset;

/// Σx, Σy, Σx², Σy², Σxy.
fn raw_sums(data: &Dataset) -> [f64; 5] {
    let mut s = [0.0; 5];
    let points = data.x().iter().zip(data.y());
    match data.weights() {
        Some(w) => {
            for ((&x, &y), &w) in points.zip(w) {
                s[0] += w * x;
                s[1] += w * y;
                s[2] += w * x * x;
                s[3] += w * y * y;
                s[4] += w * x * y;
            }
        }
        None => {
            for (&x, &y) in points {
                s[0] += x;
                s[1] += y;
                s[2] += x * x;
                s[3] += y * y;
                s[4] += x * y;
            }
        }
    }
    s
}

/// Fit the line. Fails only when the (weighted) spread of x is zero.
pub fn solve(data: &Dataset) -> Result<Fit, LineFitError> {
    let [sum_x, sum_y, sum_xx, sum_yy, sum_xy] = raw_sums(data);
    let n = data.len() as f64;

    let sq_dev_x = sum_xx - sum_x * sum_x / n;
    if sq_dev_x == 0.0 {
        return Err(LineFitError::DegenerateFit);
    }
    let sq_dev_y = sum_yy - sum_y * sum_y / n;
    let sq_dev_xy = sum_xy - sum_x * sum_y / n;

    let slope = sq_dev_xy / sq_dev_x;
    let intercept = (sum_y - slope * sum_x) / n;

    Ok(Fit {
        coefficients: Coefficients { intercept, slope },
        sums: Sums {
            sum_x,
            sum_y,
            sum_xx,
            sum_yy,
            sum_xy,
            sq_dev_x,
            sq_dev_y,
            sq_dev_xy,
        },
        n: data.len(),
    })
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    #[test]
    fn exact_line_is_recovered() {
        let x = [0.0, 1.0, 2.0, 3.0];
        let y: Vec<f64> = x.iter().map(|x| 2.0 + 3.0 * x).collect();
        let data = Dataset::from_columns(&x, &y, None, false).unwrap();

        let fit = solve(&data).unwrap();
        assert_relative_eq!(fit.coefficients.intercept, 2.0, epsilon = 1e-12);
        assert_relative_eq!(fit.coefficients.slope, 3.0, epsilon = 1e-12);
        assert_relative_eq!(fit.sums.sum_x, 6.0);
        assert_relative_eq!(fit.sums.sq_dev_x, 5.0);
    }

    #[test]
    fn zero_weights_remove_points_from_the_sums() {
        let x = [0.0, 1.0, 2.0, 10.0];
        let y = [1.0, 3.0, 5.0, -100.0];
        let data = Dataset::from_columns(&x, &y, Some(&[1.0, 1.0, 1.0, 0.0]), false).unwrap();

        // The outlier carries no weight, so the remaining points lie on y = 1 + 2x.
        let fit = solve(&data).unwrap();
        assert_relative_eq!(fit.coefficients.slope, 2.0, epsilon = 1e-12);
        assert_relative_eq!(fit.coefficients.intercept, 1.0, epsilon = 1e-12);
    }

    #[test]
    fn weighted_zero_spread_is_degenerate() {
        // x differs, but only the points at x = 5 carry weight.
        let x = [1.0, 5.0, 5.0, 5.0];
        let y = [1.0, 2.0, 3.0, 4.0];
        let data = Dataset::from_columns(&x, &y, Some(&[0.0, 2.0, 1.0, 1.0]), false).unwrap();
        assert_eq!(solve(&data), Err(LineFitError::DegenerateFit));
    }
}
