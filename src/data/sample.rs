//! Built-in datasets: the 18-point reference series and seeded synthetic lines.

use rand::prelude::*;
use rand::rngs::StdRng;
use rand_distr::Normal;

use crate::error::AppError;

/// Observed y for x = 1..=18.
pub const REFERENCE_Y: [f64; 18] = [
    4039.0, 4057.0, 4052.0, 4094.0, 4104.0, 4110.0, 4154.0, 4161.0, 4186.0, 4195.0, 4229.0, 4244.0,
    4242.0, 4283.0, 4322.0, 4333.0, 4368.0, 4389.0,
];

/// Relative weights for the reference series (three points carry no weight).
pub const REFERENCE_WEIGHTS: [f64; 18] = [
    5.0, 10.0, 0.0, 5.0, 10.0, 10.0, 20.0, 5.0, 0.0, 10.0, 5.0, 5.0, 5.0, 10.0, 20.0, 0.0, 5.0, 10.0,
];

pub fn reference_x() -> Vec<f64> {
    (1..=REFERENCE_Y.len()).map(|i| i as f64).collect()
}

pub fn reference_y() -> Vec<f64> {
    REFERENCE_Y.to_vec()
}

pub fn reference_pairs() -> Vec<(f64, f64)> {
    reference_x().into_iter().zip(REFERENCE_Y).collect()
}

/// Parameters of a synthetic line `y = intercept + slope * x + N(0, noise_sd)`.
#[derive(Debug, Clone)]
pub struct SampleSpec {
    pub n: usize,
    pub x_min: f64,
    pub x_max: f64,
    pub intercept: f64,
    pub slope: f64,
    pub noise_sd: f64,
    pub seed: u64,
}

/// Generated points, sorted by x.
#[derive(Debug, Clone)]
pub struct SampleData {
    pub x: Vec<f64>,
    pub y: Vec<f64>,
}

pub fn generate_sample(spec: &SampleSpec) -> Result<SampleData, AppError> {
    if spec.n < 2 {
        return Err(AppError::new(2, "Sample count must be at least 2."));
    }
    if !(spec.x_min.is_finite() && spec.x_max.is_finite() && spec.x_max > spec.x_min) {
        return Err(AppError::new(2, "Invalid x range for sample generation."));
    }
    if !(spec.intercept.is_finite() && spec.slope.is_finite()) {
        return Err(AppError::new(2, "Line coefficients must be finite."));
    }
    if !(spec.noise_sd.is_finite() && spec.noise_sd >= 0.0) {
        return Err(AppError::new(2, "Noise standard deviation must be finite and >= 0."));
    }

    let mut rng = StdRng::seed_from_u64(spec.seed);
    let noise = Normal::new(0.0, spec.noise_sd)
        .map_err(|e| AppError::new(2, format!("Noise distribution error: {e}")))?;

    let mut x: Vec<f64> = (0..spec.n)
        .map(|_| rng.gen_range(spec.x_min..=spec.x_max))
        .collect();
    x.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

    let y = x
        .iter()
        .map(|&x| spec.intercept + spec.slope * x + noise.sample(&mut rng))
        .collect();

    Ok(SampleData { x, y })
}
