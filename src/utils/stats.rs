//! Statistical utility functions.
//!
//! Degenerate inputs return `NaN` here; the public statistics in
//! [`crate::features`] decide how to map those onto neutral defaults.

use crate::error::{ForecastError, Result};

/// Arithmetic mean; `NaN` when empty.
pub fn mean(values: &[f64]) -> f64 {
    match values.len() {
        0 => f64::NAN,
        n => values.iter().sum::<f64>() / n as f64,
    }
}

/// Sum of squared deviations from the mean.
pub fn sum_squared_deviations(values: &[f64]) -> f64 {
    let m = mean(values);
    values.iter().map(|x| (x - m) * (x - m)).sum()
}

/// Sample variance (n-1 denominator); `NaN` below two values.
pub fn variance(values: &[f64]) -> f64 {
    match values.len() {
        0 | 1 => f64::NAN,
        n => sum_squared_deviations(values) / (n - 1) as f64,
    }
}

/// Sample standard deviation, as used for z-scores.
pub fn std_dev(values: &[f64]) -> f64 {
    variance(values).sqrt()
}

/// Population variance (n denominator); `NaN` when empty.
pub fn population_variance(values: &[f64]) -> f64 {
    match values.len() {
        0 => f64::NAN,
        n => sum_squared_deviations(values) / n as f64,
    }
}

/// Population standard deviation, as used for the coefficient of variation.
pub fn population_std_dev(values: &[f64]) -> f64 {
    population_variance(values).sqrt()
}

/// Reject NaN and infinite values.
pub fn ensure_finite(values: &[f64]) -> Result<()> {
    if values.iter().all(|v| v.is_finite()) {
        Ok(())
    } else {
        Err(ForecastError::MissingValues)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    const WEEK: [f64; 7] = [12.0, 15.0, 11.0, 14.0, 13.0, 20.0, 20.0];

    #[test]
    fn mean_of_week() {
        assert_relative_eq!(mean(&WEEK), 15.0, epsilon = 1e-10);
        assert_relative_eq!(mean(&[42.0]), 42.0, epsilon = 1e-10);
        assert!(mean(&[]).is_nan());
    }

    #[test]
    fn squared_deviations() {
        // deviations -3, 0, -4, -1, -2, 5, 5
        assert_relative_eq!(sum_squared_deviations(&WEEK), 80.0, epsilon = 1e-10);
    }

    #[test]
    fn sample_and_population_spread() {
        assert_relative_eq!(variance(&WEEK), 80.0 / 6.0, epsilon = 1e-10);
        assert_relative_eq!(population_variance(&WEEK), 80.0 / 7.0, epsilon = 1e-10);
        assert_relative_eq!(std_dev(&WEEK), (80.0_f64 / 6.0).sqrt(), epsilon = 1e-10);
        assert_relative_eq!(population_std_dev(&WEEK), (80.0_f64 / 7.0).sqrt(), epsilon = 1e-10);
    }

    #[test]
    fn degenerate_spread() {
        assert!(variance(&[3.0]).is_nan());
        assert!(variance(&[]).is_nan());
        assert_relative_eq!(population_variance(&[3.0]), 0.0, epsilon = 1e-10);
        assert!(population_variance(&[]).is_nan());
    }

    #[test]
    fn ensure_finite_rejects_nan_and_infinity() {
        assert!(ensure_finite(&[1.0, 2.0]).is_ok());
        assert_eq!(ensure_finite(&[1.0, f64::NAN]), Err(ForecastError::MissingValues));
        assert_eq!(ensure_finite(&[f64::INFINITY]), Err(ForecastError::MissingValues));
    }
}
