//! Dispersion features: variation, confidence and z-scores.

use crate::utils::stats::{mean, population_std_dev, std_dev};

/// Returns the coefficient of variation (population std / mean).
///
/// A non-positive (or undefined) mean yields `1.0`, i.e. the series is
/// treated as maximally unpredictable.
pub fn coefficient_of_variation(series: &[f64]) -> f64 {
    let m = mean(series);
    if m.is_nan() || m <= 0.0 {
        return 1.0;
    }
    population_std_dev(series) / m
}

/// Returns how stable the series is, in `[0, 1]`.
///
/// Computed as `1 - cv`, clamped. Higher means more predictable demand.
pub fn confidence_score(series: &[f64]) -> f64 {
    (1.0 - coefficient_of_variation(series)).clamp(0.0, 1.0)
}

/// Returns the absolute z-score of every element.
///
/// Uses the sample standard deviation. Series with fewer than two points or
/// no variance score all zeros.
pub fn z_scores(series: &[f64]) -> Vec<f64> {
    let sd = std_dev(series);
    if sd.is_nan() || sd <= 0.0 {
        return vec![0.0; series.len()];
    }
    let m = mean(series);
    series.iter().map(|x| (x - m).abs() / sd).collect()
}
