//! Level estimates for demand series.
//!
//! Provides the simple and recency-weighted moving averages used as the
//! demand level, and the exponential smoothing used by the fallback model.

use crate::error::{ForecastError, Result};
use crate::utils::stats;

/// Returns the arithmetic mean of the whole series.
///
/// # Errors
/// `InsufficientData` when the series is empty.
pub fn simple_moving_average(series: &[f64]) -> Result<f64> {
    if series.is_empty() {
        return Err(ForecastError::InsufficientData { needed: 1, got: 0 });
    }
    Ok(stats::mean(series))
}

/// Returns the linearly weighted moving average of the series.
///
/// The earliest observation gets weight 1 and the most recent weight `n`,
/// normalized by the weight sum `n(n+1)/2`.
///
/// # Errors
/// `InsufficientData` when the series is empty.
///
/// # Example
/// ```
/// use stockpulse_forecast::features::weighted_moving_average;
///
/// // (1*10 + 2*20 + 3*30) / 6
/// let wma = weighted_moving_average(&[10.0, 20.0, 30.0]).unwrap();
/// assert!((wma - 23.333333).abs() < 1e-5);
/// ```
pub fn weighted_moving_average(series: &[f64]) -> Result<f64> {
    if series.is_empty() {
        return Err(ForecastError::InsufficientData { needed: 1, got: 0 });
    }
    let n = series.len() as f64;
    let weight_sum = n * (n + 1.0) / 2.0;
    let weighted: f64 = series
        .iter()
        .enumerate()
        .map(|(i, &x)| (i + 1) as f64 * x)
        .sum();
    Ok(weighted / weight_sum)
}

/// Returns the mean of the last `window` observations.
///
/// Uses the whole series when it is shorter than the window.
pub fn trailing_mean(series: &[f64], window: usize) -> Result<f64> {
    if window == 0 {
        return Err(ForecastError::InvalidParameter(
            "window must be positive".to_string(),
        ));
    }
    let start = series.len().saturating_sub(window);
    simple_moving_average(&series[start..])
}

/// Returns the exponentially smoothed series.
///
/// s\[0\] = x\[0\], s\[t\] = alpha * x\[t\] + (1 - alpha) * s\[t-1\]
pub fn exponential_smoothing(series: &[f64], alpha: f64) -> Result<Vec<f64>> {
    if alpha.is_nan() || alpha <= 0.0 || alpha > 1.0 {
        return Err(ForecastError::InvalidParameter(format!(
            "smoothing alpha must be in (0, 1], got {alpha}"
        )));
    }
    let Some(&first) = series.first() else {
        return Err(ForecastError::EmptyData);
    };

    let mut level = first;
    Ok(series
        .iter()
        .map(|&x| {
            level = alpha * x + (1.0 - alpha) * level;
            level
        })
        .collect())
}
