//! Trend features for demand series.

/// Result of a least-squares fit of the series against its index.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearTrendResult {
    /// Slope of the fitted line (units per day)
    pub slope: f64,
    /// Intercept of the fitted line
    pub intercept: f64,
}

/// Fits y = slope * x + intercept where x is the index 0..n-1.
///
/// Fewer than two points have no defined slope; the result is a flat line
/// through the mean (or zero for an empty series).
pub fn linear_trend(series: &[f64]) -> LinearTrendResult {
    if series.len() < 2 {
        return LinearTrendResult {
            slope: 0.0,
            intercept: series.first().copied().unwrap_or(0.0),
        };
    }

    let n = series.len() as f64;
    let mean_x = (n - 1.0) / 2.0;
    let mean_y = series.iter().sum::<f64>() / n;

    let (ss_xy, ss_xx) = series
        .iter()
        .enumerate()
        .fold((0.0, 0.0), |(sxy, sxx), (i, &y)| {
            let dx = i as f64 - mean_x;
            (sxy + dx * (y - mean_y), sxx + dx * dx)
        });

    let slope = ss_xy / ss_xx;
    LinearTrendResult {
        slope,
        intercept: mean_y - slope * mean_x,
    }
}

/// Returns the ordinary-least-squares slope of the series against its index.
///
/// Returns `0.0` when the series has one point or none.
pub fn trend_slope(series: &[f64]) -> f64 {
    linear_trend(series).slope
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_linear_trend() {
        let series: Vec<f64> = (0..10).map(|i| 2.0 * i as f64 + 1.0).collect();
        let result = linear_trend(&series);
        assert_relative_eq!(result.slope, 2.0, epsilon = 1e-10);
        assert_relative_eq!(result.intercept, 1.0, epsilon = 1e-10);
    }

    #[test]
    fn trend_slope_of_short_series_is_zero() {
        assert_eq!(trend_slope(&[]), 0.0);
        assert_eq!(trend_slope(&[42.0]), 0.0);
        assert_relative_eq!(linear_trend(&[42.0]).intercept, 42.0, epsilon = 1e-10);
    }

    #[test]
    fn trend_slope_follows_direction() {
        assert!(trend_slope(&[100.0, 80.0, 60.0, 40.0, 20.0]) < 0.0);
        assert_relative_eq!(
            trend_slope(&[100.0, 80.0, 60.0, 40.0, 20.0]),
            -20.0,
            epsilon = 1e-10
        );
        assert_relative_eq!(trend_slope(&[5.0, 5.0, 5.0]), 0.0, epsilon = 1e-10);
    }

    #[test]
    fn trend_slope_of_noisy_series() {
        let issued = [
            50.0, 55.0, 52.0, 58.0, 60.0, 62.0, 59.0, 65.0, 63.0, 68.0, 70.0, 67.0, 72.0, 75.0,
        ];
        assert_relative_eq!(trend_slope(&issued), 12.0 / 7.0, epsilon = 1e-9);
    }
}
