//! Simple exponential smoothing fallback forecaster.
//!
//! Projects the final smoothed level flat over each horizon. Useful when the
//! trend-adjusted model over-reacts to a short, noisy history.

use super::traits::{assemble_result, check_history, DemandModel};
use crate::config::ForecastConfig;
use crate::core::{ForecastOutcome, SeriesKey};
use crate::error::Result;
use crate::features::exponential_smoothing;
use crate::utils::ensure_finite;
use chrono::NaiveDate;

/// Exponential smoothing demand forecaster.
#[derive(Debug, Clone)]
pub struct SmoothingForecaster {
    alpha: f64,
    horizons: Vec<usize>,
    min_data_points: usize,
}

impl SmoothingForecaster {
    /// Create a forecaster from a validated configuration.
    pub fn new(config: ForecastConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            alpha: config.smoothing_alpha,
            horizons: config.forecast_horizons,
            min_data_points: config.min_data_points,
        })
    }

    /// Get the smoothing factor.
    pub fn alpha(&self) -> f64 {
        self.alpha
    }

    /// Smoothed level series for a history (in-sample fit).
    pub fn smoothed(&self, issued: &[f64]) -> Result<Vec<f64>> {
        ensure_finite(issued)?;
        exponential_smoothing(issued, self.alpha)
    }
}

impl DemandModel for SmoothingForecaster {
    fn forecast(
        &self,
        key: &SeriesKey,
        issued: &[f64],
        forecast_date: NaiveDate,
    ) -> Result<ForecastOutcome> {
        ensure_finite(issued)?;
        if let Some(skipped) = check_history(key, issued, self.min_data_points) {
            return Ok(skipped);
        }

        let level = exponential_smoothing(issued, self.alpha)?
            .last()
            .copied()
            .unwrap_or(0.0);

        let result = assemble_result(key, issued, forecast_date, &self.horizons, |h| level * h)?;
        Ok(ForecastOutcome::Forecast(result))
    }

    fn name(&self) -> &str {
        "ExponentialSmoothing"
    }
}
