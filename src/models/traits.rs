//! Demand model trait defining the common interface for group forecasters.

use crate::core::{
    ForecastOutcome, ForecastResult, HorizonForecast, SeriesGroup, SeriesKey, SkipReason,
    SkippedGroup,
};
use crate::error::Result;
use crate::features::{confidence_score, simple_moving_average, trend_slope};
use chrono::NaiveDate;

/// Common interface for models that forecast one (location, item) series.
///
/// Implementations are pure: the same input always yields the same outcome.
/// This trait is object-safe and can be used with `Box<dyn DemandModel>`.
pub trait DemandModel {
    /// Forecast demand from an ordered sequence of daily issued quantities.
    ///
    /// Too little history is an expected outcome, reported as
    /// [`ForecastOutcome::Skipped`], not an error.
    fn forecast(
        &self,
        key: &SeriesKey,
        issued: &[f64],
        forecast_date: NaiveDate,
    ) -> Result<ForecastOutcome>;

    /// Forecast a grouped series.
    fn forecast_group(
        &self,
        group: &SeriesGroup,
        forecast_date: NaiveDate,
    ) -> Result<ForecastOutcome> {
        self.forecast(group.key(), group.issued(), forecast_date)
    }

    /// Get the model name.
    fn name(&self) -> &str;
}

/// Type alias for boxed demand model trait objects.
///
/// # Example
///
/// ```
/// use stockpulse_forecast::config::ForecastConfig;
/// use stockpulse_forecast::models::{BoxedDemandModel, DemandForecaster, DemandModel};
///
/// let model: BoxedDemandModel = Box::new(DemandForecaster::new(ForecastConfig::default()).unwrap());
/// assert_eq!(model.name(), "WeightedTrend");
/// ```
pub type BoxedDemandModel = Box<dyn DemandModel + Send + Sync>;

/// Skip outcome for a series shorter than `min_data_points`, if it is.
pub(crate) fn check_history(
    key: &SeriesKey,
    issued: &[f64],
    min_data_points: usize,
) -> Option<ForecastOutcome> {
    (issued.len() < min_data_points).then(|| {
        ForecastOutcome::Skipped(SkippedGroup {
            location: key.location.clone(),
            item: key.item.clone(),
            reason: SkipReason::InsufficientData,
            count: issued.len(),
        })
    })
}

/// Assemble a result from a per-horizon projection.
///
/// Projections are clamped at zero: demand cannot be negative.
pub(crate) fn assemble_result<F>(
    key: &SeriesKey,
    issued: &[f64],
    forecast_date: NaiveDate,
    horizons: &[usize],
    project: F,
) -> Result<ForecastResult>
where
    F: Fn(f64) -> f64,
{
    let horizons = horizons
        .iter()
        .map(|&days| HorizonForecast {
            days,
            demand: project(days as f64).max(0.0),
        })
        .collect();

    Ok(ForecastResult {
        location: key.location.clone(),
        item: key.item.clone(),
        forecast_date,
        horizons,
        confidence_score: confidence_score(issued),
        avg_daily_demand: simple_moving_average(issued)?,
        trend_slope: trend_slope(issued),
        data_points: issued.len(),
    })
}
