//! Weighted-average-plus-trend demand forecaster.
//!
//! The daily demand level is the linearly weighted moving average of the
//! history, adjusted by its least-squares slope. Total demand over `h` days
//! is projected as `max(0, wma * h + slope * h)`.

use super::traits::{assemble_result, check_history, DemandModel};
use crate::config::ForecastConfig;
use crate::core::{ForecastOutcome, SeriesKey};
use crate::error::Result;
use crate::features::{trend_slope, weighted_moving_average};
use crate::utils::ensure_finite;
use chrono::NaiveDate;

/// Demand forecaster using a weighted moving average with trend adjustment.
#[derive(Debug, Clone)]
pub struct DemandForecaster {
    horizons: Vec<usize>,
    min_data_points: usize,
}

impl DemandForecaster {
    /// Create a forecaster from a validated configuration.
    pub fn new(config: ForecastConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            horizons: config.forecast_horizons,
            min_data_points: config.min_data_points,
        })
    }

    /// Get the configured horizons.
    pub fn horizons(&self) -> &[usize] {
        &self.horizons
    }

    /// Get the minimum history length.
    pub fn min_data_points(&self) -> usize {
        self.min_data_points
    }
}

impl DemandModel for DemandForecaster {
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

        let wma = weighted_moving_average(issued)?;
        let slope = trend_slope(issued);

        let result = assemble_result(key, issued, forecast_date, &self.horizons, |h| {
            wma * h + slope * h
        })?;
        Ok(ForecastOutcome::Forecast(result))
    }

    fn name(&self) -> &str {
        "WeightedTrend"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ForecastError;
    use approx::assert_relative_eq;

    fn key() -> SeriesKey {
        SeriesKey::new("Chennai", "Paracetamol")
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, 15).unwrap()
    }

    fn forecaster() -> DemandForecaster {
        DemandForecaster::new(ForecastConfig::default()).unwrap()
    }

    #[test]
    fn new_rejects_invalid_config() {
        let config = ForecastConfig::new().with_horizons(vec![]);
        assert!(matches!(
            DemandForecaster::new(config),
            Err(ForecastError::InvalidParameter(_))
        ));
    }

    #[test]
    fn forecast_projects_weighted_level_and_trend() {
        let issued = [10.0, 20.0, 30.0];
        let outcome = forecaster().forecast(&key(), &issued, today()).unwrap();
        let result = outcome.forecast().unwrap();

        let wma = 140.0 / 6.0;
        let slope = 10.0;
        assert_relative_eq!(result.demand_for(7).unwrap(), wma * 7.0 + slope * 7.0, epsilon = 1e-9);
        assert_relative_eq!(
            result.demand_for(14).unwrap(),
            wma * 14.0 + slope * 14.0,
            epsilon = 1e-9
        );
        assert_relative_eq!(result.avg_daily_demand, 20.0, epsilon = 1e-10);
        assert_relative_eq!(result.trend_slope, 10.0, epsilon = 1e-10);
        assert_eq!(result.data_points, 3);
        assert_eq!(result.forecast_date, today());
        assert_eq!(result.location, "Chennai");
    }

    #[test]
    fn forecast_skips_short_history() {
        let outcome = forecaster().forecast(&key(), &[5.0, 6.0], today()).unwrap();
        let skipped = outcome.skipped().unwrap();
        assert_eq!(skipped.count, 2);
        assert_eq!(skipped.item, "Paracetamol");

        let outcome = forecaster()
            .forecast(&key(), &[5.0, 6.0, 7.0], today())
            .unwrap();
        assert!(outcome.is_forecast());
    }

    #[test]
    fn forecast_clamps_declining_demand_at_zero() {
        // wma = 280/15, slope = -26: the unclamped projection is negative
        let issued = [100.0, 60.0, 20.0, 0.0, 0.0];
        let outcome = forecaster().forecast(&key(), &issued, today()).unwrap();
        let result = outcome.forecast().unwrap();
        assert_eq!(result.demand_for(7), Some(0.0));
        assert_eq!(result.demand_for(14), Some(0.0));
        assert!(result.trend_slope < 0.0);
    }

    #[test]
    fn forecast_of_flat_series() {
        let outcome = forecaster()
            .forecast(&key(), &[8.0, 8.0, 8.0, 8.0], today())
            .unwrap();
        let result = outcome.forecast().unwrap();
        assert_relative_eq!(result.demand_for(7).unwrap(), 56.0, epsilon = 1e-10);
        assert_relative_eq!(result.confidence_score, 1.0, epsilon = 1e-10);
    }

    #[test]
    fn forecast_of_zero_demand_has_no_confidence() {
        let outcome = forecaster()
            .forecast(&key(), &[0.0, 0.0, 0.0], today())
            .unwrap();
        let result = outcome.forecast().unwrap();
        assert_eq!(result.demand_for(7), Some(0.0));
        assert_eq!(result.confidence_score, 0.0);
    }

    #[test]
    fn forecast_rejects_non_finite_values() {
        assert_eq!(
            forecaster().forecast(&key(), &[1.0, f64::NAN, 2.0], today()),
            Err(ForecastError::MissingValues)
        );
    }

    #[test]
    fn forecast_is_deterministic() {
        let issued = [12.0, 15.0, 11.0, 19.0, 14.0, 16.0];
        let model = forecaster();
        let a = model.forecast(&key(), &issued, today()).unwrap();
        let b = model.forecast(&key(), &issued, today()).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn horizons_follow_config_order() {
        let model =
            DemandForecaster::new(ForecastConfig::new().with_horizons(vec![30, 1])).unwrap();
        let outcome = model.forecast(&key(), &[1.0, 1.0, 1.0], today()).unwrap();
        let days: Vec<usize> = outcome
            .forecast()
            .unwrap()
            .horizons
            .iter()
            .map(|h| h.days)
            .collect();
        assert_eq!(days, vec![30, 1]);
        assert_eq!(model.horizons(), &[30, 1]);
        assert_eq!(model.min_data_points(), 3);
    }
}
