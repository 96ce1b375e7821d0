//! Batch forecasting over many (location, item) series.
//!
//! The pipeline groups raw stock movement records, runs a demand model over
//! every group and separates forecasts from skipped groups.

use crate::config::ForecastConfig;
use crate::core::{group_records, ForecastOutcome, ForecastResult, SkippedGroup, StockMovementRecord};
use crate::detection::AnomalyReport;
use crate::error::Result;
use crate::models::{BoxedDemandModel, DemandForecaster};
use crate::seasonality::{seasonal_factors, SeasonalFactor, SeasonalForecastPoint, SeasonalForecaster};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::{debug, info, warn};

/// Forecasts and skips of one pipeline run, both ordered by series key.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ForecastRun {
    pub results: Vec<ForecastResult>,
    pub skipped: Vec<SkippedGroup>,
}

/// Aggregate figures of a run.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ForecastSummary {
    pub total_forecasts: usize,
    pub skipped_groups: usize,
    /// Mean confidence over all forecasts; `None` when nothing was forecast.
    pub avg_confidence: Option<f64>,
}

impl ForecastRun {
    pub fn summary(&self) -> ForecastSummary {
        let total_forecasts = self.results.len();
        let avg_confidence = (total_forecasts > 0).then(|| {
            self.results.iter().map(|r| r.confidence_score).sum::<f64>() / total_forecasts as f64
        });
        ForecastSummary {
            total_forecasts,
            skipped_groups: self.skipped.len(),
            avg_confidence,
        }
    }

    /// Forecast for a series, if one was produced.
    pub fn get(&self, location: &str, item: &str) -> Option<&ForecastResult> {
        self.results
            .iter()
            .find(|r| r.location == location && r.item == item)
    }
}

/// Runs demand forecasting, seasonal analysis and anomaly reporting over
/// batches of records with one configuration.
///
/// # Example
///
/// ```
/// use chrono::NaiveDate;
/// use stockpulse_forecast::config::ForecastConfig;
/// use stockpulse_forecast::core::StockMovementRecord;
/// use stockpulse_forecast::pipeline::ForecastPipeline;
///
/// let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
/// let records: Vec<_> = [10.0, 12.0, 14.0]
///     .iter()
///     .enumerate()
///     .map(|(i, &q)| {
///         let date = start + chrono::Duration::days(i as i64);
///         StockMovementRecord::new("Chennai", "ORS", date, 100.0, 0.0, q)
///     })
///     .collect();
///
/// let pipeline = ForecastPipeline::new(ForecastConfig::default()).unwrap();
/// let run = pipeline.run(&records, NaiveDate::from_ymd_opt(2024, 1, 4).unwrap()).unwrap();
/// assert_eq!(run.summary().total_forecasts, 1);
/// ```
pub struct ForecastPipeline {
    config: ForecastConfig,
    model: BoxedDemandModel,
    seasonal: SeasonalForecaster,
}

impl ForecastPipeline {
    /// Create a pipeline with the weighted-trend demand model.
    pub fn new(config: ForecastConfig) -> Result<Self> {
        let model = Box::new(DemandForecaster::new(config.clone())?);
        let seasonal = SeasonalForecaster::new(&config)?;
        Ok(Self {
            config,
            model,
            seasonal,
        })
    }

    /// Replace the demand model.
    pub fn with_model(mut self, model: BoxedDemandModel) -> Self {
        self.model = model;
        self
    }

    pub fn config(&self) -> &ForecastConfig {
        &self.config
    }

    pub fn model_name(&self) -> &str {
        self.model.name()
    }

    /// Forecast every (location, item) series in `records`.
    ///
    /// # Errors
    /// Fails on invalid records or when a series violates the date ordering
    /// contract. Series that are too short are reported in `skipped`.
    pub fn run(&self, records: &[StockMovementRecord], forecast_date: NaiveDate) -> Result<ForecastRun> {
        if records.is_empty() {
            warn!("no stock movement records to forecast");
            return Ok(ForecastRun::default());
        }

        let mut run = ForecastRun::default();
        for group in group_records(records)? {
            match self.model.forecast_group(&group, forecast_date)? {
                ForecastOutcome::Forecast(result) => run.results.push(result),
                ForecastOutcome::Skipped(skipped) => {
                    debug!(
                        series = %group.key(),
                        count = skipped.count,
                        reason = %skipped.reason,
                        "skipping series"
                    );
                    run.skipped.push(skipped);
                }
            }
        }

        let summary = run.summary();
        info!(
            model = self.model.name(),
            %forecast_date,
            forecasts = summary.total_forecasts,
            skipped = summary.skipped_groups,
            avg_confidence = summary.avg_confidence.unwrap_or(0.0),
            "forecast run complete"
        );
        Ok(run)
    }

    /// Day-of-week factors of every series.
    pub fn seasonal_factors(&self, records: &[StockMovementRecord]) -> Result<Vec<SeasonalFactor>> {
        let factors: Vec<SeasonalFactor> = group_records(records)?
            .iter()
            .flat_map(seasonal_factors)
            .collect();
        debug!(factors = factors.len(), "computed day-of-week factors");
        Ok(factors)
    }

    /// Seasonally adjusted forecasts of the `days` days after each series ends.
    pub fn seasonal_forecasts(
        &self,
        records: &[StockMovementRecord],
        days: usize,
    ) -> Result<Vec<SeasonalForecastPoint>> {
        let mut points = Vec::new();
        for group in group_records(records)? {
            points.extend(self.seasonal.forecast(&group, days)?);
        }
        info!(points = points.len(), days, "seasonal forecasts complete");
        Ok(points)
    }

    /// Anomaly report over the same batch with this pipeline's thresholds.
    pub fn anomaly_report(&self, records: &[StockMovementRecord]) -> Result<AnomalyReport> {
        AnomalyReport::generate(records, &self.config)
    }
}

impl fmt::Debug for ForecastPipeline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ForecastPipeline")
            .field("config", &self.config)
            .field("model", &self.model.name())
            .field("seasonal", &self.seasonal)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::SkipReason;
    use crate::models::SmoothingForecaster;
    use approx::assert_relative_eq;
    use chrono::Duration;

    fn start() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()
    }

    fn records(location: &str, item: &str, issued: &[f64]) -> Vec<StockMovementRecord> {
        issued
            .iter()
            .enumerate()
            .map(|(i, &q)| {
                StockMovementRecord::new(location, item, start() + Duration::days(i as i64), 500.0, 0.0, q)
            })
            .collect()
    }

    fn pipeline() -> ForecastPipeline {
        ForecastPipeline::new(ForecastConfig::default()).unwrap()
    }

    #[test]
    fn run_separates_forecasts_and_skips() {
        let mut batch = records("Chennai", "ORS", &[10.0, 12.0, 14.0, 16.0]);
        batch.extend(records("Agra", "Insulin", &[5.0, 6.0]));

        let run = pipeline().run(&batch, start() + Duration::days(10)).unwrap();

        assert_eq!(run.results.len(), 1);
        assert_eq!(run.results[0].item, "ORS");
        assert_eq!(run.skipped.len(), 1);
        assert_eq!(run.skipped[0].reason, SkipReason::InsufficientData);
        assert_eq!(run.skipped[0].count, 2);
        assert!(run.get("Chennai", "ORS").is_some());
        assert!(run.get("Agra", "Insulin").is_none());
    }

    #[test]
    fn summary_averages_confidence() {
        let mut batch = records("Chennai", "ORS", &[10.0, 10.0, 10.0]);
        batch.extend(records("Delhi", "ORS", &[10.0, 20.0, 30.0]));
        let run = pipeline().run(&batch, start()).unwrap();
        let summary = run.summary();

        assert_eq!(summary.total_forecasts, 2);
        assert_eq!(summary.skipped_groups, 0);
        let expected = (run.results[0].confidence_score + run.results[1].confidence_score) / 2.0;
        assert_relative_eq!(summary.avg_confidence.unwrap(), expected, epsilon = 1e-12);
    }

    #[test]
    fn empty_run_has_no_average() {
        let run = pipeline().run(&[], start()).unwrap();
        assert_eq!(run, ForecastRun::default());
        assert_eq!(run.summary().avg_confidence, None);
    }

    #[test]
    fn run_propagates_ordering_errors() {
        let mut batch = records("Chennai", "ORS", &[10.0, 12.0, 14.0]);
        batch.swap(0, 2);
        assert!(pipeline().run(&batch, start()).is_err());
    }

    #[test]
    fn with_model_swaps_the_forecaster() {
        let config = ForecastConfig::default();
        let smoothing = SmoothingForecaster::new(config.clone()).unwrap();
        let pipeline = ForecastPipeline::new(config).unwrap().with_model(Box::new(smoothing));
        assert_eq!(pipeline.model_name(), "ExponentialSmoothing");

        let run = pipeline.run(&records("Chennai", "ORS", &[10.0, 10.0, 10.0]), start()).unwrap();
        assert_relative_eq!(run.results[0].demand_for(7).unwrap(), 70.0, epsilon = 1e-10);
    }

    #[test]
    fn seasonal_helpers_cover_every_series() {
        let mut batch = records("Chennai", "ORS", &[10.0; 14]);
        batch.extend(records("Agra", "Insulin", &[4.0; 7]));
        let pipeline = pipeline();

        let factors = pipeline.seasonal_factors(&batch).unwrap();
        assert_eq!(factors.len(), 14);
        assert!(factors.iter().all(|f| (f.factor - 1.0).abs() < 1e-12));

        let points = pipeline.seasonal_forecasts(&batch, 3).unwrap();
        assert_eq!(points.len(), 6);
        assert_relative_eq!(points[0].forecasted_usage, 4.0, epsilon = 1e-12);
    }

    #[test]
    fn pipeline_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<ForecastPipeline>();
        assert_send_sync::<ForecastRun>();
    }
}
