//! Forecast result structures.

use super::record::SeriesKey;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Projected total demand over one horizon.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HorizonForecast {
    /// Horizon length in days.
    pub days: usize,
    /// Total demand expected over the next `days` days. Never negative.
    pub demand: f64,
}

/// Demand forecast for one (location, item) pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastResult {
    pub location: String,
    pub item: String,
    /// Date the forecast was produced for.
    pub forecast_date: NaiveDate,
    /// One entry per configured horizon, in configuration order.
    pub horizons: Vec<HorizonForecast>,
    /// Stability of the history in `[0, 1]`.
    pub confidence_score: f64,
    /// Unweighted mean daily demand over the history.
    pub avg_daily_demand: f64,
    /// Least-squares slope of daily demand.
    pub trend_slope: f64,
    /// Number of observations the forecast was built from.
    pub data_points: usize,
}

impl ForecastResult {
    /// Projected demand for a horizon, if it was configured.
    pub fn demand_for(&self, days: usize) -> Option<f64> {
        self.horizons
            .iter()
            .find(|h| h.days == days)
            .map(|h| h.demand)
    }

    pub fn key(&self) -> SeriesKey {
        SeriesKey::new(self.location.as_str(), self.item.as_str())
    }
}

/// Why a series produced no forecast.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    /// Fewer observations than the configured minimum.
    InsufficientData,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::InsufficientData => write!(f, "insufficient_data"),
        }
    }
}

/// A series that was left out of a forecast run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkippedGroup {
    pub location: String,
    pub item: String,
    pub reason: SkipReason,
    /// Number of observations available.
    pub count: usize,
}

/// Outcome of forecasting a single series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum ForecastOutcome {
    Forecast(ForecastResult),
    Skipped(SkippedGroup),
}

impl ForecastOutcome {
    pub fn is_forecast(&self) -> bool {
        matches!(self, ForecastOutcome::Forecast(_))
    }

    pub fn forecast(&self) -> Option<&ForecastResult> {
        match self {
            ForecastOutcome::Forecast(result) => Some(result),
            ForecastOutcome::Skipped(_) => None,
        }
    }

    pub fn skipped(&self) -> Option<&SkippedGroup> {
        match self {
            ForecastOutcome::Forecast(_) => None,
            ForecastOutcome::Skipped(skipped) => Some(skipped),
        }
    }
}
