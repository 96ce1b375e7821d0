//! Day-of-week seasonality.

use super::{bucket_means, normalize};
use crate::config::ForecastConfig;
use crate::core::SeriesGroup;
use crate::error::{ForecastError, Result};
use crate::features::trailing_mean;
use crate::utils::stats;
use chrono::{Datelike, Days, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

const WEEKDAYS: [Weekday; 7] = [
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
    Weekday::Sun,
];

/// Multiplicative demand factors indexed by weekday (Monday = 0).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct DayOfWeekFactors {
    factors: [Option<f64>; 7],
}

impl DayOfWeekFactors {
    /// Factor for a weekday; `1.0` when the weekday had no history.
    pub fn factor(&self, weekday: Weekday) -> f64 {
        self.get(weekday).unwrap_or(1.0)
    }

    /// Factor for a weekday, if the weekday had history.
    pub fn get(&self, weekday: Weekday) -> Option<f64> {
        self.factors[weekday.num_days_from_monday() as usize]
    }

    /// Weekdays with history and their factors, Monday first.
    pub fn iter(&self) -> impl Iterator<Item = (Weekday, f64)> + '_ {
        WEEKDAYS
            .iter()
            .zip(self.factors.iter())
            .filter_map(|(&day, f)| f.map(|f| (day, f)))
    }

    /// Number of weekdays with history.
    pub fn len(&self) -> usize {
        self.factors.iter().flatten().count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Compute day-of-week factors from dated values.
///
/// factor(d) = mean(values on weekday d) / mean(all values). When the overall
/// mean is zero every observed weekday gets the neutral factor `1.0`.
///
/// # Example
/// ```
/// use chrono::{Duration, NaiveDate, Weekday};
/// use stockpulse_forecast::seasonality::compute_day_of_week_factors;
///
/// let monday = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
/// let history: Vec<_> = (0..14)
///     .map(|i| (monday + Duration::days(i), if i % 7 == 0 { 20.0 } else { 10.0 }))
///     .collect();
///
/// let factors = compute_day_of_week_factors(&history);
/// assert!(factors.factor(Weekday::Mon) > 1.5);
/// assert!(factors.factor(Weekday::Tue) < 1.0);
/// ```
pub fn compute_day_of_week_factors(dated: &[(NaiveDate, f64)]) -> DayOfWeekFactors {
    let (means, overall) =
        bucket_means::<7, _>(dated, |d| d.weekday().num_days_from_monday() as usize);
    DayOfWeekFactors {
        factors: normalize(means, overall),
    }
}

/// Scale a base daily forecast by the weekday factor of each target date.
///
/// Weekdays without history use the neutral factor `1.0`.
pub fn apply_seasonal_forecast(
    base_forecast: f64,
    factors: &DayOfWeekFactors,
    target_dates: &[NaiveDate],
) -> Vec<(NaiveDate, f64)> {
    target_dates
        .iter()
        .map(|&date| (date, base_forecast * factors.factor(date.weekday())))
        .collect()
}

/// Seasonal factor of one weekday for one series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeasonalFactor {
    pub location: String,
    pub item: String,
    pub weekday: Weekday,
    pub factor: f64,
}

/// Day-of-week factors of a series, one per weekday with history.
pub fn seasonal_factors(group: &SeriesGroup) -> Vec<SeasonalFactor> {
    compute_day_of_week_factors(&group.dated_issued())
        .iter()
        .map(|(weekday, factor)| SeasonalFactor {
            location: group.location().to_string(),
            item: group.item().to_string(),
            weekday,
            factor,
        })
        .collect()
}

/// Weekday or weekend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DayType {
    Weekday,
    Weekend,
}

impl From<Weekday> for DayType {
    fn from(day: Weekday) -> Self {
        match day {
            Weekday::Sat | Weekday::Sun => DayType::Weekend,
            _ => DayType::Weekday,
        }
    }
}

/// Usage statistics for one weekday of one series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeekdayProfile {
    pub location: String,
    pub item: String,
    pub weekday: Weekday,
    pub day_type: DayType,
    pub avg_usage: f64,
    /// Sample standard deviation; `None` with a single observation.
    pub stddev_usage: Option<f64>,
    pub data_points: usize,
}

/// Usage statistics per weekday of a series, Monday first.
pub fn weekly_profile(group: &SeriesGroup) -> Vec<WeekdayProfile> {
    let mut buckets: [Vec<f64>; 7] = Default::default();
    for (date, issued) in group.dated_issued() {
        buckets[date.weekday().num_days_from_monday() as usize].push(issued);
    }

    WEEKDAYS
        .iter()
        .zip(buckets.iter())
        .filter(|(_, values)| !values.is_empty())
        .map(|(&weekday, values)| {
            let sd = stats::std_dev(values);
            WeekdayProfile {
                location: group.location().to_string(),
                item: group.item().to_string(),
                weekday,
                day_type: weekday.into(),
                avg_usage: stats::mean(values),
                stddev_usage: (!sd.is_nan()).then_some(sd),
                data_points: values.len(),
            }
        })
        .collect()
}

/// One day of a seasonally adjusted forecast.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeasonalForecastPoint {
    pub location: String,
    pub item: String,
    pub forecast_date: NaiveDate,
    pub forecasted_usage: f64,
    pub seasonal_factor: f64,
    pub base_forecast: f64,
}

/// Day-by-day forecaster that scales a recent-average base by weekday factors.
#[derive(Debug, Clone)]
pub struct SeasonalForecaster {
    base_window: usize,
}

impl SeasonalForecaster {
    pub fn new(config: &ForecastConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            base_window: config.seasonal_base_window,
        })
    }

    /// Get the number of trailing observations averaged into the base.
    pub fn base_window(&self) -> usize {
        self.base_window
    }

    /// Forecast the `days` calendar days after the series' last observation.
    ///
    /// # Errors
    /// `EmptyData` when the series has no observations, `InvalidParameter`
    /// when the horizon runs past the last representable date.
    pub fn forecast(&self, group: &SeriesGroup, days: usize) -> Result<Vec<SeasonalForecastPoint>> {
        let last_date = group.last_date().ok_or(ForecastError::EmptyData)?;
        if last_date.checked_add_days(Days::new(days as u64)).is_none() {
            return Err(ForecastError::InvalidParameter(format!(
                "{days} days after {last_date} is outside the supported date range"
            )));
        }
        let base = trailing_mean(group.issued(), self.base_window)?;
        let factors = compute_day_of_week_factors(&group.dated_issued());

        let targets: Vec<NaiveDate> = last_date.iter_days().skip(1).take(days).collect();

        Ok(apply_seasonal_forecast(base, &factors, &targets)
            .into_iter()
            .map(|(forecast_date, forecasted_usage)| SeasonalForecastPoint {
                location: group.location().to_string(),
                item: group.item().to_string(),
                forecast_date,
                forecasted_usage,
                seasonal_factor: factors.factor(forecast_date.weekday()),
                base_forecast: base,
            })
            .collect())
    }
}
