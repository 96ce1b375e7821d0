//! Calendar seasonality for daily demand.
//!
//! This module provides multiplicative seasonal factors and the forecasts
//! built from them:
//! - Weekly: day-of-week factors, weekday profiles, seasonal forecasts
//! - Monthly: month-of-year factors and a seasonality strength rating
//!
//! A factor is the mean of a calendar bucket divided by the overall mean,
//! so values above 1 mark above-average demand.

mod monthly;
mod weekly;

pub use monthly::{
    compute_month_factors, seasonality_level, MonthFactors, SeasonalityAssessment,
    SeasonalityLevel, HIGH_SEASONALITY_RATIO, MODERATE_SEASONALITY_RATIO,
};
pub use weekly::{
    apply_seasonal_forecast, compute_day_of_week_factors, seasonal_factors, weekly_profile,
    DayOfWeekFactors, DayType, SeasonalFactor, SeasonalForecastPoint, SeasonalForecaster,
    WeekdayProfile,
};

use chrono::NaiveDate;

/// Per-bucket means of dated values and the overall mean.
///
/// Buckets with no observations are `None`.
fn bucket_means<const N: usize, F>(
    dated: &[(NaiveDate, f64)],
    bucket: F,
) -> ([Option<f64>; N], f64)
where
    F: Fn(NaiveDate) -> usize,
{
    let mut sums = [0.0; N];
    let mut counts = [0usize; N];
    for &(date, value) in dated {
        let b = bucket(date);
        sums[b] += value;
        counts[b] += 1;
    }

    let mut means = [None; N];
    for b in 0..N {
        if counts[b] > 0 {
            means[b] = Some(sums[b] / counts[b] as f64);
        }
    }

    let total: f64 = sums.iter().sum();
    let overall = if dated.is_empty() {
        f64::NAN
    } else {
        total / dated.len() as f64
    };
    (means, overall)
}

/// Normalize bucket means by the overall mean; a zero mean gives neutral factors.
fn normalize<const N: usize>(means: [Option<f64>; N], overall: f64) -> [Option<f64>; N] {
    means.map(|m| {
        m.map(|m| {
            if overall == 0.0 || overall.is_nan() {
                1.0
            } else {
                m / overall
            }
        })
    })
}
