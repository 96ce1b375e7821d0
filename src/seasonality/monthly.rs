//! Month-of-year seasonality.

use super::{bucket_means, normalize};
use crate::utils::stats;
use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

/// Variation of monthly means, relative to their average, above which a
/// series is highly seasonal.
pub const HIGH_SEASONALITY_RATIO: f64 = 0.30;
/// Relative variation above which a series is moderately seasonal.
pub const MODERATE_SEASONALITY_RATIO: f64 = 0.15;

/// Multiplicative demand factors indexed by month (January = 1).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct MonthFactors {
    factors: [Option<f64>; 12],
}

impl MonthFactors {
    /// Factor for a month (1-12); `1.0` when the month had no history.
    pub fn factor(&self, month: u32) -> f64 {
        self.get(month).unwrap_or(1.0)
    }

    /// Factor for a month (1-12), if the month had history.
    pub fn get(&self, month: u32) -> Option<f64> {
        let index = month.checked_sub(1)? as usize;
        self.factors.get(index).copied().flatten()
    }

    /// Months with history and their factors, January first.
    pub fn iter(&self) -> impl Iterator<Item = (u32, f64)> + '_ {
        self.factors
            .iter()
            .enumerate()
            .filter_map(|(i, f)| f.map(|f| (i as u32 + 1, f)))
    }

    pub fn len(&self) -> usize {
        self.factors.iter().flatten().count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Compute month-of-year factors from dated values.
///
/// Observations from the same calendar month of different years share a
/// bucket. A zero overall mean gives neutral factors.
pub fn compute_month_factors(dated: &[(NaiveDate, f64)]) -> MonthFactors {
    let (means, overall) = bucket_means::<12, _>(dated, |d| d.month0() as usize);
    MonthFactors {
        factors: normalize(means, overall),
    }
}

/// Strength of month-to-month seasonality.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SeasonalityLevel {
    #[serde(rename = "HIGH_SEASONALITY")]
    High,
    #[serde(rename = "MODERATE_SEASONALITY")]
    Moderate,
    #[serde(rename = "LOW_SEASONALITY")]
    Low,
}

/// Monthly seasonality rating of a series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeasonalityAssessment {
    /// Mean of the monthly means.
    pub overall_avg: f64,
    /// Sample standard deviation of the monthly means.
    pub seasonal_variation: f64,
    pub level: SeasonalityLevel,
    /// `seasonal_variation / overall_avg * 100`.
    pub coefficient_of_variation_pct: f64,
}

/// Rate how strongly demand varies from month to month.
///
/// Returns `None` when there is no history or the average monthly demand is
/// not positive. A single month has no measurable variation and rates `Low`.
pub fn seasonality_level(dated: &[(NaiveDate, f64)]) -> Option<SeasonalityAssessment> {
    let (means, _) = bucket_means::<12, _>(dated, |d| d.month0() as usize);
    let monthly: Vec<f64> = means.iter().flatten().copied().collect();
    if monthly.is_empty() {
        return None;
    }

    let overall_avg = stats::mean(&monthly);
    if overall_avg <= 0.0 {
        return None;
    }

    let variation = stats::std_dev(&monthly);
    let seasonal_variation = if variation.is_nan() { 0.0 } else { variation };

    let level = if seasonal_variation > overall_avg * HIGH_SEASONALITY_RATIO {
        SeasonalityLevel::High
    } else if seasonal_variation > overall_avg * MODERATE_SEASONALITY_RATIO {
        SeasonalityLevel::Moderate
    } else {
        SeasonalityLevel::Low
    };

    Some(SeasonalityAssessment {
        overall_avg,
        seasonal_variation,
        level,
        coefficient_of_variation_pct: seasonal_variation / overall_avg * 100.0,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn day(month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, month, day).unwrap()
    }

    #[test]
    fn month_factors_are_ratios_to_overall_mean() {
        let dated = vec![
            (day(1, 1), 10.0),
            (day(1, 2), 10.0),
            (day(2, 1), 30.0),
            (day(2, 2), 30.0),
        ];
        let factors = compute_month_factors(&dated);
        assert_relative_eq!(factors.factor(1), 0.5, epsilon = 1e-10);
        assert_relative_eq!(factors.factor(2), 1.5, epsilon = 1e-10);
        assert_eq!(factors.get(3), None);
        assert_eq!(factors.factor(3), 1.0);
        assert_eq!(factors.get(0), None);
        assert_eq!(factors.get(13), None);
        assert_eq!(factors.iter().map(|(m, _)| m).collect::<Vec<_>>(), vec![1, 2]);
    }

    #[test]
    fn same_month_of_different_years_share_a_bucket() {
        let dated = vec![
            (NaiveDate::from_ymd_opt(2023, 3, 1).unwrap(), 10.0),
            (NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(), 20.0),
        ];
        let factors = compute_month_factors(&dated);
        assert_eq!(factors.len(), 1);
        assert_relative_eq!(factors.factor(3), 1.0, epsilon = 1e-10);
    }

    #[test]
    fn seasonality_level_thresholds() {
        // monthly means 10 and 30: avg 20, sample sd 14.14 -> high
        let high = seasonality_level(&[(day(1, 1), 10.0), (day(2, 1), 30.0)]).unwrap();
        assert_eq!(high.level, SeasonalityLevel::High);
        assert_relative_eq!(high.overall_avg, 20.0, epsilon = 1e-10);
        assert_relative_eq!(high.seasonal_variation, 200.0_f64.sqrt(), epsilon = 1e-10);

        // monthly means 18 and 22: sd 2.83 -> 14% of avg -> low
        let low = seasonality_level(&[(day(1, 1), 18.0), (day(2, 1), 22.0)]).unwrap();
        assert_eq!(low.level, SeasonalityLevel::Low);

        // monthly means 16 and 24: sd 5.66 -> 28% of avg -> moderate
        let moderate = seasonality_level(&[(day(1, 1), 16.0), (day(2, 1), 24.0)]).unwrap();
        assert_eq!(moderate.level, SeasonalityLevel::Moderate);
        assert_relative_eq!(
            moderate.coefficient_of_variation_pct,
            32.0_f64.sqrt() / 20.0 * 100.0,
            epsilon = 1e-9
        );
    }

    #[test]
    fn seasonality_level_degenerate_cases() {
        assert!(seasonality_level(&[]).is_none());
        assert!(seasonality_level(&[(day(1, 1), 0.0), (day(2, 1), 0.0)]).is_none());

        let single = seasonality_level(&[(day(5, 1), 7.0), (day(5, 2), 9.0)]).unwrap();
        assert_eq!(single.level, SeasonalityLevel::Low);
        assert_eq!(single.seasonal_variation, 0.0);
    }

    #[test]
    fn seasonality_level_serializes_with_warehouse_names() {
        let json = serde_json::to_string(&SeasonalityLevel::High).unwrap();
        assert_eq!(json, "\"HIGH_SEASONALITY\"");
    }
}
