//! Z-score usage anomaly classification.
//!
//! Each observation is scored by its distance from a baseline mean in units
//! of the baseline's sample standard deviation, then rated against the
//! warning and anomaly thresholds.

use crate::config::{AnomalyBaseline, ForecastConfig};
use crate::core::SeriesGroup;
use crate::error::Result;
use crate::features::z_scores;
use crate::utils::stats;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Rating of a single observation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AnomalyStatus {
    Normal,
    Warning,
    Anomaly,
}

/// Classify a value against a mean and standard deviation.
///
/// `Anomaly` when `|value - mean| > stddev * anomaly_k`, else `Warning` when
/// `|value - mean| > stddev * warn_k`, else `Normal`. A zero (or undefined)
/// standard deviation is always `Normal`.
///
/// # Example
/// ```
/// use stockpulse_forecast::detection::{classify_point, AnomalyStatus};
///
/// assert_eq!(classify_point(10.0, 10.0, 1.0, 2.0, 2.5), AnomalyStatus::Normal);
/// assert_eq!(classify_point(12.2, 10.0, 1.0, 2.0, 2.5), AnomalyStatus::Warning);
/// assert_eq!(classify_point(13.0, 10.0, 1.0, 2.0, 2.5), AnomalyStatus::Anomaly);
/// assert_eq!(classify_point(99.0, 10.0, 0.0, 2.0, 2.5), AnomalyStatus::Normal);
/// ```
pub fn classify_point(
    value: f64,
    mean: f64,
    stddev: f64,
    warn_k: f64,
    anomaly_k: f64,
) -> AnomalyStatus {
    if stddev.is_nan() || stddev <= 0.0 {
        return AnomalyStatus::Normal;
    }
    let deviation = (value - mean).abs();
    if deviation > stddev * anomaly_k {
        AnomalyStatus::Anomaly
    } else if deviation > stddev * warn_k {
        AnomalyStatus::Warning
    } else {
        AnomalyStatus::Normal
    }
}

/// A scored observation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnomalyFlag {
    pub location: String,
    pub item: String,
    pub record_date: NaiveDate,
    pub issued: f64,
    /// Baseline mean the observation was compared with.
    pub avg: f64,
    /// Baseline sample standard deviation, or the whole series' when the
    /// baseline observations are flat.
    pub stddev: f64,
    pub z_score: f64,
    pub status: AnomalyStatus,
}

/// Scores issued quantities of a series for usage anomalies.
#[derive(Debug, Clone)]
pub struct AnomalyClassifier {
    warning_k: f64,
    anomaly_k: f64,
    baseline: AnomalyBaseline,
}

impl AnomalyClassifier {
    pub fn new(config: &ForecastConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            warning_k: config.warning_k,
            anomaly_k: config.anomaly_k,
            baseline: config.anomaly_baseline,
        })
    }

    pub fn baseline(&self) -> AnomalyBaseline {
        self.baseline
    }

    /// Classify a value with this classifier's thresholds.
    pub fn classify(&self, value: f64, mean: f64, stddev: f64) -> AnomalyStatus {
        classify_point(value, mean, stddev, self.warning_k, self.anomaly_k)
    }

    /// Minimum observations for every point to have a defined baseline.
    pub fn min_observations(&self) -> usize {
        match self.baseline {
            AnomalyBaseline::Inclusive => 2,
            AnomalyBaseline::LeaveOneOut => 3,
        }
    }

    /// Score every observation of a series.
    ///
    /// Series without variance, or too short for a baseline, are excluded
    /// from consideration and yield no flags at all. Under the leave-one-out
    /// baseline a point that differs from otherwise flat history is always an
    /// anomaly; its z-score is then taken against the whole series so it
    /// stays finite.
    pub fn score(&self, group: &SeriesGroup) -> Vec<AnomalyFlag> {
        let issued = group.issued();
        let n = issued.len();
        if n < self.min_observations() {
            debug!(series = %group.key(), n, "too short for anomaly scoring");
            return Vec::new();
        }

        let m2 = stats::sum_squared_deviations(issued);
        if m2 <= 0.0 {
            debug!(series = %group.key(), "zero variance, excluded from anomaly scoring");
            return Vec::new();
        }

        let mean = stats::mean(issued);
        let stddev = stats::std_dev(issued);
        let inclusive_z = z_scores(issued);

        group
            .dates()
            .iter()
            .zip(issued)
            .zip(inclusive_z)
            .map(|((&record_date, &value), z_score)| {
                let point = match self.baseline {
                    AnomalyBaseline::Inclusive => PointScore {
                        avg: mean,
                        stddev,
                        z_score,
                        status: self.classify(value, mean, stddev),
                    },
                    AnomalyBaseline::LeaveOneOut => {
                        self.score_against_rest(value, mean, m2, n, stddev)
                    }
                };
                AnomalyFlag {
                    location: group.location().to_string(),
                    item: group.item().to_string(),
                    record_date,
                    issued: value,
                    avg: point.avg,
                    stddev: point.stddev,
                    z_score: point.z_score,
                    status: point.status,
                }
            })
            .collect()
    }

    fn score_against_rest(
        &self,
        value: f64,
        mean: f64,
        m2: f64,
        n: usize,
        series_stddev: f64,
    ) -> PointScore {
        let (avg, stddev) = leave_one_out(value, mean, m2, n);
        if stddev > 0.0 {
            return PointScore {
                avg,
                stddev,
                z_score: (value - avg).abs() / stddev,
                status: self.classify(value, avg, stddev),
            };
        }
        // flat history around a series with variance: this point is the outlier
        PointScore {
            avg,
            stddev: series_stddev,
            z_score: (value - avg).abs() / series_stddev,
            status: AnomalyStatus::Anomaly,
        }
    }

    /// Warning and anomaly flags of a series, highest z-score first.
    pub fn detect(&self, group: &SeriesGroup) -> Vec<AnomalyFlag> {
        let mut flags: Vec<AnomalyFlag> = self
            .score(group)
            .into_iter()
            .filter(|f| f.status != AnomalyStatus::Normal)
            .collect();
        flags.sort_by(|a, b| b.z_score.total_cmp(&a.z_score));
        flags
    }
}

/// Baseline and rating of one observation.
struct PointScore {
    avg: f64,
    stddev: f64,
    z_score: f64,
    status: AnomalyStatus,
}

/// Remaining squared deviation, relative to the whole series, below which
/// the other observations count as flat.
const FLAT_REST_RATIO: f64 = 1e-12;

/// Mean and sample standard deviation of the series without `value`.
///
/// Removes the point from the full-series mean and sum of squared
/// deviations; requires `n >= 3`. The standard deviation is exactly zero
/// when the other observations are flat up to rounding.
fn leave_one_out(value: f64, mean: f64, m2: f64, n: usize) -> (f64, f64) {
    let rest = (n - 1) as f64;
    let rest_mean = (mean * n as f64 - value) / rest;
    let rest_m2 = m2 - (value - mean) * (value - rest_mean);
    if rest_m2 <= m2 * FLAT_REST_RATIO {
        return (rest_mean, 0.0);
    }
    (rest_mean, (rest_m2 / (rest - 1.0)).sqrt())
}
