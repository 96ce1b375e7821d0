//! Run configuration.
//!
//! One explicit struct carries every tunable; components take it (or a
//! reference to it) at construction.

use crate::error::{ForecastError, Result};
use serde::{Deserialize, Serialize};

/// Which observations form the baseline a point is scored against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnomalyBaseline {
    /// Mean and standard deviation of the other observations in the group.
    #[default]
    LeaveOneOut,
    /// Mean and standard deviation of the whole group, the point included.
    Inclusive,
}

/// Configuration for forecasting and anomaly detection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ForecastConfig {
    /// Horizons, in days, to project total demand over.
    pub forecast_horizons: Vec<usize>,
    /// Minimum observations a series needs before it is forecast.
    pub min_data_points: usize,
    /// Deviation, in standard deviations, above which a point is an anomaly.
    pub anomaly_k: f64,
    /// Deviation, in standard deviations, above which a point is a warning.
    pub warning_k: f64,
    /// Day-over-day percentage change treated as sudden.
    pub change_threshold_pct: f64,
    /// Trailing observations averaged into the seasonal base forecast.
    pub seasonal_base_window: usize,
    /// Smoothing factor for the exponential smoothing model.
    pub smoothing_alpha: f64,
    /// Baseline used when scoring usage anomalies.
    pub anomaly_baseline: AnomalyBaseline,
}

impl Default for ForecastConfig {
    fn default() -> Self {
        Self {
            forecast_horizons: vec![7, 14],
            min_data_points: 3,
            anomaly_k: 2.5,
            warning_k: 2.0,
            change_threshold_pct: 50.0,
            seasonal_base_window: 7,
            smoothing_alpha: 0.3,
            anomaly_baseline: AnomalyBaseline::LeaveOneOut,
        }
    }
}

impl ForecastConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_horizons(mut self, horizons: Vec<usize>) -> Self {
        self.forecast_horizons = horizons;
        self
    }

    pub fn with_min_data_points(mut self, min_data_points: usize) -> Self {
        self.min_data_points = min_data_points;
        self
    }

    /// Set the warning and anomaly thresholds (in standard deviations).
    pub fn with_thresholds(mut self, warning_k: f64, anomaly_k: f64) -> Self {
        self.warning_k = warning_k;
        self.anomaly_k = anomaly_k;
        self
    }

    pub fn with_change_threshold_pct(mut self, threshold_pct: f64) -> Self {
        self.change_threshold_pct = threshold_pct;
        self
    }

    pub fn with_seasonal_base_window(mut self, window: usize) -> Self {
        self.seasonal_base_window = window;
        self
    }

    pub fn with_smoothing_alpha(mut self, alpha: f64) -> Self {
        self.smoothing_alpha = alpha;
        self
    }

    pub fn with_anomaly_baseline(mut self, baseline: AnomalyBaseline) -> Self {
        self.anomaly_baseline = baseline;
        self
    }

    /// Check every field is usable.
    pub fn validate(&self) -> Result<()> {
        if self.forecast_horizons.is_empty() {
            return Err(invalid("at least one forecast horizon is required"));
        }
        if self.forecast_horizons.contains(&0) {
            return Err(invalid("forecast horizons must be positive"));
        }
        if self.min_data_points == 0 {
            return Err(invalid("min_data_points must be at least 1"));
        }
        if !self.warning_k.is_finite() || self.warning_k < 0.0 {
            return Err(invalid("warning_k must be a non-negative number"));
        }
        if !self.anomaly_k.is_finite() || self.anomaly_k < self.warning_k {
            return Err(invalid("anomaly_k must be at least warning_k"));
        }
        if !self.change_threshold_pct.is_finite() || self.change_threshold_pct < 0.0 {
            return Err(invalid("change_threshold_pct must be a non-negative number"));
        }
        if self.seasonal_base_window == 0 {
            return Err(invalid("seasonal_base_window must be at least 1"));
        }
        if self.smoothing_alpha.is_nan() || self.smoothing_alpha <= 0.0 || self.smoothing_alpha > 1.0
        {
            return Err(invalid("smoothing_alpha must be in (0, 1]"));
        }
        Ok(())
    }
}

fn invalid(message: &str) -> ForecastError {
    ForecastError::InvalidParameter(message.to_string())
}
