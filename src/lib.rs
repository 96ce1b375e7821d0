//! # stockpulse-forecast
//!
//! Demand forecasting and anomaly statistics for stock monitoring.
//!
//! Consumes per-day stock movement records of (location, item) pairs and
//! produces demand forecasts over fixed horizons, day-of-week and monthly
//! seasonal factors, z-score usage anomaly flags, sudden change and
//! stockout findings, and data quality checks. The crate performs no I/O;
//! results derive serde traits so a persistence layer can store them as-is.

pub mod config;
pub mod core;
pub mod detection;
pub mod error;
pub mod features;
pub mod models;
pub mod pipeline;
pub mod seasonality;
pub mod utils;

pub use error::{ForecastError, Result};

pub mod prelude {
    pub use crate::config::{AnomalyBaseline, ForecastConfig};
    pub use crate::core::{
        group_records, ForecastOutcome, ForecastResult, SeriesGroup, SeriesKey,
        StockMovementRecord,
    };
    pub use crate::detection::{AnomalyClassifier, AnomalyReport, AnomalyStatus};
    pub use crate::error::{ForecastError, Result};
    pub use crate::models::{DemandForecaster, DemandModel};
    pub use crate::pipeline::{ForecastPipeline, ForecastRun};
    pub use crate::seasonality::{compute_day_of_week_factors, SeasonalForecaster};
}
