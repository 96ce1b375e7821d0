//! Core data structures for stock movement forecasting.

mod forecast;
mod record;
mod series;

pub use forecast::{ForecastOutcome, ForecastResult, HorizonForecast, SkipReason, SkippedGroup};
pub use record::{SeriesKey, StockMovementRecord};
pub use series::{group_records, SeriesGroup};
