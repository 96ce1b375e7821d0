//! Error types for the stockpulse-forecast library.

use chrono::NaiveDate;
use thiserror::Error;

/// Result type alias for forecast operations.
pub type Result<T> = std::result::Result<T, ForecastError>;

/// Errors that can occur during forecasting operations.
///
/// Insufficient history inside a batch run is not an error; it surfaces as
/// a [`SkippedGroup`](crate::core::SkippedGroup). These variants are for
/// contract violations and statistics requested over too little data.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ForecastError {
    /// Input data is empty.
    #[error("empty input data")]
    EmptyData,

    /// Insufficient data points for the operation.
    #[error("insufficient data: need at least {needed}, got {got}")]
    InsufficientData { needed: usize, got: usize },

    /// Invalid parameter value.
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// NaN or infinite values detected in the input.
    #[error("missing values detected in data")]
    MissingValues,

    /// A record failed structural validation.
    #[error("invalid record: {0}")]
    InvalidRecord(String),

    /// Records for a series are not in ascending date order.
    #[error("records for {location}/{item} are not ordered by date at {date}")]
    UnsortedDates {
        location: String,
        item: String,
        date: NaiveDate,
    },

    /// Two records for the same series share a date.
    #[error("duplicate record for {location}/{item} on {date}")]
    DuplicateDate {
        location: String,
        item: String,
        date: NaiveDate,
    },
}
