//! Time series statistics over daily demand.
//!
//! Pure functions over an ordered sequence of issued quantities. They are
//! the single source of the forecasting and anomaly math.
//!
//! # Example
//!
//! ```
//! use stockpulse_forecast::features::{confidence_score, trend_slope, weighted_moving_average};
//!
//! let issued = vec![10.0, 12.0, 11.0, 13.0, 14.0];
//!
//! let level = weighted_moving_average(&issued).unwrap();
//! let slope = trend_slope(&issued);
//! let confidence = confidence_score(&issued);
//!
//! assert!(level > 12.0);
//! assert!(slope > 0.0);
//! assert!(confidence > 0.8);
//! ```

pub mod basic;
pub mod distribution;
pub mod trend;

pub use basic::{
    exponential_smoothing, simple_moving_average, trailing_mean, weighted_moving_average,
};
pub use distribution::{coefficient_of_variation, confidence_score, z_scores};
pub use trend::{linear_trend, trend_slope, LinearTrendResult};
