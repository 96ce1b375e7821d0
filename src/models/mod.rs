//! Demand forecasting models.
//!
//! - `DemandForecaster`: weighted moving average with trend adjustment
//! - `SmoothingForecaster`: simple exponential smoothing fallback

mod traits;

pub mod demand;
pub mod smoothing;

pub use demand::DemandForecaster;
pub use smoothing::SmoothingForecaster;
pub use traits::{BoxedDemandModel, DemandModel};
