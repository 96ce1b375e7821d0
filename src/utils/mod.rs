//! Utility functions shared by the statistics and detection modules.

pub mod stats;

pub use stats::{ensure_finite, mean, population_std_dev, std_dev};
