//! Anomaly detection over stock movement history.
//!
//! This module provides:
//! - Usage anomalies: z-score classification of issued quantities
//! - Sudden changes: day-over-day jumps in closing stock or usage
//! - Data quality: negative values and books that do not balance
//! - Stockouts: how often a series runs dry
//!
//! [`AnomalyReport`] runs all of them over one batch.

mod anomaly;
mod change;
mod quality;
mod report;
mod stockout;

pub use anomaly::{classify_point, AnomalyClassifier, AnomalyFlag, AnomalyStatus};
pub use change::{
    classify_day_over_day_change, detect_sudden_changes, percent_change, ChangeKind, ChangeStatus,
    SuddenChange,
};
pub use quality::{
    check_record, detect_data_quality_issues, DataQualityIssue, QualityFinding,
    CALCULATION_TOLERANCE,
};
pub use report::{AnomalyReport, ReportSummary};
pub use stockout::{
    analyze_stockouts, classify_stockout_rate, is_stockout, StockoutPattern, StockoutSummary,
    OCCASIONAL_STOCKOUT_MAX_PCT, RARE_STOCKOUT_MAX_PCT,
};
