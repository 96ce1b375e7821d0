//! Day-over-day change detection.

use crate::core::SeriesGroup;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Rating of a day-over-day change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ChangeStatus {
    Normal,
    SuddenChange,
}

/// Percentage change from `prev` to `curr`.
///
/// Undefined (`None`) when the previous value is zero or negative.
pub fn percent_change(curr: f64, prev: f64) -> Option<f64> {
    (prev > 0.0).then(|| (curr - prev) / prev * 100.0)
}

/// Classify a change as sudden when its magnitude exceeds `threshold_pct`.
///
/// A non-positive previous value never triggers.
///
/// # Example
/// ```
/// use stockpulse_forecast::detection::{classify_day_over_day_change, ChangeStatus};
///
/// assert_eq!(classify_day_over_day_change(160.0, 100.0, 50.0), ChangeStatus::SuddenChange);
/// assert_eq!(classify_day_over_day_change(140.0, 100.0, 50.0), ChangeStatus::Normal);
/// assert_eq!(classify_day_over_day_change(140.0, 0.0, 50.0), ChangeStatus::Normal);
/// ```
pub fn classify_day_over_day_change(curr: f64, prev: f64, threshold_pct: f64) -> ChangeStatus {
    match percent_change(curr, prev) {
        Some(pct) if pct.abs() > threshold_pct => ChangeStatus::SuddenChange,
        _ => ChangeStatus::Normal,
    }
}

/// What moved suddenly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ChangeKind {
    /// Closing stock jumped or dropped.
    SuddenStockChange,
    /// Issued quantity jumped or dropped.
    SuddenUsageChange,
}

/// A sudden change between two consecutive observations of a series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SuddenChange {
    pub location: String,
    pub item: String,
    pub record_date: NaiveDate,
    pub closing_stock: f64,
    pub prev_closing_stock: f64,
    pub issued: f64,
    pub prev_issued: f64,
    pub stock_change_pct: Option<f64>,
    pub usage_change_pct: Option<f64>,
    pub kind: ChangeKind,
}

/// Sudden stock or usage changes of a series, in date order.
///
/// Consecutive observations are compared regardless of calendar gaps. A
/// stock change takes precedence over a usage change on the same day.
pub fn detect_sudden_changes(group: &SeriesGroup, threshold_pct: f64) -> Vec<SuddenChange> {
    let dates = group.dates();
    let closing = group.closing_stock();
    let issued = group.issued();

    (1..group.len())
        .filter_map(|i| {
            let stock = classify_day_over_day_change(closing[i], closing[i - 1], threshold_pct);
            let usage = classify_day_over_day_change(issued[i], issued[i - 1], threshold_pct);
            let kind = match (stock, usage) {
                (ChangeStatus::SuddenChange, _) => ChangeKind::SuddenStockChange,
                (_, ChangeStatus::SuddenChange) => ChangeKind::SuddenUsageChange,
                _ => return None,
            };
            Some(SuddenChange {
                location: group.location().to_string(),
                item: group.item().to_string(),
                record_date: dates[i],
                closing_stock: closing[i],
                prev_closing_stock: closing[i - 1],
                issued: issued[i],
                prev_issued: issued[i - 1],
                stock_change_pct: percent_change(closing[i], closing[i - 1]),
                usage_change_pct: percent_change(issued[i], issued[i - 1]),
                kind,
            })
        })
        .collect()
}
