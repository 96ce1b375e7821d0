//! Data quality checks on raw stock movement records.
//!
//! Violations are findings, not errors: forecasting keeps treating `issued`
//! as ground truth whatever the books say.

use crate::core::StockMovementRecord;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Largest tolerated gap between recorded and calculated closing stock.
pub const CALCULATION_TOLERANCE: f64 = 0.01;

/// Kind of data quality problem, in check order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DataQualityIssue {
    NegativeStock,
    NegativeOpening,
    NegativeReceived,
    NegativeIssued,
    /// Closing stock differs from opening + received - issued.
    CalculationMismatch,
    /// More was issued than was available.
    OverIssued,
}

/// The first issue a record exhibits, if any.
pub fn check_record(record: &StockMovementRecord) -> Option<DataQualityIssue> {
    let available = record.opening_stock + record.received;
    if record.closing_stock < 0.0 {
        Some(DataQualityIssue::NegativeStock)
    } else if record.opening_stock < 0.0 {
        Some(DataQualityIssue::NegativeOpening)
    } else if record.received < 0.0 {
        Some(DataQualityIssue::NegativeReceived)
    } else if record.issued < 0.0 {
        Some(DataQualityIssue::NegativeIssued)
    } else if (record.calculated_closing() - record.closing_stock).abs() > CALCULATION_TOLERANCE {
        Some(DataQualityIssue::CalculationMismatch)
    } else if record.issued > available {
        Some(DataQualityIssue::OverIssued)
    } else {
        None
    }
}

/// A record with a data quality issue.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QualityFinding {
    pub location: String,
    pub item: String,
    pub record_date: NaiveDate,
    pub opening_stock: f64,
    pub received: f64,
    pub issued: f64,
    pub closing_stock: f64,
    pub issue: DataQualityIssue,
    pub calculated_closing: f64,
    /// Recorded minus calculated closing stock.
    pub discrepancy: f64,
}

/// Check every record, newest findings first.
pub fn detect_data_quality_issues(records: &[StockMovementRecord]) -> Vec<QualityFinding> {
    let mut findings: Vec<QualityFinding> = records
        .iter()
        .filter_map(|record| {
            let issue = check_record(record)?;
            let calculated_closing = record.calculated_closing();
            Some(QualityFinding {
                location: record.location.clone(),
                item: record.item.clone(),
                record_date: record.record_date,
                opening_stock: record.opening_stock,
                received: record.received,
                issued: record.issued,
                closing_stock: record.closing_stock,
                issue,
                calculated_closing,
                discrepancy: record.closing_stock - calculated_closing,
            })
        })
        .collect();

    findings.sort_by(|a, b| b.record_date.cmp(&a.record_date));
    if !findings.is_empty() {
        warn!(count = findings.len(), "data quality issues found");
    }
    findings
}
