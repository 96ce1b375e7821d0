//! Combined anomaly report over a batch of records.

use super::anomaly::{AnomalyClassifier, AnomalyFlag};
use super::change::{detect_sudden_changes, SuddenChange};
use super::quality::{detect_data_quality_issues, QualityFinding};
use super::stockout::{analyze_stockouts, StockoutSummary};
use crate::config::ForecastConfig;
use crate::core::{group_records, StockMovementRecord};
use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use tracing::info;

/// Every anomaly category found in one batch.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnomalyReport {
    /// Warning and anomaly flags, highest z-score first.
    pub usage_anomalies: Vec<AnomalyFlag>,
    /// Largest stock change first. Changes without a defined stock
    /// percentage (previous closing stock zero or below) come last, unlike
    /// a SQL `ORDER BY ... DESC` that puts NULLs first.
    pub sudden_changes: Vec<SuddenChange>,
    /// Newest first.
    pub data_quality_issues: Vec<QualityFinding>,
    /// Series that ran out at least once, highest stockout rate first.
    pub stockout_patterns: Vec<StockoutSummary>,
}

/// Counts per report category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportSummary {
    pub usage_anomalies: usize,
    pub sudden_changes: usize,
    pub data_quality_issues: usize,
    pub stockout_patterns: usize,
}

impl ReportSummary {
    pub fn total(&self) -> usize {
        self.usage_anomalies + self.sudden_changes + self.data_quality_issues + self.stockout_patterns
    }
}

impl AnomalyReport {
    /// Run every detector over a batch of records.
    ///
    /// Data quality is checked on the raw records; the remaining detectors
    /// run per grouped series. Unsorted or duplicate dates fail the batch.
    pub fn generate(records: &[StockMovementRecord], config: &ForecastConfig) -> Result<Self> {
        let classifier = AnomalyClassifier::new(config)?;
        let data_quality_issues = detect_data_quality_issues(records);
        let groups = group_records(records)?;

        let mut usage_anomalies = Vec::new();
        let mut sudden_changes = Vec::new();
        let mut stockout_patterns = Vec::new();
        for group in &groups {
            usage_anomalies.extend(classifier.detect(group));
            sudden_changes.extend(detect_sudden_changes(group, config.change_threshold_pct));
            if let Some(summary) = analyze_stockouts(group) {
                if summary.stockout_days > 0 {
                    stockout_patterns.push(summary);
                }
            }
        }

        usage_anomalies.sort_by(|a, b| b.z_score.total_cmp(&a.z_score));
        sudden_changes.sort_by(by_stock_change);
        stockout_patterns.sort_by(|a, b| b.stockout_rate_pct.total_cmp(&a.stockout_rate_pct));

        let report = Self {
            usage_anomalies,
            sudden_changes,
            data_quality_issues,
            stockout_patterns,
        };
        let summary = report.summary();
        info!(
            groups = groups.len(),
            usage_anomalies = summary.usage_anomalies,
            sudden_changes = summary.sudden_changes,
            data_quality_issues = summary.data_quality_issues,
            stockout_patterns = summary.stockout_patterns,
            "anomaly report generated"
        );
        Ok(report)
    }

    pub fn summary(&self) -> ReportSummary {
        ReportSummary {
            usage_anomalies: self.usage_anomalies.len(),
            sudden_changes: self.sudden_changes.len(),
            data_quality_issues: self.data_quality_issues.len(),
            stockout_patterns: self.stockout_patterns.len(),
        }
    }

    /// True when no category has findings.
    pub fn is_clean(&self) -> bool {
        self.summary().total() == 0
    }
}

/// Descending |stock change %|, undefined percentages last.
fn by_stock_change(a: &SuddenChange, b: &SuddenChange) -> Ordering {
    match (a.stock_change_pct, b.stock_change_pct) {
        (Some(x), Some(y)) => y.abs().total_cmp(&x.abs()),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}
