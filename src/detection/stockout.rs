//! Stockout history analysis.

use crate::core::SeriesGroup;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Highest stockout rate (percent of days) still counted as rare.
pub const RARE_STOCKOUT_MAX_PCT: f64 = 10.0;
/// Highest stockout rate (percent of days) still counted as occasional.
pub const OCCASIONAL_STOCKOUT_MAX_PCT: f64 = 20.0;

/// How often a series runs out of stock.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StockoutPattern {
    NoStockouts,
    RareStockouts,
    OccasionalStockouts,
    FrequentStockouts,
}

/// Bucket a stockout rate given in percent.
pub fn classify_stockout_rate(rate_pct: f64) -> StockoutPattern {
    if rate_pct > OCCASIONAL_STOCKOUT_MAX_PCT {
        StockoutPattern::FrequentStockouts
    } else if rate_pct > RARE_STOCKOUT_MAX_PCT {
        StockoutPattern::OccasionalStockouts
    } else if rate_pct > 0.0 {
        StockoutPattern::RareStockouts
    } else {
        StockoutPattern::NoStockouts
    }
}

/// A day ends in stockout when closing stock is zero or negative.
pub fn is_stockout(closing_stock: f64) -> bool {
    closing_stock <= 0.0
}

/// Stockout history of one series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StockoutSummary {
    pub location: String,
    pub item: String,
    pub total_days: usize,
    pub stockout_days: usize,
    pub stockout_rate_pct: f64,
    pub last_stockout_date: Option<NaiveDate>,
    pub pattern: StockoutPattern,
}

/// Summarize stockouts over a series' full history.
///
/// Returns `None` for a series without observations.
pub fn analyze_stockouts(group: &SeriesGroup) -> Option<StockoutSummary> {
    let total_days = group.len();
    if total_days == 0 {
        return None;
    }

    let stockouts: Vec<NaiveDate> = group
        .dates()
        .iter()
        .zip(group.closing_stock())
        .filter(|(_, &closing)| is_stockout(closing))
        .map(|(&date, _)| date)
        .collect();

    let stockout_rate_pct = stockouts.len() as f64 * 100.0 / total_days as f64;
    Some(StockoutSummary {
        location: group.location().to_string(),
        item: group.item().to_string(),
        total_days,
        stockout_days: stockouts.len(),
        stockout_rate_pct,
        last_stockout_date: stockouts.last().copied(),
        pattern: classify_stockout_rate(stockout_rate_pct),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{group_records, StockMovementRecord};
    use approx::assert_relative_eq;

    #[test]
    fn rate_buckets() {
        assert_eq!(classify_stockout_rate(0.0), StockoutPattern::NoStockouts);
        assert_eq!(classify_stockout_rate(0.5), StockoutPattern::RareStockouts);
        assert_eq!(classify_stockout_rate(10.0), StockoutPattern::RareStockouts);
        assert_eq!(classify_stockout_rate(10.01), StockoutPattern::OccasionalStockouts);
        assert_eq!(classify_stockout_rate(20.0), StockoutPattern::OccasionalStockouts);
        assert_eq!(classify_stockout_rate(20.5), StockoutPattern::FrequentStockouts);
    }

    #[test]
    fn is_stockout_includes_zero() {
        assert!(is_stockout(0.0));
        assert!(is_stockout(-3.0));
        assert!(!is_stockout(0.1));
    }

    #[test]
    fn analyze_stockouts_over_history() {
        // closing stock: 5, 0, 3, 0, 4 over five days
        let closings = [5.0, 0.0, 3.0, 0.0, 4.0];
        let records: Vec<_> = closings
            .iter()
            .enumerate()
            .map(|(i, &closing)| {
                let date = NaiveDate::from_ymd_opt(2024, 6, i as u32 + 1).unwrap();
                StockMovementRecord::new("Agra", "Insulin", date, closing + 1.0, 0.0, 1.0)
            })
            .collect();
        let groups = group_records(&records).unwrap();
        let summary = analyze_stockouts(&groups[0]).unwrap();

        assert_eq!(summary.total_days, 5);
        assert_eq!(summary.stockout_days, 2);
        assert_relative_eq!(summary.stockout_rate_pct, 40.0, epsilon = 1e-10);
        assert_eq!(
            summary.last_stockout_date,
            NaiveDate::from_ymd_opt(2024, 6, 4)
        );
        assert_eq!(summary.pattern, StockoutPattern::FrequentStockouts);
    }

    #[test]
    fn analyze_empty_series() {
        let group = SeriesGroup::new(crate::core::SeriesKey::new("Agra", "Insulin"));
        assert!(analyze_stockouts(&group).is_none());
    }
}
