//! Stock movement records and series identity.

use crate::error::{ForecastError, Result};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// One day of stock movement for a (location, item) pair.
///
/// Records are read-only input. Quantities are not validated here: negative
/// values and unbalanced books are reported by
/// [`detection::quality`](crate::detection::quality) instead of rejected.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StockMovementRecord {
    pub location: String,
    pub item: String,
    pub record_date: NaiveDate,
    pub opening_stock: f64,
    pub received: f64,
    pub issued: f64,
    pub closing_stock: f64,
}

impl StockMovementRecord {
    /// Create a record with balanced books: closing = opening + received - issued.
    pub fn new(
        location: impl Into<String>,
        item: impl Into<String>,
        record_date: NaiveDate,
        opening_stock: f64,
        received: f64,
        issued: f64,
    ) -> Self {
        Self {
            location: location.into(),
            item: item.into(),
            record_date,
            opening_stock,
            received,
            issued,
            closing_stock: opening_stock + received - issued,
        }
    }

    /// Override the recorded closing stock.
    pub fn with_closing_stock(mut self, closing_stock: f64) -> Self {
        self.closing_stock = closing_stock;
        self
    }

    /// Closing stock implied by the movement columns.
    pub fn calculated_closing(&self) -> f64 {
        self.opening_stock + self.received - self.issued
    }

    /// The series this record belongs to.
    pub fn key(&self) -> SeriesKey {
        SeriesKey::new(self.location.as_str(), self.item.as_str())
    }

    /// Check the structural contract: identifiers present, quantities finite.
    pub fn validate(&self) -> Result<()> {
        if self.location.trim().is_empty() {
            return Err(ForecastError::InvalidRecord(format!(
                "empty location for item '{}' on {}",
                self.item, self.record_date
            )));
        }
        if self.item.trim().is_empty() {
            return Err(ForecastError::InvalidRecord(format!(
                "empty item at location '{}' on {}",
                self.location, self.record_date
            )));
        }
        let quantities = [
            self.opening_stock,
            self.received,
            self.issued,
            self.closing_stock,
        ];
        if quantities.iter().any(|q| !q.is_finite()) {
            return Err(ForecastError::MissingValues);
        }
        Ok(())
    }
}

/// Identity of a demand series.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SeriesKey {
    pub location: String,
    pub item: String,
}

impl SeriesKey {
    pub fn new(location: impl Into<String>, item: impl Into<String>) -> Self {
        Self {
            location: location.into(),
            item: item.into(),
        }
    }
}

impl fmt::Display for SeriesKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.location, self.item)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn date(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, day).unwrap()
    }

    #[test]
    fn new_record_balances_books() {
        let record = StockMovementRecord::new("Chennai", "ORS", date(1), 100.0, 20.0, 35.0);
        assert_relative_eq!(record.closing_stock, 85.0, epsilon = 1e-10);
        assert_relative_eq!(record.calculated_closing(), 85.0, epsilon = 1e-10);

        let record = record.with_closing_stock(80.0);
        assert_relative_eq!(record.closing_stock, 80.0, epsilon = 1e-10);
        assert_relative_eq!(record.calculated_closing(), 85.0, epsilon = 1e-10);
    }

    #[test]
    fn validate_rejects_empty_identifiers() {
        let record = StockMovementRecord::new("", "ORS", date(1), 1.0, 0.0, 0.0);
        assert!(matches!(
            record.validate(),
            Err(ForecastError::InvalidRecord(_))
        ));

        let record = StockMovementRecord::new("Chennai", "  ", date(1), 1.0, 0.0, 0.0);
        assert!(matches!(
            record.validate(),
            Err(ForecastError::InvalidRecord(_))
        ));
    }

    #[test]
    fn validate_rejects_non_finite_quantities() {
        let record = StockMovementRecord::new("Chennai", "ORS", date(1), 1.0, f64::NAN, 0.0);
        assert_eq!(record.validate(), Err(ForecastError::MissingValues));
    }

    #[test]
    fn validate_accepts_negative_quantities() {
        let record = StockMovementRecord::new("Chennai", "ORS", date(1), 0.0, 0.0, 10.0);
        assert!(record.closing_stock < 0.0);
        assert!(record.validate().is_ok());
    }

    #[test]
    fn series_key_orders_by_location_then_item() {
        let a = SeriesKey::new("Chennai", "Paracetamol");
        let b = SeriesKey::new("Chennai", "Insulin");
        let c = SeriesKey::new("Agra", "Paracetamol");
        let mut keys = vec![a.clone(), b.clone(), c.clone()];
        keys.sort();
        assert_eq!(keys, vec![c, b, a]);
        assert_eq!(SeriesKey::new("Chennai", "ORS").to_string(), "Chennai-ORS");
    }
}
