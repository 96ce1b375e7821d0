//! Per-(location, item) daily series built from stock movement records.

use super::record::{SeriesKey, StockMovementRecord};
use crate::error::{ForecastError, Result};
use chrono::NaiveDate;
use std::collections::BTreeMap;

/// The ordered daily history of one (location, item) pair.
///
/// Dates are strictly ascending. Missing days stay missing; nothing is
/// zero-filled.
#[derive(Debug, Clone, PartialEq)]
pub struct SeriesGroup {
    key: SeriesKey,
    dates: Vec<NaiveDate>,
    opening: Vec<f64>,
    received: Vec<f64>,
    issued: Vec<f64>,
    closing: Vec<f64>,
}

impl SeriesGroup {
    /// Create an empty group for the given key.
    pub fn new(key: SeriesKey) -> Self {
        Self {
            key,
            dates: Vec::new(),
            opening: Vec::new(),
            received: Vec::new(),
            issued: Vec::new(),
            closing: Vec::new(),
        }
    }

    /// Build a group from dated issued quantities; other columns are zero.
    pub fn from_issued(key: SeriesKey, observations: &[(NaiveDate, f64)]) -> Result<Self> {
        let mut group = Self::new(key);
        for &(date, issued) in observations {
            group.push_observation(date, 0.0, 0.0, issued, 0.0)?;
        }
        Ok(group)
    }

    /// Append a record belonging to this group.
    pub fn push(&mut self, record: &StockMovementRecord) -> Result<()> {
        if record.location != self.key.location || record.item != self.key.item {
            return Err(ForecastError::InvalidRecord(format!(
                "record for {}-{} pushed into series {}",
                record.location, record.item, self.key
            )));
        }
        self.push_observation(
            record.record_date,
            record.opening_stock,
            record.received,
            record.issued,
            record.closing_stock,
        )
    }

    fn push_observation(
        &mut self,
        date: NaiveDate,
        opening: f64,
        received: f64,
        issued: f64,
        closing: f64,
    ) -> Result<()> {
        if !issued.is_finite() {
            return Err(ForecastError::MissingValues);
        }
        if let Some(&last) = self.dates.last() {
            if date == last {
                return Err(ForecastError::DuplicateDate {
                    location: self.key.location.clone(),
                    item: self.key.item.clone(),
                    date,
                });
            }
            if date < last {
                return Err(ForecastError::UnsortedDates {
                    location: self.key.location.clone(),
                    item: self.key.item.clone(),
                    date,
                });
            }
        }
        self.dates.push(date);
        self.opening.push(opening);
        self.received.push(received);
        self.issued.push(issued);
        self.closing.push(closing);
        Ok(())
    }

    pub fn key(&self) -> &SeriesKey {
        &self.key
    }

    pub fn location(&self) -> &str {
        &self.key.location
    }

    pub fn item(&self) -> &str {
        &self.key.item
    }

    pub fn dates(&self) -> &[NaiveDate] {
        &self.dates
    }

    pub fn opening_stock(&self) -> &[f64] {
        &self.opening
    }

    pub fn received(&self) -> &[f64] {
        &self.received
    }

    /// Issued quantities in date order; the demand series.
    pub fn issued(&self) -> &[f64] {
        &self.issued
    }

    pub fn closing_stock(&self) -> &[f64] {
        &self.closing
    }

    /// (date, issued) pairs in date order.
    pub fn dated_issued(&self) -> Vec<(NaiveDate, f64)> {
        self.dates
            .iter()
            .copied()
            .zip(self.issued.iter().copied())
            .collect()
    }

    pub fn last_date(&self) -> Option<NaiveDate> {
        self.dates.last().copied()
    }

    pub fn len(&self) -> usize {
        self.dates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }
}

/// Group records by (location, item), keeping each group's date order.
///
/// Groups are returned sorted by key. Within a group the input must already
/// be in strictly ascending date order; anything else is a caller bug and
/// fails with `UnsortedDates` or `DuplicateDate`.
pub fn group_records(records: &[StockMovementRecord]) -> Result<Vec<SeriesGroup>> {
    let mut groups: BTreeMap<SeriesKey, SeriesGroup> = BTreeMap::new();
    for record in records {
        record.validate()?;
        let key = record.key();
        groups
            .entry(key.clone())
            .or_insert_with(|| SeriesGroup::new(key))
            .push(record)?;
    }
    Ok(groups.into_values().collect())
}
