// src/model/history.rs

use crate::error::{AdvisorError, Result};
use crate::model::record::{parse_raw_record, ParsedRecord, SaleRecord, SkipReason};
use chrono::{Duration, NaiveDate};
use log::warn;
use serde::Serialize;
use serde_json::Value;

/// What `SalesHistory::upsert` did to the history.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpsertOutcome {
    Inserted,
    /// A sale already existed on that date. Writing the same quantity again
    /// still counts as a replacement.
    Replaced { previous: u32 },
}

impl UpsertOutcome {
    pub fn replaced(&self) -> bool {
        matches!(self, UpsertOutcome::Replaced { .. })
    }

    pub fn previous(&self) -> Option<u32> {
        match self {
            UpsertOutcome::Inserted => None,
            UpsertOutcome::Replaced { previous } => Some(*previous),
        }
    }
}

/// Summary of a lenient ingestion pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IngestReport {
    pub accepted: usize,
    pub skipped: Vec<SkipReason>,
    /// Valid entries overwritten by a later entry for the same date.
    pub superseded: usize,
}

impl IngestReport {
    pub fn skipped_count(&self) -> usize {
        self.skipped.len()
    }
}

/// Sales of a single product, at most one record per date, newest first.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct SalesHistory {
    records: Vec<SaleRecord>,
}

impl SalesHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a history from already-valid records. Later records win on
    /// duplicate dates.
    pub fn from_records<I>(records: I) -> Self
    where
        I: IntoIterator<Item = SaleRecord>,
    {
        let mut history = Self::new();
        for record in records {
            history.put(record);
        }
        history
    }

    /// Lenient ingestion of raw store entries.
    ///
    /// Entries that do not parse are dropped and reported, never raised.
    pub fn from_raw(entries: &[Value]) -> (Self, IngestReport) {
        let mut history = Self::new();
        let mut report = IngestReport::default();

        for (index, entry) in entries.iter().enumerate() {
            match parse_raw_record(entry) {
                ParsedRecord::Valid(record) => {
                    if history.put(record).replaced() {
                        report.superseded += 1;
                    } else {
                        report.accepted += 1;
                    }
                }
                ParsedRecord::Skipped(reason) => {
                    warn!("Skipping sales entry #{}: {}", index, reason);
                    report.skipped.push(reason);
                }
            }
        }

        (history, report)
    }

    /// Records a sale, replacing any existing sale on the same date.
    ///
    /// Negative quantities are rejected before anything is touched.
    pub fn upsert(&mut self, date: NaiveDate, quantity: i64) -> Result<UpsertOutcome> {
        if quantity < 0 {
            return Err(AdvisorError::InvalidInput(format!(
                "quantity must be non-negative, got {}",
                quantity
            )));
        }
        let quantity = u32::try_from(quantity).map_err(|_| {
            AdvisorError::InvalidInput(format!("quantity {} is too large", quantity))
        })?;

        Ok(self.put(SaleRecord::new(date, quantity)))
    }

    /// Folds another history into this one; its records win on shared dates.
    ///
    /// Returns how many of this history's records were replaced.
    pub fn merge(&mut self, other: SalesHistory) -> usize {
        other
            .records
            .into_iter()
            .filter(|record| self.put(*record).replaced())
            .count()
    }

    fn put(&mut self, record: SaleRecord) -> UpsertOutcome {
        // Sorted descending, so compare the target against the probe.
        match self
            .records
            .binary_search_by(|probe| record.date.cmp(&probe.date))
        {
            Ok(index) => {
                let previous = self.records[index].quantity;
                self.records[index].quantity = record.quantity;
                UpsertOutcome::Replaced { previous }
            }
            Err(index) => {
                self.records.insert(index, record);
                UpsertOutcome::Inserted
            }
        }
    }

    /// Drops every record dated strictly before `as_of - horizon_days`.
    ///
    /// Returns how many records were removed.
    pub fn prune(&mut self, as_of: NaiveDate, horizon_days: u32) -> usize {
        let Some(cutoff) = as_of.checked_sub_signed(Duration::days(i64::from(horizon_days)))
        else {
            return 0;
        };
        let before = self.records.len();
        self.records.retain(|record| record.date >= cutoff);
        before - self.records.len()
    }

    /// Records ordered newest first.
    pub fn records(&self) -> &[SaleRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn earliest_date(&self) -> Option<NaiveDate> {
        self.records.last().map(|record| record.date)
    }

    pub fn quantity_on(&self, date: NaiveDate) -> Option<u32> {
        self.records
            .binary_search_by(|probe| date.cmp(&probe.date))
            .ok()
            .map(|index| self.records[index].quantity)
    }
}
