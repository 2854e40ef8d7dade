// Watermark log: the append-only history of which source dates were processed and when.
//
// Invariants
// - A log built by this crate always carries the two columns [source_date, processed_date].
// - A log read from storage keeps the columns it was stored with. If that column set differs
//   from the expected one the log carries no records and must be rejected before merging.
// - Records are never deduplicated or reordered. Re-processing a date adds a new row.

use chrono::{NaiveDate, NaiveDateTime};
use std::collections::BTreeSet;

pub const SOURCE_DATE_COL: &str = "source_date";
pub const PROCESSED_DATE_COL: &str = "processed_date";
pub const WATERMARK_COLUMNS: [&str; 2] = [SOURCE_DATE_COL, PROCESSED_DATE_COL];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WatermarkRecord {
    pub source_date: NaiveDate,
    pub processed_date: NaiveDateTime,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WatermarkLog {
    columns: Vec<String>,
    records: Vec<WatermarkRecord>,
}

impl WatermarkLog {
    pub fn new(records: Vec<WatermarkRecord>) -> Self {
        Self {
            columns: WATERMARK_COLUMNS.iter().map(|c| c.to_string()).collect(),
            records,
        }
    }

    pub fn empty() -> Self {
        Self::new(Vec::new())
    }

    /// A log as found in storage, keeping its own column names and order.
    pub fn with_columns(columns: Vec<String>, records: Vec<WatermarkRecord>) -> Self {
        Self { columns, records }
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn records(&self) -> &[WatermarkRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Column comparison is order-insensitive but counts duplicates.
    pub fn has_expected_schema(&self) -> bool {
        has_expected_columns(&self.columns)
    }

    pub fn processed_source_dates(&self) -> BTreeSet<NaiveDate> {
        self.records.iter().map(|r| r.source_date).collect()
    }

    /// This log followed by `new_records`, keeping the existing column order.
    pub fn appended(&self, new_records: impl IntoIterator<Item = WatermarkRecord>) -> Self {
        let mut records = self.records.clone();
        records.extend(new_records);
        Self {
            columns: self.columns.clone(),
            records,
        }
    }
}

pub fn has_expected_columns(columns: &[String]) -> bool {
    let mut actual: Vec<&str> = columns.iter().map(String::as_str).collect();
    let mut expected = WATERMARK_COLUMNS.to_vec();
    actual.sort_unstable();
    expected.sort_unstable();
    actual == expected
}
