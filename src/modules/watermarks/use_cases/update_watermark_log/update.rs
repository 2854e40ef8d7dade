// Pure merge of a run's processed dates into the watermark log.
//
// Responsibilities
// - Stamp one new record per processed date with the run timestamp.
// - Reject an existing log whose columns are not [source_date, processed_date] before
//   touching it.
// - Append after the existing records. No deduplication, no sorting.

use crate::modules::watermarks::core::log::{WATERMARK_COLUMNS, WatermarkLog, WatermarkRecord};
use chrono::{NaiveDate, NaiveDateTime};

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum UpdateError {
    #[error("watermark log schema mismatch: expected columns {expected:?}, found {actual:?}")]
    SchemaMismatch {
        expected: Vec<String>,
        actual: Vec<String>,
    },
}

pub fn ensure_expected_schema(log: &WatermarkLog) -> Result<(), UpdateError> {
    if log.has_expected_schema() {
        return Ok(());
    }
    Err(UpdateError::SchemaMismatch {
        expected: WATERMARK_COLUMNS.iter().map(|c| c.to_string()).collect(),
        actual: log.columns().to_vec(),
    })
}

pub fn update_watermark_log(
    dates_processed: &[NaiveDate],
    existing_log: Option<&WatermarkLog>,
    run_timestamp: NaiveDateTime,
) -> Result<WatermarkLog, UpdateError> {
    if let Some(log) = existing_log {
        ensure_expected_schema(log)?;
    }

    let new_records = dates_processed.iter().map(|source_date| WatermarkRecord {
        source_date: *source_date,
        processed_date: run_timestamp,
    });

    Ok(match existing_log {
        Some(log) => log.appended(new_records),
        None => WatermarkLog::new(new_records.collect()),
    })
}
