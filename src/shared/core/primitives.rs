// Calendar date primitives shared by the watermark log, its codecs and the shell.
//
// Formats
// - Source dates are plain calendar dates: YYYY-MM-DD.
// - Processed dates are run timestamps with second precision: YYYYMMDD_HHMMSS.

use chrono::{NaiveDate, NaiveDateTime, ParseError};

pub const SOURCE_DATE_FORMAT: &str = "%Y-%m-%d";
pub const PROCESSED_DATE_FORMAT: &str = "%Y%m%d_%H%M%S";

pub fn parse_source_date(value: &str) -> Result<NaiveDate, ParseError> {
    NaiveDate::parse_from_str(value.trim(), SOURCE_DATE_FORMAT)
}

pub fn format_source_date(date: NaiveDate) -> String {
    date.format(SOURCE_DATE_FORMAT).to_string()
}

pub fn parse_processed_date(value: &str) -> Result<NaiveDateTime, ParseError> {
    NaiveDateTime::parse_from_str(value.trim(), PROCESSED_DATE_FORMAT)
}

pub fn format_processed_date(timestamp: NaiveDateTime) -> String {
    timestamp.format(PROCESSED_DATE_FORMAT).to_string()
}

/// Every calendar date from `start` through `end`, ascending. Empty when `start > end`.
pub fn date_range_inclusive(start: NaiveDate, end: NaiveDate) -> Vec<NaiveDate> {
    start.iter_days().take_while(|date| *date <= end).collect()
}
