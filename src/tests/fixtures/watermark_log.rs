// Shared test fixtures for watermark logs.
// Compiled into the crate only during tests (cfg(test) in src/lib.rs).

use crate::modules::watermarks::core::log::{WatermarkLog, WatermarkRecord};
use crate::shared::core::primitives::{date_range_inclusive, parse_processed_date, parse_source_date};
use chrono::{NaiveDate, NaiveDateTime};

pub const DEFAULT_PROCESSED_AT: &str = "20240120_060000";

pub fn date(value: &str) -> NaiveDate {
    parse_source_date(value).unwrap()
}

pub fn timestamp(value: &str) -> NaiveDateTime {
    parse_processed_date(value).unwrap()
}

pub fn dates(from: &str, to: &str) -> Vec<NaiveDate> {
    date_range_inclusive(date(from), date(to))
}

pub struct WatermarkLogBuilder {
    records: Vec<WatermarkRecord>,
    processed_at: NaiveDateTime,
}

impl Default for WatermarkLogBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl WatermarkLogBuilder {
    pub fn new() -> Self {
        Self {
            records: Vec::new(),
            processed_at: timestamp(DEFAULT_PROCESSED_AT),
        }
    }

    pub fn processed_at(mut self, v: &str) -> Self {
        self.processed_at = timestamp(v);
        self
    }

    /// One record per day from `from` through `to`, stamped with the current `processed_at`.
    pub fn days(mut self, from: &str, to: &str) -> Self {
        let processed_date = self.processed_at;
        self.records.extend(dates(from, to).into_iter().map(|source_date| WatermarkRecord {
            source_date,
            processed_date,
        }));
        self
    }

    pub fn except(mut self, v: &str) -> Self {
        let skipped = date(v);
        self.records.retain(|r| r.source_date != skipped);
        self
    }

    pub fn record(mut self, source_date: &str, processed_date: &str) -> Self {
        self.records.push(WatermarkRecord {
            source_date: date(source_date),
            processed_date: timestamp(processed_date),
        });
        self
    }

    pub fn build(self) -> WatermarkLog {
        WatermarkLog::new(self.records)
    }
}

#[cfg(test)]
mod watermark_log_builder_tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn it_should_build_one_record_per_day_without_the_excluded_day() {
        let log = WatermarkLogBuilder::new()
            .days("2024-01-09", "2024-01-13")
            .except("2024-01-12")
            .build();
        assert_eq!(log.len(), 4);
        assert!(!log.processed_source_dates().contains(&date("2024-01-12")));
        assert!(
            log.records()
                .iter()
                .all(|r| r.processed_date == timestamp(DEFAULT_PROCESSED_AT))
        );
    }

    #[rstest]
    fn it_should_append_explicit_records_in_order() {
        let log = WatermarkLogBuilder::new()
            .record("2024-01-10", "20240111_010203")
            .processed_at("20240112_000000")
            .days("2024-01-11", "2024-01-11")
            .build();
        assert_eq!(log.records()[0].processed_date, timestamp("20240111_010203"));
        assert_eq!(log.records()[1].source_date, date("2024-01-11"));
        assert_eq!(log.records()[1].processed_date, timestamp("20240112_000000"));
    }
}
