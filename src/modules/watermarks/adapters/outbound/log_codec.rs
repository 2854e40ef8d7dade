// Encoding of the watermark log into stored objects.
//
// Structure
// - csv_codec.rs: header row plus one line per record.
// - parquet_codec.rs: a single row group.
// Both formats store the two columns as text: source_date as YYYY-MM-DD and processed_date
// as YYYYMMDD_HHMMSS. Decoding maps columns by name, so a stored column order is kept.

pub mod csv_codec;
pub mod parquet_codec;

use crate::modules::watermarks::adapters::outbound::watermark_repository::FileFormat;
use crate::modules::watermarks::core::log::{
    PROCESSED_DATE_COL, SOURCE_DATE_COL, WatermarkLog, WatermarkRecord, has_expected_columns,
};
use crate::shared::core::primitives::{
    format_processed_date, format_source_date, parse_processed_date, parse_source_date,
};
use arrow::array::{Array as _, ArrayRef, StringArray};
use arrow::datatypes::{DataType, Field, Schema, SchemaRef};
use arrow::error::ArrowError;
use arrow::record_batch::RecordBatch;
use bytes::Bytes;
use parquet::errors::ParquetError;
use std::sync::Arc;
use thiserror::Error;

#[derive(Debug, Error)]
#[error("{0}")]
pub struct CodecError(pub String);

impl From<ArrowError> for CodecError {
    fn from(error: ArrowError) -> Self {
        CodecError(error.to_string())
    }
}

impl From<ParquetError> for CodecError {
    fn from(error: ParquetError) -> Self {
        CodecError(error.to_string())
    }
}

pub fn encode(log: &WatermarkLog, format: FileFormat) -> Result<Bytes, CodecError> {
    let batch = to_record_batch(log)?;
    match format {
        FileFormat::Csv => csv_codec::encode(&batch),
        FileFormat::Parquet => parquet_codec::encode(&batch),
    }
}

pub fn decode(bytes: Bytes, format: FileFormat) -> Result<WatermarkLog, CodecError> {
    match format {
        FileFormat::Csv => csv_codec::decode(bytes),
        FileFormat::Parquet => parquet_codec::decode(bytes),
    }
}

fn text_schema(columns: &[String]) -> SchemaRef {
    Arc::new(Schema::new(
        columns
            .iter()
            .map(|name| Field::new(name, DataType::Utf8, true))
            .collect::<Vec<_>>(),
    ))
}

fn to_record_batch(log: &WatermarkLog) -> Result<RecordBatch, CodecError> {
    if !log.has_expected_schema() {
        return Err(CodecError(format!(
            "cannot encode a log with columns {:?}",
            log.columns()
        )));
    }
    let records = log.records();
    let arrays: Vec<ArrayRef> = log
        .columns()
        .iter()
        .map(|column| -> ArrayRef {
            let values: Vec<String> = if column == SOURCE_DATE_COL {
                records.iter().map(|r| format_source_date(r.source_date)).collect()
            } else {
                records
                    .iter()
                    .map(|r| format_processed_date(r.processed_date))
                    .collect()
            };
            Arc::new(StringArray::from(values))
        })
        .collect();
    Ok(RecordBatch::try_new(text_schema(log.columns()), arrays)?)
}

/// A log with a foreign column set decodes to those columns and no records.
fn from_record_batches(
    columns: Vec<String>,
    batches: &[RecordBatch],
) -> Result<WatermarkLog, CodecError> {
    if !has_expected_columns(&columns) {
        return Ok(WatermarkLog::with_columns(columns, Vec::new()));
    }
    let mut records = Vec::new();
    for batch in batches {
        let source_dates = string_column(batch, SOURCE_DATE_COL)?;
        let processed_dates = string_column(batch, PROCESSED_DATE_COL)?;
        for row in 0..batch.num_rows() {
            records.push(WatermarkRecord {
                source_date: parse_cell(source_dates, row, SOURCE_DATE_COL, parse_source_date)?,
                processed_date: parse_cell(
                    processed_dates,
                    row,
                    PROCESSED_DATE_COL,
                    parse_processed_date,
                )?,
            });
        }
    }
    Ok(WatermarkLog::with_columns(columns, records))
}

fn string_column<'a>(batch: &'a RecordBatch, name: &str) -> Result<&'a StringArray, CodecError> {
    let idx = batch
        .schema()
        .index_of(name)
        .map_err(|e| CodecError(format!("missing column '{name}': {e}")))?;
    batch
        .column(idx)
        .as_any()
        .downcast_ref::<StringArray>()
        .ok_or_else(|| CodecError(format!("column '{name}' is not text")))
}

fn parse_cell<T>(
    array: &StringArray,
    row: usize,
    name: &str,
    parse: fn(&str) -> Result<T, chrono::ParseError>,
) -> Result<T, CodecError> {
    if array.is_null(row) {
        return Err(CodecError(format!("row {row}: missing {name}")));
    }
    let value = array.value(row);
    parse(value).map_err(|e| CodecError(format!("row {row}: invalid {name} '{value}': {e}")))
}
