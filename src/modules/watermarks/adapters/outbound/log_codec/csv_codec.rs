use super::{CodecError, from_record_batches, text_schema};
use crate::modules::watermarks::core::log::{WatermarkLog, has_expected_columns};
use arrow::csv::reader::Format;
use arrow::csv::{ReaderBuilder, WriterBuilder};
use arrow::record_batch::RecordBatch;
use bytes::Bytes;

pub fn encode(batch: &RecordBatch) -> Result<Bytes, CodecError> {
    let mut writer = WriterBuilder::new().with_header(true).build(Vec::new());
    writer.write(batch)?;
    Ok(Bytes::from(writer.into_inner()))
}

pub fn decode(bytes: Bytes) -> Result<WatermarkLog, CodecError> {
    // Header only: a foreign schema is returned as is without parsing its rows.
    let (header, _) = Format::default()
        .with_header(true)
        .infer_schema(bytes.as_ref(), Some(0))?;
    let columns: Vec<String> = header.fields().iter().map(|f| f.name().to_string()).collect();
    if !has_expected_columns(&columns) {
        return Ok(WatermarkLog::with_columns(columns, Vec::new()));
    }

    let reader = ReaderBuilder::new(text_schema(&columns))
        .with_header(true)
        .build(bytes.as_ref())?;
    let batches = reader.collect::<Result<Vec<_>, _>>()?;
    from_record_batches(columns, &batches)
}
