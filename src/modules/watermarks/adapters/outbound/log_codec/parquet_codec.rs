use super::{CodecError, from_record_batches};
use crate::modules::watermarks::core::log::{WatermarkLog, has_expected_columns};
use arrow::record_batch::RecordBatch;
use bytes::Bytes;
use parquet::arrow::ArrowWriter;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use parquet::basic::Compression;
use parquet::file::properties::WriterProperties;

fn writer_properties() -> WriterProperties {
    WriterProperties::builder()
        .set_compression(Compression::SNAPPY)
        .build()
}

pub fn encode(batch: &RecordBatch) -> Result<Bytes, CodecError> {
    let mut buffer = Vec::new();
    let mut writer = ArrowWriter::try_new(&mut buffer, batch.schema(), Some(writer_properties()))?;
    writer.write(batch)?;
    writer.close()?;
    Ok(Bytes::from(buffer))
}

pub fn decode(bytes: Bytes) -> Result<WatermarkLog, CodecError> {
    let builder = ParquetRecordBatchReaderBuilder::try_new(bytes)?;
    let columns: Vec<String> = builder
        .schema()
        .fields()
        .iter()
        .map(|f| f.name().to_string())
        .collect();
    if !has_expected_columns(&columns) {
        return Ok(WatermarkLog::with_columns(columns, Vec::new()));
    }

    let batches = builder.build()?.collect::<Result<Vec<_>, _>>()?;
    from_record_batches(columns, &batches)
}
