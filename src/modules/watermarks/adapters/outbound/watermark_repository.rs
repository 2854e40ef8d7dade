// Watermark repository port: where a run reads its log from and writes it back to.
//
// Contract
// - `read` returns `Ok(None)` when nothing is stored under the key. That is the cold start
//   signal, not a failure.
// - `write` of an empty log persists nothing and reports `WriteOutcome::SkippedEmpty`.
// - Any other storage fault propagates unchanged as `StorageError`.

use crate::modules::watermarks::core::log::WatermarkLog;
use crate::shared::infrastructure::object_storage::ObjectStorageError;
use async_trait::async_trait;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error(transparent)]
    Backend(#[from] ObjectStorageError),

    #[error("malformed watermark log at '{key}': {reason}")]
    Malformed { key: String, reason: String },

    #[error("failed to encode watermark log for '{key}': {reason}")]
    Encode { key: String, reason: String },

    #[error("the file format '{0}' is not supported")]
    UnsupportedFormat(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileFormat {
    Csv,
    Parquet,
}

impl FileFormat {
    pub fn extension(self) -> &'static str {
        match self {
            FileFormat::Csv => "csv",
            FileFormat::Parquet => "parquet",
        }
    }

    /// Format of a stored object, judged by its payload. Parquet files start and end with
    /// the `PAR1` magic. Anything else is read as CSV.
    pub fn detect(payload: &[u8]) -> Self {
        const PARQUET_MAGIC: &[u8] = b"PAR1";
        if payload.len() >= 2 * PARQUET_MAGIC.len()
            && payload.starts_with(PARQUET_MAGIC)
            && payload.ends_with(PARQUET_MAGIC)
        {
            FileFormat::Parquet
        } else {
            FileFormat::Csv
        }
    }
}

impl fmt::Display for FileFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

impl FromStr for FileFormat {
    type Err = StorageError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "csv" => Ok(FileFormat::Csv),
            "parquet" => Ok(FileFormat::Parquet),
            _ => Err(StorageError::UnsupportedFormat(value.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteOutcome {
    Written { rows: usize },
    SkippedEmpty,
}

#[async_trait]
pub trait WatermarkRepository: Send + Sync {
    async fn read(&self, key: &str) -> Result<Option<WatermarkLog>, StorageError>;
    async fn write(
        &self,
        log: &WatermarkLog,
        key: &str,
        format: FileFormat,
    ) -> Result<WriteOutcome, StorageError>;
}
