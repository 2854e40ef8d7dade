// WatermarkRepository over any ObjectStorage backend.
//
// Responsibilities
// - Decode the stored log with the codec matching its payload, whatever the key says.
// - Translate a missing object into `Ok(None)` for the cold start path.
// - Skip writing an empty log and say so in the logs and the outcome.

use crate::modules::watermarks::adapters::outbound::log_codec;
use crate::modules::watermarks::adapters::outbound::watermark_repository::{
    FileFormat, StorageError, WatermarkRepository, WriteOutcome,
};
use crate::modules::watermarks::core::log::WatermarkLog;
use crate::shared::infrastructure::object_storage::ObjectStorage;
use std::sync::Arc;

pub struct ObjectStorageWatermarkRepository<TStorage>
where
    TStorage: ObjectStorage + ?Sized,
{
    storage: Arc<TStorage>,
}

impl<TStorage> ObjectStorageWatermarkRepository<TStorage>
where
    TStorage: ObjectStorage + ?Sized,
{
    pub fn new(storage: Arc<TStorage>) -> Self {
        Self { storage }
    }
}

#[async_trait::async_trait]
impl<TStorage> WatermarkRepository for ObjectStorageWatermarkRepository<TStorage>
where
    TStorage: ObjectStorage + ?Sized,
{
    async fn read(&self, key: &str) -> Result<Option<WatermarkLog>, StorageError> {
        tracing::info!(key, "reading watermark log");
        let Some(bytes) = self.storage.get(key).await? else {
            return Ok(None);
        };
        let format = FileFormat::detect(&bytes);
        let log = log_codec::decode(bytes, format).map_err(|e| {
            StorageError::Malformed {
                key: key.to_string(),
                reason: e.to_string(),
            }
        })?;
        Ok(Some(log))
    }

    async fn write(
        &self,
        log: &WatermarkLog,
        key: &str,
        format: FileFormat,
    ) -> Result<WriteOutcome, StorageError> {
        if log.is_empty() {
            tracing::info!(key, "the watermark log is empty, no file will be written");
            return Ok(WriteOutcome::SkippedEmpty);
        }
        let body = log_codec::encode(log, format).map_err(|e| StorageError::Encode {
            key: key.to_string(),
            reason: e.to_string(),
        })?;
        tracing::info!(key, %format, rows = log.len(), "writing watermark log");
        self.storage.put(key, body).await?;
        Ok(WriteOutcome::Written { rows: log.len() })
    }
}
