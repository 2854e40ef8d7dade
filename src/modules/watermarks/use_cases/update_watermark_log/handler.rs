// Records the source dates of a finished extraction in the stored watermark log.
//
// Responsibilities
// - Read the current log once (absent on cold start).
// - Merge with the pure writer, stamping the clock's run timestamp.
// - Write the merged log once. Nothing is written if the merge fails.

use crate::modules::watermarks::adapters::outbound::watermark_repository::{
    FileFormat, WatermarkRepository, WriteOutcome,
};
use crate::modules::watermarks::use_cases::errors::ApplicationError;
use crate::modules::watermarks::use_cases::update_watermark_log::update::update_watermark_log;
use crate::shared::core::clock::Clock;
use chrono::NaiveDate;
use std::sync::Arc;

pub struct UpdateWatermarkLogHandler<TRepository, TClock>
where
    TRepository: WatermarkRepository + ?Sized,
    TClock: Clock + ?Sized,
{
    meta_key: String,
    format: FileFormat,
    repository: Arc<TRepository>,
    clock: Arc<TClock>,
}

impl<TRepository, TClock> UpdateWatermarkLogHandler<TRepository, TClock>
where
    TRepository: WatermarkRepository + ?Sized,
    TClock: Clock + ?Sized,
{
    pub fn new(
        meta_key: impl Into<String>,
        format: FileFormat,
        repository: Arc<TRepository>,
        clock: Arc<TClock>,
    ) -> Self {
        Self {
            meta_key: meta_key.into(),
            format,
            repository,
            clock,
        }
    }

    pub async fn handle(
        &self,
        dates_processed: &[NaiveDate],
    ) -> Result<WriteOutcome, ApplicationError> {
        let existing = self.repository.read(&self.meta_key).await?;
        let merged = update_watermark_log(
            dates_processed,
            existing.as_ref(),
            self.clock.run_timestamp(),
        )?;
        let outcome = self
            .repository
            .write(&merged, &self.meta_key, self.format)
            .await?;
        tracing::info!(
            meta_key = %self.meta_key,
            appended = dates_processed.len(),
            ?outcome,
            "watermark log updated"
        );
        Ok(outcome)
    }
}
