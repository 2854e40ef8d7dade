// Resolves the extraction window for the next run from the stored watermark log.
//
// Responsibilities
// - Normalize the caller's first date (YYYY-MM-DD) to a calendar date.
// - Read the log once. A missing log is a cold start.
// - Evaluate "today" once and delegate to the pure resolver.

use crate::modules::watermarks::adapters::outbound::watermark_repository::WatermarkRepository;
use crate::modules::watermarks::core::window::ExtractionWindow;
use crate::modules::watermarks::use_cases::errors::ApplicationError;
use crate::modules::watermarks::use_cases::resolve_extraction_window::resolve::resolve_extraction_window;
use crate::shared::core::clock::Clock;
use crate::shared::core::primitives::parse_source_date;
use chrono::NaiveDate;
use std::sync::Arc;

pub fn parse_first_date(value: &str) -> Result<NaiveDate, ApplicationError> {
    parse_source_date(value).map_err(|source| ApplicationError::InvalidDate {
        value: value.to_string(),
        source,
    })
}

pub struct ResolveExtractionWindowHandler<TRepository, TClock>
where
    TRepository: WatermarkRepository + ?Sized,
    TClock: Clock + ?Sized,
{
    meta_key: String,
    repository: Arc<TRepository>,
    clock: Arc<TClock>,
}

impl<TRepository, TClock> ResolveExtractionWindowHandler<TRepository, TClock>
where
    TRepository: WatermarkRepository + ?Sized,
    TClock: Clock + ?Sized,
{
    pub fn new(meta_key: impl Into<String>, repository: Arc<TRepository>, clock: Arc<TClock>) -> Self {
        Self {
            meta_key: meta_key.into(),
            repository,
            clock,
        }
    }

    pub async fn handle(&self, first_date: &str) -> Result<ExtractionWindow, ApplicationError> {
        let first_date = parse_first_date(first_date)?;
        let log = self.repository.read(&self.meta_key).await?;
        if log.is_none() {
            tracing::info!(meta_key = %self.meta_key, "no watermark log found, cold start");
        }

        let window = resolve_extraction_window(first_date, log.as_ref(), self.clock.today());
        if window.is_no_work_needed() {
            tracing::info!(meta_key = %self.meta_key, "every date is already processed");
        } else {
            tracing::info!(
                window_start = %window.window_start,
                dates = window.dates_to_process.len(),
                "extraction window resolved"
            );
        }
        Ok(window)
    }
}
