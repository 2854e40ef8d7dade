// Incremental extraction run orchestrates one scheduled job execution.
//
// Responsibilities
// - Read the watermark log once and refuse a foreign schema before any extraction work.
// - Resolve the window. The sentinel window ends the run without extracting or writing.
// - Hand the window to the extraction pipeline and record the dates it processed.
// - Write the merged log once, at the end. An aborted run leaves the stored log as it was.

use crate::modules::watermarks::adapters::outbound::watermark_repository::{
    FileFormat, WatermarkRepository, WriteOutcome,
};
use crate::modules::watermarks::core::window::ExtractionWindow;
use crate::modules::watermarks::use_cases::errors::ApplicationError;
use crate::modules::watermarks::use_cases::resolve_extraction_window::handler::parse_first_date;
use crate::modules::watermarks::use_cases::resolve_extraction_window::resolve::resolve_extraction_window;
use crate::modules::watermarks::use_cases::run_incremental_extraction::pipeline_port::ExtractionPipeline;
use crate::modules::watermarks::use_cases::update_watermark_log::update::{
    ensure_expected_schema, update_watermark_log,
};
use crate::shared::core::clock::Clock;
use chrono::NaiveDate;
use std::sync::Arc;
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunOutcome {
    NoWorkNeeded,
    Completed {
        window: ExtractionWindow,
        dates_processed: Vec<NaiveDate>,
        write: WriteOutcome,
    },
}

pub struct RunIncrementalExtractionHandler<TRepository, TPipeline, TClock>
where
    TRepository: WatermarkRepository + ?Sized,
    TPipeline: ExtractionPipeline + ?Sized,
    TClock: Clock + ?Sized,
{
    meta_key: String,
    format: FileFormat,
    repository: Arc<TRepository>,
    pipeline: Arc<TPipeline>,
    clock: Arc<TClock>,
}

impl<TRepository, TPipeline, TClock> RunIncrementalExtractionHandler<TRepository, TPipeline, TClock>
where
    TRepository: WatermarkRepository + ?Sized,
    TPipeline: ExtractionPipeline + ?Sized,
    TClock: Clock + ?Sized,
{
    pub fn new(
        meta_key: impl Into<String>,
        format: FileFormat,
        repository: Arc<TRepository>,
        pipeline: Arc<TPipeline>,
        clock: Arc<TClock>,
    ) -> Self {
        Self {
            meta_key: meta_key.into(),
            format,
            repository,
            pipeline,
            clock,
        }
    }

    #[tracing::instrument(
        name = "extraction_run",
        skip(self),
        fields(run_id = %Uuid::now_v7(), meta_key = %self.meta_key)
    )]
    pub async fn handle(&self, first_date: &str) -> Result<RunOutcome, ApplicationError> {
        let first_date = parse_first_date(first_date)?;

        let existing = self.repository.read(&self.meta_key).await?;
        match &existing {
            Some(log) => ensure_expected_schema(log)?,
            None => tracing::info!("no watermark log found, cold start"),
        }

        let window = resolve_extraction_window(first_date, existing.as_ref(), self.clock.today());
        if window.is_no_work_needed() {
            tracing::info!("every date is already processed, nothing to extract");
            return Ok(RunOutcome::NoWorkNeeded);
        }
        tracing::info!(
            window_start = %window.window_start,
            dates = window.dates_to_process.len(),
            "extracting"
        );

        let dates_processed = self.pipeline.extract(&window).await?;

        let merged = update_watermark_log(
            &dates_processed,
            existing.as_ref(),
            self.clock.run_timestamp(),
        )?;
        let write = self
            .repository
            .write(&merged, &self.meta_key, self.format)
            .await?;
        tracing::info!(processed = dates_processed.len(), ?write, "extraction run completed");

        Ok(RunOutcome::Completed {
            window,
            dates_processed,
            write,
        })
    }
}

#[cfg(test)]
mod run_incremental_extraction_handler_tests {
    use super::*;
    use crate::modules::watermarks::adapters::outbound::watermark_repository_object_storage::ObjectStorageWatermarkRepository;
    use crate::modules::watermarks::use_cases::update_watermark_log::update::UpdateError;
    use crate::shared::core::clock::FixedClock;
    use crate::shared::infrastructure::object_storage::ObjectStorage;
    use crate::shared::infrastructure::object_storage::in_memory::InMemoryObjectStorage;
    use crate::tests::fixtures::pipeline::RecordingPipeline;
    use crate::tests::fixtures::watermark_log::{WatermarkLogBuilder, date, dates, timestamp};
    use bytes::Bytes;
    use rstest::{fixture, rstest};

    const META_KEY: &str = "meta/meta_file.csv";

    type Repository = ObjectStorageWatermarkRepository<InMemoryObjectStorage>;
    type Handler = RunIncrementalExtractionHandler<Repository, RecordingPipeline, FixedClock>;

    struct Context {
        storage: Arc<InMemoryObjectStorage>,
        repository: Arc<Repository>,
        pipeline: Arc<RecordingPipeline>,
        handler: Handler,
    }

    fn make_context(pipeline: RecordingPipeline) -> Context {
        let storage = Arc::new(InMemoryObjectStorage::new());
        let repository = Arc::new(ObjectStorageWatermarkRepository::new(storage.clone()));
        let pipeline = Arc::new(pipeline);
        let clock = Arc::new(FixedClock(timestamp("20240120_081500")));
        let handler = RunIncrementalExtractionHandler::new(
            META_KEY,
            FileFormat::Csv,
            repository.clone(),
            pipeline.clone(),
            clock,
        );
        Context {
            storage,
            repository,
            pipeline,
            handler,
        }
    }

    #[fixture]
    fn before_each() -> Context {
        make_context(RecordingPipeline::new())
    }

    #[rstest]
    #[tokio::test]
    async fn it_should_extract_everything_and_create_the_log_on_cold_start(before_each: Context) {
        let context = before_each;
        let outcome = context.handler.handle("2024-01-10").await.unwrap();
        let expected_dates = dates("2024-01-09", "2024-01-20");
        assert_eq!(
            outcome,
            RunOutcome::Completed {
                window: ExtractionWindow {
                    window_start: date("2024-01-10"),
                    dates_to_process: expected_dates.clone(),
                },
                dates_processed: expected_dates.clone(),
                write: WriteOutcome::Written { rows: 12 },
            }
        );
        let stored = context.repository.read(META_KEY).await.unwrap().unwrap();
        assert_eq!(stored.len(), 12);
        assert!(
            stored
                .records()
                .iter()
                .all(|r| r.processed_date == timestamp("20240120_081500"))
        );
    }

    #[rstest]
    #[tokio::test]
    async fn it_should_close_a_gap_and_append_to_the_log(before_each: Context) {
        let context = before_each;
        let existing = WatermarkLogBuilder::new()
            .days("2024-01-09", "2024-01-20")
            .except("2024-01-12")
            .build();
        context
            .repository
            .write(&existing, META_KEY, FileFormat::Csv)
            .await
            .unwrap();

        context.handler.handle("2024-01-10").await.unwrap();

        let windows = context.pipeline.windows.lock().await;
        assert_eq!(windows.len(), 1);
        assert_eq!(windows[0].window_start, date("2024-01-12"));
        assert_eq!(windows[0].dates_to_process, dates("2024-01-11", "2024-01-20"));
        let stored = context.repository.read(META_KEY).await.unwrap().unwrap();
        assert_eq!(stored.len(), existing.len() + 10);
        assert_eq!(&stored.records()[..existing.len()], existing.records());
    }

    #[rstest]
    #[tokio::test]
    async fn it_should_do_nothing_when_every_date_is_processed(before_each: Context) {
        let context = before_each;
        let existing = WatermarkLogBuilder::new()
            .days("2024-01-09", "2024-01-20")
            .build();
        context
            .repository
            .write(&existing, META_KEY, FileFormat::Csv)
            .await
            .unwrap();
        let before = context.storage.get(META_KEY).await.unwrap();

        let outcome = context.handler.handle("2024-01-10").await.unwrap();

        assert_eq!(outcome, RunOutcome::NoWorkNeeded);
        assert!(context.pipeline.windows.lock().await.is_empty());
        assert_eq!(context.storage.get(META_KEY).await.unwrap(), before);
    }

    #[rstest]
    #[tokio::test]
    async fn it_should_abort_before_extracting_when_the_log_has_a_foreign_schema(
        before_each: Context,
    ) {
        let context = before_each;
        let foreign = Bytes::from_static(b"a,b\n1,2\n");
        context.storage.put(META_KEY, foreign.clone()).await.unwrap();

        let result = context.handler.handle("2024-01-10").await;

        assert!(matches!(
            result,
            Err(ApplicationError::SchemaMismatch(UpdateError::SchemaMismatch { .. }))
        ));
        assert!(context.pipeline.windows.lock().await.is_empty());
        assert_eq!(context.storage.get(META_KEY).await.unwrap(), Some(foreign));
    }

    #[rstest]
    #[tokio::test]
    async fn it_should_not_write_the_log_when_the_pipeline_fails() {
        let context = make_context(RecordingPipeline::failing());
        let result = context.handler.handle("2024-01-10").await;
        assert!(matches!(result, Err(ApplicationError::Pipeline(_))));
        assert!(
            result
                .unwrap_err()
                .to_string()
                .contains("Source bucket unreachable")
        );
        assert_eq!(context.storage.get(META_KEY).await.unwrap(), None);
    }

    #[rstest]
    #[tokio::test]
    async fn it_should_reject_an_invalid_first_date(before_each: Context) {
        let context = before_each;
        let result = context.handler.handle("2024/01/10").await;
        assert!(matches!(result, Err(ApplicationError::InvalidDate { .. })));
        assert!(context.pipeline.windows.lock().await.is_empty());
    }
}
