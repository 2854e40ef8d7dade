// Test doubles for the ExtractionPipeline port.

use crate::modules::watermarks::core::window::ExtractionWindow;
use crate::modules::watermarks::use_cases::run_incremental_extraction::pipeline_port::ExtractionPipeline;
use chrono::NaiveDate;
use tokio::sync::Mutex;

/// Processes every date it is handed and remembers each window it saw.
#[derive(Default)]
pub struct RecordingPipeline {
    pub windows: Mutex<Vec<ExtractionWindow>>,
    is_failing: bool,
}

impl RecordingPipeline {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing() -> Self {
        Self {
            is_failing: true,
            ..Self::default()
        }
    }
}

#[async_trait::async_trait]
impl ExtractionPipeline for RecordingPipeline {
    async fn extract(&self, window: &ExtractionWindow) -> anyhow::Result<Vec<NaiveDate>> {
        self.windows.lock().await.push(window.clone());
        if self.is_failing {
            return Err(anyhow::anyhow!("Source bucket unreachable"));
        }
        Ok(window.dates_to_process.clone())
    }
}
