use crate::modules::watermarks::core::window::ExtractionWindow;
use async_trait::async_trait;
use chrono::NaiveDate;

/// The business extraction and transformation for one run. Implemented outside this crate.
///
/// Receives a window with work in it and returns the source dates it actually processed.
/// Those dates are what gets recorded in the watermark log.
#[async_trait]
pub trait ExtractionPipeline: Send + Sync {
    async fn extract(&self, window: &ExtractionWindow) -> anyhow::Result<Vec<NaiveDate>>;
}
