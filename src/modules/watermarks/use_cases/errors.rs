use crate::modules::watermarks::adapters::outbound::watermark_repository::StorageError;
use crate::modules::watermarks::use_cases::update_watermark_log::update::UpdateError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApplicationError {
    #[error("invalid date '{value}': expected YYYY-MM-DD")]
    InvalidDate {
        value: String,
        #[source]
        source: chrono::ParseError,
    },

    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error(transparent)]
    SchemaMismatch(#[from] UpdateError),

    #[error(transparent)]
    Pipeline(#[from] anyhow::Error),
}
