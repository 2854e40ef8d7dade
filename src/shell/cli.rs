use crate::modules::watermarks::adapters::outbound::watermark_repository::FileFormat;
use crate::modules::watermarks::core::window::ExtractionWindow;
use crate::shared::core::primitives::format_source_date;
use crate::shell::config::StorageArgs;
use clap::{Parser, Subcommand};
use serde::Serialize;

/// Incremental extraction scheduler for batch ETL runs.
#[derive(Debug, Parser)]
#[command(name = "incremental_extraction", version, about, long_about = None)]
pub struct Cli {
    #[command(flatten)]
    pub storage: StorageArgs,

    /// Key of the watermark log inside the storage location.
    #[arg(long, env = "WATERMARK_META_KEY", default_value = "meta/meta_file.csv")]
    pub meta_key: String,

    /// Format used when writing the watermark log (csv or parquet).
    #[arg(long, env = "WATERMARK_FORMAT", default_value = "csv")]
    pub format: FileFormat,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Print the extraction window for the next run as JSON.
    Plan {
        /// Earliest source date the job cares about (YYYY-MM-DD).
        #[arg(long, env = "WATERMARK_FIRST_DATE")]
        first_date: String,
    },

    /// Record source dates processed by a finished run in the watermark log.
    Commit {
        /// Comma separated source dates (YYYY-MM-DD).
        #[arg(long, value_delimiter = ',')]
        dates: Vec<String>,
    },

    /// List object keys under a prefix, for example the source files of a date.
    List {
        #[arg(long, default_value = "")]
        prefix: String,
    },
}

#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct WindowPlan {
    pub window_start: String,
    pub dates_to_process: Vec<String>,
    pub no_work_needed: bool,
}

impl From<&ExtractionWindow> for WindowPlan {
    fn from(window: &ExtractionWindow) -> Self {
        Self {
            window_start: format_source_date(window.window_start),
            dates_to_process: window
                .dates_to_process
                .iter()
                .copied()
                .map(format_source_date)
                .collect(),
            no_work_needed: window.is_no_work_needed(),
        }
    }
}
