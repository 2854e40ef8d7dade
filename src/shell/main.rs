use anyhow::Context;
use clap::Parser;
use std::sync::Arc;
use tracing_subscriber::{EnvFilter, fmt};

use incremental_extraction::modules::watermarks::adapters::outbound::watermark_repository::WriteOutcome;
use incremental_extraction::modules::watermarks::adapters::outbound::watermark_repository_object_storage::ObjectStorageWatermarkRepository;
use incremental_extraction::modules::watermarks::use_cases::resolve_extraction_window::handler::ResolveExtractionWindowHandler;
use incremental_extraction::modules::watermarks::use_cases::update_watermark_log::handler::UpdateWatermarkLogHandler;
use incremental_extraction::shared::core::clock::SystemClock;
use incremental_extraction::shared::core::primitives::parse_source_date;
use incremental_extraction::shared::infrastructure::object_storage::ObjectStorage;
use incremental_extraction::shared::infrastructure::object_storage::object_store_backed::ObjectStoreStorage;
use incremental_extraction::shell::cli::{Cli, Commands, WindowPlan};
use incremental_extraction::shell::config::build_object_store;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    fmt().with_env_filter(EnvFilter::from_default_env()).init();

    let cli = Cli::parse();

    let storage: Arc<dyn ObjectStorage> =
        Arc::new(ObjectStoreStorage::new(build_object_store(&cli.storage)?));
    let repository = Arc::new(ObjectStorageWatermarkRepository::new(storage.clone()));
    let clock = Arc::new(SystemClock);

    match cli.command {
        Commands::Plan { first_date } => {
            let handler = ResolveExtractionWindowHandler::new(&cli.meta_key, repository, clock);
            let window = handler.handle(&first_date).await?;
            println!("{}", serde_json::to_string_pretty(&WindowPlan::from(&window))?);
        }
        Commands::Commit { dates } => {
            let dates = dates
                .iter()
                .map(|d| parse_source_date(d).with_context(|| format!("invalid date '{d}'")))
                .collect::<anyhow::Result<Vec<_>>>()?;
            let handler =
                UpdateWatermarkLogHandler::new(&cli.meta_key, cli.format, repository, clock);
            match handler.handle(&dates).await? {
                WriteOutcome::Written { rows } => {
                    println!("watermark log {} written with {rows} rows", cli.meta_key)
                }
                WriteOutcome::SkippedEmpty => {
                    println!("watermark log {} is empty, nothing written", cli.meta_key)
                }
            }
        }
        Commands::List { prefix } => {
            for key in storage.list(&prefix).await? {
                println!("{key}");
            }
        }
    }
    Ok(())
}
