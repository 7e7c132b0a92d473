use anyhow::{Context, Result};
use clap::Parser;
use coldreach::cli::{handle_command, Cli, Command};
use coldreach::core::ConfigManager;
use std::fs::OpenOptions;
use tracing::info;

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter, Layer};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Optional JSON log file next to the console output
    let json_layer = match std::env::var("COLDREACH_LOG_FILE") {
        Ok(path) => {
            let file = OpenOptions::new()
                .create(true)
                .write(true)
                .truncate(true)
                .open(&path)
                .with_context(|| format!("Failed to open log file {}", path))?;
            Some(
                fmt::layer()
                    .json()
                    .with_writer(file)
                    .with_current_span(false)
                    .with_span_list(false)
                    .boxed(),
            )
        }
        Err(_) => None,
    };

    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(json_layer)
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("coldreach=info,rocket::server=off")),
        )
        .init();

    let config = ConfigManager::load()?;
    config.ensure_directories().await?;

    info!("Environment: {}", ConfigManager::environment());
    info!("Database: {}", config.database_path.display());

    handle_command(cli.command.unwrap_or(Command::Serve), config).await
}
