//! ai-inventory: command-line front-end for the AI use-case inventory
//!
//! Renders the dashboard, searchable list, detail view and audit trail
//! over an in-process store seeded from the configured catalog.

mod commands;
mod format;

use std::sync::Arc;

use clap::Parser;
use tracing::info;

use usecase_inventory::{InventoryConfig, SystemClock, UseCaseStore};

use commands::InventoryCommands;

#[derive(Parser)]
#[command(name = "ai-inventory")]
#[command(about = "Browse and manage the AI use-case inventory")]
struct Cli {
    /// Path to YAML configuration file
    #[arg(short, long, env = "AI_INVENTORY_CONFIG")]
    config: Option<String>,

    /// Emit JSON instead of text
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: InventoryCommands,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => InventoryConfig::load(path)?,
        None => InventoryConfig::default(),
    };

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                tracing_subscriber::EnvFilter::new(format!(
                    "usecase_inventory={level},ai_inventory={level}",
                    level = config.general.log_level
                ))
            }),
        )
        .init();

    info!(config = ?cli.config, "Starting ai-inventory");

    let store = UseCaseStore::from_config(&config, Arc::new(SystemClock))?;

    match commands::execute_command(&store, &config, cli.command, cli.json).await {
        Ok(output) => {
            println!("{}", output);
            Ok(())
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}
