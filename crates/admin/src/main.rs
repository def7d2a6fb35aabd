//! Operator tool for the progression store.
//!
//! A thin caller over [`progression_runtime`]: every subcommand opens the
//! file store, runs one operation and prints the result.
//!
//! Run with: `cargo run -p progression-admin -- <command>`

mod commands;
mod config;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use commands::{Catalog, Create, Equip, Give, Register, Repair, Show, Unequip};
use config::AdminConfig;
use progression_runtime::{Runtime, RuntimeConfig, RuntimeHandle};

/// Maintenance and inspection for character progression data
#[derive(Parser)]
#[command(name = "progression-admin")]
#[command(about = "Operator tools for character progression", long_about = None)]
#[command(version)]
struct Cli {
    /// Store directory (overrides PROGRESSION_DATA_DIR)
    #[arg(short, long, global = true, value_name = "DIR")]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Parser)]
enum Command {
    /// List the item catalog
    Catalog(Catalog),

    /// Register a player or refresh its metadata
    Register(Register),

    /// Create a player's character
    Create(Create),

    /// Give items to a player
    Give(Give),

    /// Equip an item from the inventory
    Equip(Equip),

    /// Empty an equipment slot
    Unequip(Unequip),

    /// Show a player's character, equipment and inventory
    Show(Show),

    /// Remove duplicate equipment rows
    Repair(Repair),
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if it exists (silently ignore if not found)
    let _ = dotenvy::dotenv();

    setup_logging();

    let cli = Cli::parse();
    let config = AdminConfig::from_env().with_data_dir(cli.data_dir);

    let handle = open_runtime(&config)?;
    match cli.command {
        Command::Catalog(cmd) => cmd.execute(&handle),
        Command::Register(cmd) => cmd.execute(&handle).await,
        Command::Create(cmd) => cmd.execute(&handle).await,
        Command::Give(cmd) => cmd.execute(&handle).await,
        Command::Equip(cmd) => cmd.execute(&handle).await,
        Command::Unequip(cmd) => cmd.execute(&handle).await,
        Command::Show(cmd) => cmd.execute(&handle),
        Command::Repair(cmd) => cmd.execute(&handle).await,
    }
}

/// Logs to stderr so command output on stdout stays clean.
fn setup_logging() {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();
}

fn open_runtime(config: &AdminConfig) -> Result<RuntimeHandle> {
    let items = config.load_items()?;
    let progression = config.load_progression()?;

    tracing::debug!("Opening store in {}", config.data_dir().display());
    let runtime = Runtime::builder()
        .config(RuntimeConfig {
            progression,
            data_dir: Some(config.data_dir().to_path_buf()),
            ..RuntimeConfig::default()
        })
        .items(items)
        .build()
        .with_context(|| format!("Failed to open store in {}", config.data_dir().display()))?;

    Ok(runtime.handle())
}
