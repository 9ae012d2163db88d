//! Token Signal Scorer - scores DEX token snapshots and decides on signals

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::{error, info};

// Use the library crate
use token_signal_scorer::cli::commands;
use token_signal_scorer::config::Config;
use token_signal_scorer::Error;

/// Token Signal Scorer - comprehensive token scoring
#[derive(Parser)]
#[command(name = "signal-scorer")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to config file
    #[arg(short, long, default_value = "config.toml", env = "SIGNAL_CONFIG")]
    config: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Score one metrics snapshot (JSON file)
    Score {
        /// Snapshot file
        snapshot: PathBuf,

        /// Print the full evaluation as JSON
        #[arg(long)]
        json: bool,

        /// Reference price for trade plan targets
        #[arg(long)]
        price: Option<f64>,
    },

    /// Score a JSON array of snapshots in parallel
    Batch {
        /// Snapshot array file
        snapshots: PathBuf,

        /// Only list tokens that signal
        #[arg(long)]
        signals_only: bool,
    },

    /// Show current configuration
    Config,
}

fn main() -> Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("token_signal_scorer=info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    // Parse CLI arguments
    let cli = Cli::parse();

    // Load configuration; a malformed rubric is fatal
    let config = match Config::load(&cli.config) {
        Ok(cfg) => cfg,
        Err(e) => {
            let invalid_rubric = e
                .downcast_ref::<Error>()
                .is_some_and(Error::is_config_error);
            if invalid_rubric {
                error!("Invalid scoring configuration in {}: {:#}", cli.config, e);
            } else {
                error!("Failed to load configuration: {:#}", e);
            }
            std::process::exit(1);
        }
    };
    info!("Configuration loaded from {}", cli.config);

    // Execute command
    let result = match cli.command {
        Commands::Score {
            snapshot,
            json,
            price,
        } => commands::score(&config, &snapshot, json, price),
        Commands::Batch {
            snapshots,
            signals_only,
        } => commands::batch(&config, &snapshots, signals_only),
        Commands::Config => commands::show_config(&config),
    };

    if let Err(e) = result {
        error!("Command failed: {:#}", e);
        std::process::exit(1);
    }

    Ok(())
}
