// src/main.rs

//! sgbot CLI
//!
//! Local execution entry point: loads the TOML configuration, builds the
//! site client, and runs the entry engine until it is stopped or the
//! session cookie goes stale.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use sgbot::{
    error::Result,
    models::Config,
    notifier::LogNotifier,
    services::{EntryEngine, SteamGiftsClient},
};

/// sgbot - SteamGifts auto-entry bot
#[derive(Parser, Debug)]
#[command(name = "sgbot", version, about = "Automated giveaway entry for steamgifts.com")]
struct Cli {
    /// Path to the TOML configuration file
    #[arg(short, long, default_value = "config.toml")]
    config: PathBuf,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the entry loop until stopped
    Run,

    /// Validate the configuration file
    Validate,
}

/// Initialize logging based on verbosity flag.
fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp_secs()
        .init();
}

/// Main entry point for the CLI application.
#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = Config::load_or_default(&cli.config);

    match cli.command {
        Command::Validate => {
            log::info!("Validating configuration...");
            if let Err(e) = config.validate() {
                log::error!("Config validation failed: {}", e);
                return Err(e);
            }
            log::info!("✓ Config OK ({} priority filters)", config.priorities.len());
        }

        Command::Run => {
            config.validate()?;
            log::info!(
                "sgbot starting with {} priority filters, min points {}",
                config.priorities.len(),
                config.min_points
            );

            let client = SteamGiftsClient::new(&config)?;
            let mut engine = EntryEngine::new(config, client, LogNotifier);

            // Runs until externally terminated or the cookie goes stale.
            engine.run().await?;
        }
    }

    Ok(())
}
