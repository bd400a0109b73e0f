//! Main application entry point (CLI binary).
//!
//! This is a thin wrapper around the `image_backfiller` library that handles:
//! - Command-line argument parsing
//! - Environment variable loading (.env file)
//! - Logger initialization
//! - User-facing output formatting
//!
//! All core functionality is implemented in the library crate.

use anyhow::{Context, Result};
use clap::Parser;
use std::process;

use image_backfiller::config::{Cli, Command};
use image_backfiller::initialization::init_logger_with;
use image_backfiller::{run_backfill, Config};

#[tokio::main]
async fn main() -> Result<()> {
    // Environment defaults (RUST_LOG and friends) may come from a .env file
    let _ = dotenvy::dotenv();

    let Cli { command } = Cli::parse();
    let Command::Get(args) = command;

    let config = match Config::try_from(args) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("image_backfiller error: {e}");
            process::exit(1);
        }
    };

    init_logger_with(config.effective_log_level(), config.log_format.clone())
        .context("Failed to initialize logger")?;

    match run_backfill(config).await {
        Ok(report) => {
            println!(
                "Complete! {} post{} processed, {} updated{}.",
                report.posts_seen,
                if report.posts_seen == 1 { "" } else { "s" },
                report.posts_modified,
                if report.dry_run { " (dry run, nothing saved)" } else { "" }
            );
            if report.stats.fetch_failed > 0 || report.stats.persist_failed > 0 {
                println!(
                    "{} download{} and {} save{} failed - see the log for details",
                    report.stats.fetch_failed,
                    if report.stats.fetch_failed == 1 { "" } else { "s" },
                    report.stats.persist_failed,
                    if report.stats.persist_failed == 1 { "" } else { "s" },
                );
            }
            Ok(())
        }
        Err(e) => {
            eprintln!("image_backfiller error: {:#}", e);
            process::exit(1);
        }
    }
}
