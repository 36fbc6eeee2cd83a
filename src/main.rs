//! Churn Prep - Main Entry Point
//!
//! Loads the raw churn CSV, preprocesses it and writes the numeric table.

use churn_prep::cli::{cmd_preprocess, Cli};
use clap::Parser;
use colored::*;
use tracing_subscriber::EnvFilter;

fn main() {
    let cli = Cli::parse();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_new(format!("churn_prep={}", cli.log_level))
                .unwrap_or_else(|_| EnvFilter::new("churn_prep=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = cmd_preprocess(&cli) {
        eprintln!();
        eprintln!("  {} {:#}", "error".red().bold(), e);
        std::process::exit(1);
    }
}
