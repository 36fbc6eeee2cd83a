//! Churn preprocessing CLI module
//!
//! Command-line interface for the load → preprocess → save run.

use anyhow::Context;
use clap::Parser;
use colored::*;
use std::path::PathBuf;
use std::time::Instant;
use tracing::info;

use crate::error::PrepError;
use crate::preprocessing::{DataPreprocessor, PipelineReport, PreprocessingConfig, ScalerType};
use crate::utils::{DataLoader, DataSaver};

// ─── Styling helpers ───────────────────────────────────────────────────────────

fn dim(s: &str) -> ColoredString    { s.truecolor(100, 100, 100) }
fn accent(s: &str) -> ColoredString { s.truecolor(120, 170, 255) }
fn muted(s: &str) -> ColoredString  { s.truecolor(140, 140, 140) }
fn ok(s: &str) -> ColoredString     { s.truecolor(100, 210, 120) }

fn step_ok(msg: &str) {
    println!("  {} {}", ok("✓"), msg);
}

fn step_run(msg: &str) {
    print!("  {} {}... ", accent("›"), msg);
}

fn step_done(detail: &str) {
    println!("{} {}", ok("done"), dim(detail));
}

fn section(title: &str) {
    println!();
    println!("  {}", title.white().bold());
    println!("  {}", dim(&"─".repeat(56)));
}

// ─── CLI definition ────────────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(name = "churn-prep")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Clean and encode a customer-churn CSV into a model-ready numeric table")]
#[command(long_about = None)]
pub struct Cli {
    /// Raw input CSV file
    #[arg(short, long, default_value = "../Telco-Customer-Churn_raw.csv")]
    pub input: PathBuf,

    /// Output CSV file (overwritten)
    #[arg(short, long, default_value = "telco_churn_clean.csv")]
    pub output: PathBuf,

    /// JSON preprocessing config; defaults match the Telco churn layout
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Write a JSON run report to this path
    #[arg(long)]
    pub report: Option<PathBuf>,

    /// Scaler type (standard, minmax, none), overrides the config
    #[arg(long)]
    pub scaler: Option<String>,

    /// Field delimiter for input and output
    #[arg(long, default_value = ",")]
    pub delimiter: char,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    pub log_level: String,
}

fn parse_scaler(value: &str) -> Result<ScalerType, PrepError> {
    match value.to_lowercase().as_str() {
        "standard" => Ok(ScalerType::Standard),
        "minmax" => Ok(ScalerType::MinMax),
        "none" => Ok(ScalerType::None),
        _ => Err(PrepError::InvalidParameter {
            name: "scaler".to_string(),
            value: value.to_string(),
            reason: "expected standard, minmax or none".to_string(),
        }),
    }
}

fn parse_delimiter(value: char) -> Result<u8, PrepError> {
    if value.is_ascii() && value != '\n' && value != '"' {
        Ok(value as u8)
    } else {
        Err(PrepError::InvalidParameter {
            name: "delimiter".to_string(),
            value: value.to_string(),
            reason: "must be a single ASCII character other than newline or quote".to_string(),
        })
    }
}

/// Build the pipeline configuration from the config file and CLI overrides
pub fn resolve_config(cli: &Cli) -> anyhow::Result<PreprocessingConfig> {
    let mut config = match &cli.config {
        Some(path) => PreprocessingConfig::from_json_file(path)?,
        None => PreprocessingConfig::default(),
    };
    if let Some(scaler) = &cli.scaler {
        config = config.with_scaler(parse_scaler(scaler)?);
    }
    config.validate()?;
    Ok(config)
}

// ─── Commands ──────────────────────────────────────────────────────────────────

/// Load, preprocess and save once.
///
/// Nothing is written unless loading and preprocessing both succeed.
pub fn cmd_preprocess(cli: &Cli) -> anyhow::Result<PipelineReport> {
    section("Preprocess");

    let config = resolve_config(cli)?;
    let delimiter = parse_delimiter(cli.delimiter)?;
    let loader = DataLoader::new().with_delimiter(delimiter);

    let file_info = loader.get_file_info(&cli.input)?;
    info!(
        path = %file_info.path,
        bytes = file_info.file_size,
        columns = file_info.columns.len(),
        "Reading input"
    );

    step_run("Loading data");
    let df = loader.load_csv(&cli.input)?;
    step_done(&format!("{} rows × {} cols", df.height(), df.width()));

    step_run("Processing");
    let start = Instant::now();
    let mut preprocessor = DataPreprocessor::with_config(config);
    let mut processed = preprocessor.fit_transform(&df)?;
    step_done(&format!("{:?}", start.elapsed()));

    step_run(&format!("Saving → {}", cli.output.display()));
    DataSaver::save_csv(&mut processed, &cli.output, delimiter)
        .with_context(|| format!("writing {}", cli.output.display()))?;
    step_done(&format!("{} rows × {} cols", processed.height(), processed.width()));

    let report = preprocessor.report().cloned().unwrap_or_default();
    if let Some(path) = &cli.report {
        DataSaver::save_json_report(&report, path)
            .with_context(|| format!("writing report {}", path.display()))?;
        step_ok(&format!("Report → {}", path.display()));
    }

    println!();
    println!(
        "  {:<16} {}",
        muted("Final shape"),
        format!("({}, {})", processed.height(), processed.width()).white().bold()
    );
    println!();

    Ok(report)
}
