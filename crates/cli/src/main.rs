//! # pinsev-cli
//!
//! Command-line interface for the PiN/Severity pipeline.

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use colored::Colorize;
use pinsev_core::{save_records, Pipeline, PipelineConfig, PipelineReport};
use pinsev_http::config::{DEFAULT_ADMIN_LEVEL, DEFAULT_BASE_URL, DEFAULT_PAGE_LIMIT};
use pinsev_http::{BoundaryReport, HapiClient, HapiConfig};
use std::path::PathBuf;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

/// pinsev - PiN/Severity workbooks to JSON records
#[derive(Parser, Debug)]
#[command(name = "pinsev")]
#[command(author, version, about = "PiN/Severity workbook to JSON records", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Convert a PiN/Severity workbook into JSON records
    Convert(ConvertArgs),
    /// Download administrative boundaries for every HAPI location
    Boundaries(BoundariesArgs),
}

#[derive(Args, Debug)]
struct ConvertArgs {
    /// Workbook with the PiN and Severity tabs
    #[arg(value_name = "INPUT")]
    input: PathBuf,

    /// JSON file to write
    #[arg(short, long, value_name = "OUTPUT")]
    output: PathBuf,

    /// YAML file overriding sectors, regions and sheet layout
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Write compact JSON instead of pretty-printed
    #[arg(long)]
    compact: bool,
}

#[derive(Args, Debug)]
struct BoundariesArgs {
    /// Directory receiving one itos-{code}.geojson per country
    #[arg(long, value_name = "DIR")]
    out_dir: PathBuf,

    /// HAPI app identifier
    #[arg(long, env = "HAPI_APP_IDENTIFIER")]
    app_identifier: String,

    /// HAPI base URL
    #[arg(long, env = "HAPI_BASE_URL", default_value = DEFAULT_BASE_URL)]
    base_url: String,

    /// Page size for location queries
    #[arg(long, default_value_t = DEFAULT_PAGE_LIMIT)]
    limit: usize,

    /// Administrative level of the boundaries
    #[arg(long, default_value_t = DEFAULT_ADMIN_LEVEL)]
    admin_level: u8,

    /// Request timeout in seconds
    #[arg(long, default_value_t = 30)]
    timeout: u64,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    if cli.verbose {
        tracing_subscriber::fmt()
            .with_env_filter(
                EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
            )
            .init();
    }

    match cli.command {
        Command::Convert(args) => run_convert(&args),
        Command::Boundaries(args) => run_boundaries(&args).await,
    }
}

/// Run the pipeline over a workbook and write the records.
fn run_convert(args: &ConvertArgs) -> Result<()> {
    let config = match &args.config {
        Some(path) => PipelineConfig::from_yaml_file(path)
            .with_context(|| format!("Failed to load config: {}", path.display()))?,
        None => PipelineConfig::default(),
    };
    let pipeline = Pipeline::new(config).context("Invalid configuration")?;

    let output = pipeline
        .run_workbook(&args.input)
        .with_context(|| format!("Failed to convert {}", args.input.display()))?;
    save_records(&args.output, &output.records, !args.compact)
        .with_context(|| format!("Failed to write {}", args.output.display()))?;

    for line in convert_summary(&output.report) {
        println!("{line}");
    }
    println!("{} {}", "Wrote".green().bold(), args.output.display());
    Ok(())
}

/// Page HAPI for location codes and download their boundaries.
async fn run_boundaries(args: &BoundariesArgs) -> Result<()> {
    let config = HapiConfig::new(args.app_identifier.as_str())
        .with_base_url(args.base_url.as_str())
        .with_limit(args.limit)
        .with_admin_level(args.admin_level)
        .with_timeout(Duration::from_secs(args.timeout));
    let client = HapiClient::new(config)?;

    let codes = client
        .fetch_location_codes()
        .await
        .context("Failed to fetch location codes")?;
    println!("{} {} location codes", "Found".cyan().bold(), codes.len());

    let report = client.download_boundaries(codes.as_slice(), &args.out_dir).await;
    for line in boundary_summary(&report) {
        println!("{line}");
    }
    Ok(())
}

fn convert_summary(report: &PipelineReport) -> Vec<String> {
    let mut lines = vec![
        format!("{} {}", "Records:".cyan().bold(), report.records),
        format!(
            "{} {} matched, {} unmatched",
            "Severity:".cyan().bold(),
            report.join.matched,
            report.join.unmatched
        ),
    ];
    if report.missing_keys > 0 {
        lines.push(format!(
            "{} {} PiN rows have no P-Code",
            "Warning:".yellow().bold(),
            report.missing_keys
        ));
    }
    if !report.join.ambiguous.is_empty() {
        lines.push(format!(
            "{} duplicate Severity keys: {}",
            "Warning:".yellow().bold(),
            report.join.ambiguous.join(", ")
        ));
    }
    for (column, count) in &report.coercion.skipped {
        lines.push(format!(
            "{} {count} non-numeric cells in '{column}' set to null",
            "Warning:".yellow().bold()
        ));
    }
    lines
}

fn boundary_summary(report: &BoundaryReport) -> Vec<String> {
    let mut lines = vec![format!("{} {} files", "Saved".green().bold(), report.saved.len())];
    for (code, reason) in &report.failed {
        lines.push(format!("{} {code}: {reason}", "Failed".red().bold()));
    }
    lines
}
