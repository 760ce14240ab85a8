//! Library module for the nullsight command-line tool
//!
//! This module exposes the CLI definition and command handlers for testing
//! purposes. The binary entry point is in main.rs.

pub mod output;

use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Args, Parser, Subcommand, ValueEnum};
use nullsight_core::quality::{AnalysisConfig, FilterPredicate, QualityAnalyzer, QualityReport};
use nullsight_core::{Dataset, LogFormat, NullsightError, parse_dataset_document};
use tracing::{info, warn};

use crate::output::{OutputFormat, render_report, write_output};

/// CLI argument structure
#[derive(Debug, Parser)]
#[command(name = "nullsight")]
#[command(about = "Dataset quality reports: missing values, uniqueness and correlated gaps")]
#[command(version)]
#[command(long_about = "
nullsight - Offline dataset quality analysis

Reads a JSON dataset document and reports:
- Per-field missing and unique counts and rates
- Fields with the most missing values
- Field pairs whose values tend to be missing together (Jaccard similarity)
- Row completeness (complete, single-missing, multi-missing rows)
- Rows matching a missing-value or uniqueness filter

A value is missing when it is null, absent, NaN or a blank string.

EXAMPLES:
  nullsight validate --input customers.json
  nullsight analyze --input customers.json --missing-field email
  nullsight analyze --input customers.json --unique-field id --format markdown --output report.md
")]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalArgs,

    #[command(subcommand)]
    pub command: Command,
}

/// Available CLI commands
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Analyze a dataset document and produce a quality report
    Analyze(AnalyzeArgs),
    /// Validate a dataset document without analyzing it
    Validate(ValidateArgs),
}

/// Flags shared by every command
#[derive(Debug, Args)]
pub struct GlobalArgs {
    /// Increase verbosity
    #[arg(
        short,
        long,
        global = true,
        action = clap::ArgAction::Count,
        help = "Increase verbosity (-v, -vv, -vvv)"
    )]
    pub verbose: u8,

    /// Suppress output
    #[arg(short, long, global = true, help = "Suppress all logs except errors")]
    pub quiet: bool,

    /// Log line format
    #[arg(long, global = true, value_enum, default_value_t = LogFormatArg::Text)]
    pub log_format: LogFormatArg,
}

/// Log line formats selectable from the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogFormatArg {
    /// Human-readable lines
    Text,
    /// One JSON object per event
    Json,
}

impl From<LogFormatArg> for LogFormat {
    fn from(arg: LogFormatArg) -> Self {
        match arg {
            LogFormatArg::Text => Self::Text,
            LogFormatArg::Json => Self::Json,
        }
    }
}

/// Arguments for `nullsight analyze`
#[derive(Debug, Args)]
pub struct AnalyzeArgs {
    /// Dataset document to analyze
    #[arg(short, long, value_name = "FILE")]
    pub input: PathBuf,

    /// Keep rows where any field is missing
    #[arg(long, conflicts_with = "missing_field")]
    pub missing_any: bool,

    /// Keep rows where this field is missing
    #[arg(long, value_name = "FIELD")]
    pub missing_field: Option<String>,

    /// Keep rows whose value in this field occurs exactly once
    #[arg(long, value_name = "FIELD")]
    pub unique_field: Option<String>,

    /// Maximum number of matching rows included in the report
    #[arg(long, value_name = "N")]
    pub limit: Option<usize>,

    /// Number of most-missing fields to report
    #[arg(long, value_name = "N")]
    pub top_fields: Option<usize>,

    /// Number of most-correlated field pairs to report
    #[arg(long, value_name = "N")]
    pub top_pairs: Option<usize>,

    /// Missing rate (percent) above which a field is flagged
    #[arg(long, value_name = "PCT")]
    pub missing_threshold: Option<f64>,

    /// Report format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Json)]
    pub format: OutputFormat,

    /// Output file path (stdout when omitted)
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,
}

impl AnalyzeArgs {
    /// Builds the row filter from the filter flags.
    pub fn predicate(&self) -> FilterPredicate {
        let mut predicate = FilterPredicate::new();
        if self.missing_any {
            predicate = predicate.with_missing_any();
        } else if let Some(field) = &self.missing_field {
            predicate = predicate.with_missing_in(field.as_str());
        }
        if let Some(field) = &self.unique_field {
            predicate = predicate.with_unique_in(field.as_str());
        }
        predicate
    }

    /// Builds the analysis configuration, starting from the defaults.
    pub fn config(&self) -> AnalysisConfig {
        let mut config = AnalysisConfig::new();
        if let Some(limit) = self.limit {
            config = config.with_preview_row_limit(limit);
        }
        if let Some(limit) = self.top_fields {
            config = config.with_top_fields_limit(limit);
        }
        if let Some(limit) = self.top_pairs {
            config = config.with_top_pairs_limit(limit);
        }
        if let Some(threshold) = self.missing_threshold {
            config = config.with_missing_rate_max(threshold);
        }
        config
    }
}

/// Arguments for `nullsight validate`
#[derive(Debug, Args)]
pub struct ValidateArgs {
    /// Dataset document to validate
    #[arg(short, long, value_name = "FILE")]
    pub input: PathBuf,
}

/// Runs the parsed command line.
///
/// # Errors
/// Returns an error if the input cannot be read or validated, the analysis
/// configuration is invalid, or the report cannot be written.
pub async fn execute(cli: &Cli) -> anyhow::Result<()> {
    match &cli.command {
        Command::Analyze(args) => {
            let report = analyze(args).await?;
            if let Some(path) = &args.output {
                println!("Report written to {}", path.display());
                println!(
                    "Rows: {}  Fields: {}  Matched rows: {}",
                    report.analyzed_rows, report.analyzed_fields, report.matched_rows
                );
            }
            Ok(())
        }
        Command::Validate(args) => {
            let dataset = validate(args).await?;
            println!("Dataset document is valid: {}", args.input.display());
            println!("Fields: {}", dataset.field_count());
            println!("Rows: {}", dataset.row_count());
            Ok(())
        }
    }
}

/// Reads and validates a dataset document from disk.
///
/// # Errors
/// Returns an error if the file cannot be read or the document is invalid.
pub async fn load_dataset(path: &Path) -> anyhow::Result<Dataset> {
    let text = tokio::fs::read_to_string(path).await.map_err(|e| {
        NullsightError::io(
            format!("Failed to read dataset document {}", path.display()),
            e,
        )
    })?;

    let dataset = parse_dataset_document(&text)
        .map_err(|e| NullsightError::validation(path.display().to_string(), e))?;

    Ok(dataset)
}

/// Handles `nullsight analyze`: load, analyze, render and write the report.
///
/// # Errors
/// See [`execute`].
pub async fn analyze(args: &AnalyzeArgs) -> anyhow::Result<QualityReport> {
    info!("Analyzing {}", args.input.display());

    let dataset = load_dataset(&args.input).await?;
    info!(
        "Loaded {} rows across {} fields",
        dataset.row_count(),
        dataset.field_count()
    );

    let analyzer = QualityAnalyzer::new(args.config());
    let report = analyzer
        .analyze(&dataset, &args.predicate())
        .context("Quality analysis failed")?;

    for violation in &report.threshold_violations {
        warn!(
            "Missing rate of '{}' is {:.2}% (threshold: {:.2}%)",
            violation.field, violation.actual, violation.threshold
        );
    }
    if report.threshold_violations.is_empty() {
        info!("Analysis completed - all fields within the missing-rate threshold");
    } else {
        info!(
            "Analysis completed with {} threshold violations",
            report.threshold_violations.len()
        );
    }

    let rendered = render_report(&report, args.format)?;
    write_output(&rendered, args.output.as_deref()).await?;

    Ok(report)
}

/// Handles `nullsight validate`.
///
/// # Errors
/// Returns an error if the file cannot be read or the document is invalid.
pub async fn validate(args: &ValidateArgs) -> anyhow::Result<Dataset> {
    info!("Validating {}", args.input.display());
    let dataset = load_dataset(&args.input).await?;
    info!("✓ Dataset document validation passed");
    Ok(dataset)
}
