//! Dataset quality analysis tool.
//!
//! This binary reads a JSON dataset document and reports missing values,
//! uniqueness, correlated missingness between fields and row completeness.
//!
//! # Guarantees
//! - Offline operation: no network access
//! - The input document is never modified
//! - Reports go to stdout or the requested file; logs go to stderr

use clap::Parser;
use nullsight::{Cli, execute};
use nullsight_core::{init_logging, initialize_dataset_validator};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    init_logging(cli.global.verbose, cli.global.quiet, cli.global.log_format.into())?;

    // Compile the dataset document schema up front
    initialize_dataset_validator()?;

    execute(&cli).await
}
