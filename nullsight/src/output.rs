//! Report rendering and output.
//!
//! Reports render as pretty-printed JSON or as a Markdown document and are
//! written to a file or to stdout.

use std::fmt::Write as _;
use std::path::Path;

use anyhow::Context;
use chrono::SecondsFormat;
use clap::ValueEnum;
use nullsight_core::NullsightError;
use nullsight_core::quality::{QualityReport, ViolationSeverity};
use tokio::io::AsyncWriteExt;

/// Available report formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// JSON structured output
    Json,
    /// Markdown document
    Markdown,
}

/// Renders a report in the requested format.
///
/// # Errors
/// Returns an error if serialization fails.
pub fn render_report(report: &QualityReport, format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => render_json(report),
        OutputFormat::Markdown => {
            render_markdown(report).context("Failed to render Markdown report")
        }
    }
}

/// Renders a report as pretty-printed JSON.
///
/// # Errors
/// Returns an error if serialization fails.
pub fn render_json(report: &QualityReport) -> anyhow::Result<String> {
    let mut json = serde_json::to_string_pretty(report)
        .map_err(|e| NullsightError::serialization("Quality report", e))?;
    json.push('\n');
    Ok(json)
}

/// Renders a report as a Markdown document.
///
/// # Errors
/// Only fails if writing into the string buffer fails.
pub fn render_markdown(report: &QualityReport) -> Result<String, std::fmt::Error> {
    let mut md = String::new();
    let summary = &report.summary;

    writeln!(md, "# Dataset Quality Report")?;
    writeln!(md)?;
    writeln!(
        md,
        "Analyzed at {}",
        report.analyzed_at.to_rfc3339_opts(SecondsFormat::Secs, true)
    )?;
    writeln!(md)?;

    writeln!(md, "## Summary")?;
    writeln!(md)?;
    writeln!(md, "| Metric | Value |")?;
    writeln!(md, "|---|---|")?;
    writeln!(md, "| Rows | {} |", summary.total_rows)?;
    writeln!(md, "| Fields | {} |", summary.total_fields)?;
    writeln!(md, "| Cells | {} |", summary.total_cells)?;
    writeln!(
        md,
        "| Missing cells | {} ({:.2}%) |",
        summary.missing_cells, summary.missing_ratio
    )?;
    writeln!(
        md,
        "| Rows with missing values | {} ({:.2}%) |",
        summary.rows_with_missing, summary.rows_with_missing_ratio
    )?;
    writeln!(md, "| Complete rows | {} |", summary.complete_rows)?;
    writeln!(
        md,
        "| Rows missing one field | {} |",
        summary.single_missing_rows
    )?;
    writeln!(
        md,
        "| Rows missing several fields | {} |",
        summary.multi_missing_rows
    )?;
    writeln!(md)?;

    writeln!(md, "## Fields")?;
    writeln!(md)?;
    if report.column_statistics.is_empty() {
        writeln!(md, "_No fields declared._")?;
    } else {
        writeln!(
            md,
            "| Field | Missing | Present | Unique | Missing % | Unique % |"
        )?;
        writeln!(md, "|---|---:|---:|---:|---:|---:|")?;
        for stats in &report.column_statistics {
            writeln!(
                md,
                "| {} | {} | {} | {} | {:.2} | {:.2} |",
                escape_cell(&stats.field),
                stats.missing_count,
                stats.present_count,
                stats.unique_count,
                stats.missing_rate,
                stats.unique_rate
            )?;
        }
    }
    writeln!(md)?;

    writeln!(md, "## Most Missing Fields")?;
    writeln!(md)?;
    if report.correlations.top_fields.is_empty() {
        writeln!(md, "_No fields declared._")?;
    }
    for (rank, field) in report.correlations.top_fields.iter().enumerate() {
        writeln!(
            md,
            "{}. {}: {} missing",
            rank + 1,
            code_span(&field.field),
            field.missing_count
        )?;
    }
    writeln!(md)?;

    writeln!(md, "## Correlated Missingness")?;
    writeln!(md)?;
    match &report.correlations.best_pair {
        Some(best) => {
            writeln!(
                md,
                "Most similar pair: {} / {} (Jaccard {:.3})",
                code_span(&best.field_a),
                code_span(&best.field_b),
                best.jaccard
            )?;
            writeln!(md)?;
            writeln!(md, "| Field A | Field B | Jaccard |")?;
            writeln!(md, "|---|---|---:|")?;
            for pair in &report.correlations.top_pairs {
                writeln!(
                    md,
                    "| {} | {} | {:.3} |",
                    escape_cell(&pair.field_a),
                    escape_cell(&pair.field_b),
                    pair.jaccard
                )?;
            }
        }
        None => writeln!(md, "_Fewer than two fields; no pairs to compare._")?,
    }
    writeln!(md)?;

    writeln!(md, "## Threshold Violations")?;
    writeln!(md)?;
    if report.threshold_violations.is_empty() {
        writeln!(md, "All fields are within the missing-rate threshold.")?;
    }
    for violation in &report.threshold_violations {
        let severity = match violation.severity {
            ViolationSeverity::Warning => "warning",
            ViolationSeverity::Critical => "critical",
        };
        writeln!(
            md,
            "- **{}** {}: {:.2}% missing (threshold {:.2}%)",
            severity,
            code_span(&violation.field),
            violation.actual,
            violation.threshold
        )?;
    }
    writeln!(md)?;

    writeln!(md, "## Matching Rows")?;
    writeln!(md)?;
    if report.rows.len() as u64 == report.matched_rows {
        writeln!(md, "{} rows matched.", report.matched_rows)?;
    } else {
        writeln!(
            md,
            "{} rows matched; showing the first {}.",
            report.matched_rows,
            report.rows.len()
        )?;
    }
    if !report.rows.is_empty() && !report.fields.is_empty() {
        writeln!(md)?;
        write!(md, "| Row |")?;
        for field in &report.fields {
            write!(md, " {} |", escape_cell(field))?;
        }
        writeln!(md)?;
        write!(md, "|---:|")?;
        for _ in &report.fields {
            write!(md, "---|")?;
        }
        writeln!(md)?;
        for row in &report.rows {
            write!(md, "| {} |", row.row_index)?;
            for value in &row.values {
                write!(md, " {} |", escape_cell(&value.to_string()))?;
            }
            writeln!(md)?;
        }
    }

    Ok(md)
}

/// Escapes characters that would break a Markdown table cell.
fn escape_cell(text: &str) -> String {
    text.replace('|', "\\|").replace('\n', " ")
}

/// Wraps text in an inline code span whose fence outlasts any backtick run
/// inside it.
fn code_span(text: &str) -> String {
    let text = text.replace('\n', " ");
    let longest_run = text
        .split(|c| c != '`')
        .map(str::len)
        .max()
        .unwrap_or(0);
    let fence = "`".repeat(longest_run + 1);
    if longest_run == 0 {
        format!("{}{}{}", fence, text, fence)
    } else {
        format!("{} {} {}", fence, text, fence)
    }
}

/// Writes rendered output to a file, or to stdout when no path is given.
///
/// # Errors
/// Returns an error if the file or stdout cannot be written.
pub async fn write_output(content: &str, output_path: Option<&Path>) -> anyhow::Result<()> {
    match output_path {
        Some(path) => {
            tokio::fs::write(path, content).await.map_err(|e| {
                NullsightError::io(format!("Failed to write to {}", path.display()), e)
            })?;
            tracing::info!("✓ Report saved to {}", path.display());
        }
        None => {
            let mut stdout = tokio::io::stdout();
            stdout
                .write_all(content.as_bytes())
                .await
                .context("Failed to write to stdout")?;
            stdout.flush().await.context("Failed to flush stdout")?;
        }
    }
    Ok(())
}
