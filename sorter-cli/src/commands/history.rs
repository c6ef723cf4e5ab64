//! History command implementation.
//!
//! This module implements the `history` command, which displays the newest
//! accepted moves in various formats (table, JSON, CSV, TSV). The same
//! formatters print the report of a `sort` run.

use crate::error::CliError;
use crate::utils::{format_timestamp, load_configuration, open_database, shorten_path, GlobalOptions};
use clap::{Args, ValueEnum};
use sorter::{HistoryEntry, HistoryLog};
use std::io::Write;

/// Column headers for CSV/TSV output.
const COLUMN_HEADERS: [&str; 6] = ["id", "batch", "filename", "source", "destination", "added_at"];

/// Show the most recent moves.
#[derive(Args)]
pub struct HistoryCommand {
    /// Number of entries to show
    #[arg(long, short = 'n', default_value_t = 20, value_name = "N")]
    pub count: usize,

    /// Output format
    #[arg(
        long,
        value_enum,
        default_value = "table",
        env = "SORTER_OUTPUT_FORMAT",
        ignore_case = true
    )]
    pub format: OutputFormat,

    /// Show full paths instead of shortened forms
    #[arg(long)]
    pub show_full_paths: bool,
}

/// Output format for move listings.
#[derive(Clone, Copy, ValueEnum)]
#[value(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Tab-separated table format (human-readable)
    Table,
    /// JSON format
    Json,
    /// CSV format
    Csv,
    /// TSV format (tab-separated values)
    Tsv,
}

impl HistoryCommand {
    /// Execute the history command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let config = load_configuration(global)?;
        let db = open_database(global, &config)?;
        let entries = db.recent(self.count).map_err(CliError::from)?;
        print_entries(&entries, self.format, self.show_full_paths)
    }
}

/// Print history entries to stdout in `format`.
pub fn print_entries(
    entries: &[HistoryEntry],
    format: OutputFormat,
    show_full: bool,
) -> Result<(), CliError> {
    match format {
        OutputFormat::Table => format_as_table(entries, show_full),
        OutputFormat::Json => format_as_json(entries),
        OutputFormat::Csv => format_as_delimited(entries, b','),
        OutputFormat::Tsv => format_as_delimited(entries, b'\t'),
    }
}

/// Format entries as a human-readable table.
fn format_as_table(entries: &[HistoryEntry], show_full: bool) -> Result<(), CliError> {
    let stdout = std::io::stdout();
    let mut handle = stdout.lock();

    let header_line = COLUMN_HEADERS
        .iter()
        .map(|s| s.to_uppercase())
        .collect::<Vec<_>>()
        .join("\t");
    writeln!(handle, "{header_line}")?;

    let display = |path: &std::path::Path| {
        if show_full {
            path.display().to_string()
        } else {
            shorten_path(path)
        }
    };

    for entry in entries {
        writeln!(
            handle,
            "{}\t{}\t{}\t{}\t{}\t{}",
            entry.id,
            entry.batch,
            entry.filename,
            display(&entry.source),
            display(&entry.destination),
            format_timestamp(entry.added_at),
        )?;
    }

    Ok(())
}

/// Format entries as JSON.
fn format_as_json(entries: &[HistoryEntry]) -> Result<(), CliError> {
    let stdout = std::io::stdout();
    let mut handle = stdout.lock();

    let json_data: Vec<serde_json::Value> = entries
        .iter()
        .map(|e| {
            serde_json::json!({
                "id": e.id,
                "batch": e.batch,
                "filename": e.filename,
                "source": e.source.display().to_string(),
                "destination": e.destination.display().to_string(),
                "added_at": format_timestamp(e.added_at),
                "last_modified": format_timestamp(e.last_modified),
            })
        })
        .collect();

    serde_json::to_writer_pretty(&mut handle, &json_data)
        .map_err(|e| CliError::Io(std::io::Error::new(std::io::ErrorKind::Other, e)))?;
    writeln!(handle)?;

    Ok(())
}

/// Convert csv::Error to CliError.
fn csv_error(e: csv::Error) -> CliError {
    CliError::Io(std::io::Error::new(std::io::ErrorKind::Other, e))
}

/// Format entries as delimited output (CSV or TSV).
fn format_as_delimited(entries: &[HistoryEntry], delimiter: u8) -> Result<(), CliError> {
    let stdout = std::io::stdout();
    let handle = stdout.lock();
    let mut writer = csv::WriterBuilder::new()
        .delimiter(delimiter)
        .from_writer(handle);

    writer.write_record(COLUMN_HEADERS).map_err(csv_error)?;
    for entry in entries {
        writer
            .write_record(&[
                entry.id.to_string(),
                entry.batch.to_string(),
                entry.filename.clone(),
                entry.source.display().to_string(),
                entry.destination.display().to_string(),
                format_timestamp(entry.added_at),
            ])
            .map_err(csv_error)?;
    }
    writer.flush()?;

    Ok(())
}
