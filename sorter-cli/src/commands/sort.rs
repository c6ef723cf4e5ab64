//! Sort command implementation.

use crate::commands::history::{print_entries, OutputFormat};
use crate::error::CliError;
use crate::utils::{load_configuration, open_database, resolve_path, GlobalOptions, LoggerSink};
use clap::Args;
use sorter::{init_logger, SortEngine, SortOptions, SortReport};
use std::path::PathBuf;

/// Sort a folder into extension and category folders.
#[derive(Args)]
pub struct SortCommand {
    /// Folder to sort (defaults to the current directory)
    #[arg(value_name = "SOURCE")]
    pub source: Option<PathBuf>,

    /// Folder to sort into (defaults to SOURCE)
    #[arg(long, value_name = "DIR")]
    pub dest: Option<PathBuf>,

    /// Also sort every subfolder, removing folders left empty
    #[arg(long, short)]
    pub recursive: bool,

    /// Group files into category folders
    #[arg(long, short)]
    pub group: bool,

    /// Add an extension folder below each group folder
    #[arg(long)]
    pub by_extension: bool,

    /// Collect files (with --group) and folders into this folder
    #[arg(long, value_name = "NAME")]
    pub group_folder: Option<String>,

    /// Only sort entries whose names contain these words; also names the
    /// group folder when --group-folder is not given
    #[arg(long, short, value_name = "TEXT")]
    pub search: Option<String>,

    /// File extensions to sort, comma separated (`*` for all)
    #[arg(long, short = 't', value_name = "EXT", value_delimiter = ',')]
    pub types: Vec<String>,

    /// Output format for the moves made
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

impl SortCommand {
    /// Execute the sort command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let config = load_configuration(global)?;
        let logger = init_logger(global.verbose, global.quiet);

        let source = resolve_path(self.source)?;
        let destination = self.dest.map(|d| resolve_path(Some(d))).transpose()?;
        let file_types = if self.types.is_empty() {
            config.file_types().to_vec()
        } else {
            self.types
        };

        let options = SortOptions::new(source)
            .with_destination(destination)
            .with_recursive(self.recursive || config.recursive.unwrap_or(false))
            .with_group(self.group || config.group.unwrap_or(false))
            .with_by_extension(self.by_extension || config.by_extension.unwrap_or(false))
            .with_group_folder_name(self.group_folder)
            .with_search(self.search)
            .with_file_types(file_types);

        let mut db = open_database(global, &config)?;
        let mut sink = LoggerSink::new(logger);
        let report = SortEngine::with_relocator(&mut db, &mut sink, config.file_relocator())
            .run(&options)
            .map_err(|e| {
                // A quiet sink swallows the error event, so let main print it.
                if global.quiet {
                    CliError::Library(e)
                } else {
                    CliError::SortFailed(e)
                }
            })?;

        print_entries(&report.entries, self.format, self.show_full_paths)?;
        if !global.quiet {
            eprintln!("{}", summary(&report));
        }
        Ok(())
    }
}

fn summary(report: &SortReport) -> String {
    let mut line = format!(
        "Moved {} file(s): {} already in place, {} could not be moved",
        report.moved, report.unchanged, report.blocked
    );
    if report.folders_merged > 0 {
        line.push_str(&format!(", {} folder(s) merged", report.folders_merged));
    }
    if report.folders_removed > 0 {
        line.push_str(&format!(", {} empty folder(s) removed", report.folders_removed));
    }
    line
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_mentions_folders_only_when_touched() {
        let report = SortReport {
            moved: 2,
            ..SortReport::default()
        };
        assert_eq!(
            summary(&report),
            "Moved 2 file(s): 0 already in place, 0 could not be moved"
        );

        let report = SortReport {
            folders_merged: 1,
            folders_removed: 3,
            ..SortReport::default()
        };
        assert!(summary(&report).ends_with("1 folder(s) merged, 3 empty folder(s) removed"));
    }
}
