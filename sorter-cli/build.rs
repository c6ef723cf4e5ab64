//! Build script for sorter-cli.
//!
//! This script generates a man page at build time using clap_mangen.
//! The generated man page is placed in OUT_DIR for inclusion in release builds.
//!
//! Note: We build a minimal command structure here rather than importing from
//! the main crate, since build scripts cannot depend on the crate being built.

use clap::{Arg, Command};
use clap_mangen::Man;
use std::fs;
use std::path::PathBuf;

/// Build the CLI command structure for man page generation.
///
/// Keep this structure synchronized with src/cli.rs.
fn build_cli() -> Command {
    Command::new("sorter")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Sort files into extension and category folders")
        .long_about(
            "Command-line tool that moves the files of a folder into extension folders, \
             optionally grouped by category, and can undo its runs",
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .help("Enable verbose output")
                .global(true)
                .action(clap::ArgAction::SetTrue),
        )
        .arg(
            Arg::new("quiet")
                .long("quiet")
                .help("Suppress non-essential output")
                .global(true)
                .action(clap::ArgAction::SetTrue),
        )
        .arg(
            Arg::new("data-dir")
                .long("data-dir")
                .help("Override the data directory location")
                .value_name("PATH")
                .global(true)
                .env("SORTER_DATA_DIR"),
        )
        .arg(
            Arg::new("busy-timeout")
                .long("busy-timeout")
                .help("Override the default busy timeout (in seconds)")
                .value_name("SECONDS")
                .global(true)
                .env("SORTER_BUSY_TIMEOUT"),
        )
        .subcommands(vec![
            Command::new("sort")
                .about("Sort a folder into extension and category folders")
                .long_about(
                    "Move the files of a folder into extension folders, optionally grouped \
                     by category, searching subfolders and merging matching folders",
                ),
            Command::new("history")
                .about("Show the most recent moves")
                .long_about("Display the newest recorded moves in various formats"),
            Command::new("undo")
                .about("Move files back to where the latest run found them")
                .long_about("Reverse the moves of the latest run, or of the newest N moves"),
            Command::new("categories")
                .about("List categories and their extensions")
                .long_about("Print the extension table used to classify files"),
            Command::new("show-data-dir")
                .about("Show the resolved data directory path")
                .long_about("Display the path to the sorter data directory"),
            Command::new("validate")
                .about("Validate a configuration file")
                .long_about("Check a sorter configuration file for errors"),
            Command::new("completions")
                .about("Generate shell completion scripts")
                .long_about("Generate shell completion scripts for bash, zsh, fish, or PowerShell"),
        ])
}

fn main() -> std::io::Result<()> {
    let out_dir = PathBuf::from(std::env::var_os("OUT_DIR").unwrap_or_default());
    let man_dir = out_dir.join("man");
    fs::create_dir_all(&man_dir)?;

    let man = Man::new(build_cli());
    let mut buffer = Vec::new();
    man.render(&mut buffer)?;
    fs::write(man_dir.join("sorter.1"), buffer)?;

    println!("cargo:rerun-if-changed=src/cli.rs");
    println!("cargo:rerun-if-changed=src/commands/");
    Ok(())
}
