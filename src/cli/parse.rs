//! CLI parse: clap types for dirmerge. No behavior; definitions only.

use crate::config::NonFilePolicy;
use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Summary output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

/// Merge two directories, eliminating duplicate files and renaming files with
/// the same name but different content.
///
/// After execution the keep directory holds at least all its original files,
/// plus any files from the clean directory whose content it did not already
/// have. The clean directory is left empty of visible files.
#[derive(Parser, Debug)]
#[command(name = "dirmerge")]
#[command(about = "Merge two directories, removing duplicates by content")]
#[command(after_help = "Example:\n  dirmerge --keep a --clean b")]
pub struct Cli {
    /// The directory to keep
    #[arg(short = 'k', long, required_unless_present = "print_config")]
    pub keep: Option<PathBuf>,

    /// The directory to clean
    #[arg(short = 'c', long, required_unless_present = "print_config")]
    pub clean: Option<PathBuf>,

    /// Run verbosely (log every hash and decision)
    #[arg(short = 'v', long)]
    pub verbose: bool,

    /// Report what would happen without touching either directory
    #[arg(long)]
    pub dry_run: bool,

    /// Fail when deleted + moved does not match the files seen
    #[arg(long)]
    pub strict: bool,

    /// Handling of subdirectories and other non-file entries (skip, fail)
    #[arg(long)]
    pub on_non_file: Option<NonFilePolicy>,

    /// Summary format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Configuration file path (layered over the global config)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Log level
    #[arg(long, value_parser = ["trace", "debug", "info", "warn", "error", "off"])]
    pub log_level: Option<String>,

    /// Log format
    #[arg(long, value_parser = ["json", "text"])]
    pub log_format: Option<String>,

    /// Print the effective configuration as TOML and exit
    #[arg(long)]
    pub print_config: bool,
}
