//! CLI argument structures

use clap::Parser;
use std::path::PathBuf;

use crate::ingest::SchemaSelection;
use crate::report::OutputFormat;

/// Summarize the time between consecutive events in an event log
#[derive(Debug, Parser)]
#[command(name = "interval-stats")]
#[command(
    about = "interval-stats - Interval statistics and histograms for event logs",
    long_about = None
)]
#[command(version)]
pub struct Cli {
    /// Delimited event log to analyse
    pub file: PathBuf,

    /// Field delimiter (single ASCII character, `\t` for tab)
    #[arg(short, long)]
    pub delimiter: Option<String>,

    /// Treat the first row as data rather than a header
    #[arg(long)]
    pub no_header: bool,

    /// Log layout; detected from the header when `auto`
    #[arg(short, long, value_enum)]
    pub schema: Option<SchemaSelection>,

    /// Output format
    #[arg(short, long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Number of histogram bins
    #[arg(short, long)]
    pub bins: Option<usize>,

    /// Omit histograms from human output
    #[arg(long)]
    pub no_histogram: bool,

    /// Write one SVG histogram per group into this directory
    #[arg(long, value_name = "DIR")]
    pub plot_dir: Option<PathBuf>,

    /// Summarize all intervals together instead of per transition
    #[arg(long)]
    pub overall: bool,

    /// Path to configuration file
    #[arg(short = 'c', long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Enable verbose output (-v for info, -vv for debug, -vvv for trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}
