//! CLI argument definitions using clap.

use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::logging::LogFormat;

/// Flightcheck: consistency checks for airport movement logs
#[derive(Parser)]
#[command(name = "flightcheck")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Log output format
    #[arg(long, global = true, default_value = "compact")]
    pub log_format: LogFormatChoice,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Check a movement log (arrivals plus associated departures)
    Movements {
        /// Path to the movement export (CSV/TSV)
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Separate departures export (default: the file's associated columns)
        #[arg(long, value_name = "FILE")]
        departures: Option<PathBuf>,

        #[command(flatten)]
        input: InputArgs,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// Check an environmental-impact movement report
    Report {
        /// Path to the movement report export (CSV/TSV)
        #[arg(value_name = "FILE")]
        file: PathBuf,

        #[command(flatten)]
        input: InputArgs,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// List the rule catalogue
    Rules {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

/// Options controlling how input files are read.
#[derive(Args, Debug, Clone, Default)]
pub struct InputArgs {
    /// Field delimiter: a character or tab, comma, semicolon, pipe (default: auto-detect)
    #[arg(short, long)]
    pub delimiter: Option<String>,

    /// Only check the first N rows
    #[arg(long, value_name = "N")]
    pub max_rows: Option<usize>,
}

/// Options controlling where and how results are written.
#[derive(Args, Debug, Clone, Default)]
pub struct OutputArgs {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,

    /// Write the JSON report to a file
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum LogFormatChoice {
    /// Multi-line human-readable output
    Pretty,
    /// Single-line output
    Compact,
    /// Newline-delimited JSON
    Json,
}

impl From<LogFormatChoice> for LogFormat {
    fn from(choice: LogFormatChoice) -> Self {
        match choice {
            LogFormatChoice::Pretty => LogFormat::Pretty,
            LogFormatChoice::Compact => LogFormat::Compact,
            LogFormatChoice::Json => LogFormat::Json,
        }
    }
}
