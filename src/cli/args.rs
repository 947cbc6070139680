//! Command-line argument parsing for aircheck_fetcher
//!
//! Defines the CLI structure using clap derive macros: global verbosity and
//! configuration flags plus the `schedule`, `streams` and `download`
//! subcommands.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::app::{PipelineStrategy, SelectionPolicy};

/// aircheck_fetcher - fetch recorded radio broadcasts
#[derive(Parser, Debug)]
#[command(
    name = "aircheck_fetcher",
    version,
    about = "Resolve and download recorded radio broadcasts from a station's schedule API",
    long_about = "Queries a radio station's broadcast schedule API, finds every broadcast of a
named program, resolves each one to its recorded stream URLs, and prints them
or downloads the most recent recording."
)]
pub struct Cli {
    /// Global options
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Subcommands
    #[command(subcommand)]
    pub command: Commands,
}

/// Global arguments available to all subcommands
#[derive(Args, Debug)]
pub struct GlobalArgs {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Very verbose logging (debug level)
    #[arg(long, global = true)]
    pub very_verbose: bool,

    /// Quiet mode - suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Configuration file path
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print the full broadcast schedule
    Schedule,

    /// Resolve and print playback URLs for a program
    Streams(StreamsArgs),

    /// Download the most recent recording of a program
    Download(DownloadArgs),
}

/// Arguments for the streams command
#[derive(Args, Debug, Clone)]
pub struct StreamsArgs {
    /// Program key to search for (e.g. "4UL")
    #[arg(short, long)]
    pub program: String,

    /// Keep only the most recent stream
    #[arg(short, long)]
    pub latest: bool,

    /// Resolve via materialized lists instead of the concurrent pipeline
    #[arg(long)]
    pub sequential: bool,
}

/// Arguments for the download command
#[derive(Args, Debug, Clone)]
pub struct DownloadArgs {
    /// Program key to search for (e.g. "4UL")
    #[arg(short, long)]
    pub program: String,

    /// Destination file path
    #[arg(short, long, value_name = "FILE")]
    pub output: PathBuf,

    /// Overwrite an existing destination file
    #[arg(short, long)]
    pub force: bool,

    /// Resolve via materialized lists instead of the concurrent pipeline
    #[arg(long)]
    pub sequential: bool,
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Logging level from verbosity flags; `None` defers to configuration
    pub fn log_level(&self) -> Option<tracing::Level> {
        if self.global.quiet {
            Some(tracing::Level::ERROR)
        } else if self.global.very_verbose {
            Some(tracing::Level::DEBUG)
        } else if self.global.verbose {
            Some(tracing::Level::INFO)
        } else {
            None
        }
    }
}

impl StreamsArgs {
    /// Selection policy implied by the latest flag
    pub fn policy(&self) -> SelectionPolicy {
        if self.latest {
            SelectionPolicy::LatestOnly
        } else {
            SelectionPolicy::All
        }
    }

    pub fn strategy(&self) -> PipelineStrategy {
        strategy_from(self.sequential)
    }
}

impl DownloadArgs {
    pub fn strategy(&self) -> PipelineStrategy {
        strategy_from(self.sequential)
    }
}

fn strategy_from(sequential: bool) -> PipelineStrategy {
    if sequential {
        PipelineStrategy::Sequential
    } else {
        PipelineStrategy::Concurrent
    }
}
