//! Command-line interface components
//!
//! CLI-specific code for the aircheck_fetcher application: argument parsing
//! and the subcommand handlers.

pub mod args;
pub mod commands;

pub use args::{Cli, Commands, DownloadArgs, GlobalArgs, StreamsArgs};
pub use commands::{handle_download, handle_schedule, handle_streams};
