//! aircheck_fetcher library
//!
//! Queries a radio station's broadcast schedule API, locates every broadcast
//! of a named program, resolves each one to its recorded stream identifiers,
//! and prints the playback URLs or downloads the most recent recording.

pub mod app;
pub mod cli;
pub mod config;
pub mod constants;
pub mod errors;

// Re-export commonly used types for convenience
pub use errors::{AppError, Result};
