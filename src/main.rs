//! aircheck_fetcher CLI application
//!
//! Command-line interface for resolving and downloading recorded radio
//! broadcasts. Fatal errors terminate the process with a non-zero exit code
//! and a message on stderr.

use std::process;

use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

use aircheck_fetcher::cli::{handle_download, handle_schedule, handle_streams, Cli, Commands};
use aircheck_fetcher::config::AppConfig;
use aircheck_fetcher::errors::Result;

#[tokio::main]
async fn main() {
    let result = run().await;

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

/// Main application logic
async fn run() -> Result<()> {
    let cli = Cli::parse_args();

    // Configuration feeds the default log level, so it loads first
    let config = AppConfig::load(cli.global.config.as_deref())?;
    init_logging(&cli, &config);

    info!("aircheck_fetcher v{} starting", env!("CARGO_PKG_VERSION"));

    match cli.command {
        Commands::Schedule => handle_schedule(config).await,
        Commands::Streams(args) => handle_streams(config, args).await,
        Commands::Download(args) => handle_download(config, args).await,
    }
}

/// Initialize logging from CLI verbosity flags, falling back to the
/// configured level
fn init_logging(cli: &Cli, config: &AppConfig) {
    let level = match cli.log_level() {
        Some(level) => level.to_string(),
        None => config.logging.level.clone(),
    };

    let filter = EnvFilter::from_default_env()
        .add_directive(format!("aircheck_fetcher={}", level).parse().unwrap());

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_level(cli.global.very_verbose)
        .init();
}
