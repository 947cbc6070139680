//! Command handlers for the aircheck_fetcher CLI
//!
//! Handlers coordinate between CLI arguments and the core pipeline. Errors
//! fetching the top-level schedule abort the run; the not-found outcome is
//! reported as a message, not an error.

use std::sync::Arc;
use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, info};

use crate::app::{
    pipeline, AggregateOutcome, Aggregator, Downloader, ScheduleClient, ScheduleSet,
    ScheduleSource, SelectionPolicy,
};
use crate::cli::{DownloadArgs, StreamsArgs};
use crate::config::AppConfig;
use crate::errors::Result;

/// Handle the schedule command: print every day with its broadcasts
pub async fn handle_schedule(config: AppConfig) -> Result<()> {
    let client = build_client(&config)?;
    let schedules = ScheduleSet::new(client.fetch_schedule().await?);
    info!("fetched {} schedule days", schedules.days().len());
    print_schedule(&schedules);
    Ok(())
}

/// Handle the streams command: resolve a program to playback URLs
pub async fn handle_streams(config: AppConfig, args: StreamsArgs) -> Result<()> {
    info!("resolving streams for program {}", args.program);
    let client = Arc::new(build_client(&config)?);
    let schedules = ScheduleSet::new(client.fetch_schedule().await?);

    let aggregator = Aggregator::new(args.policy(), config.api.loop_base_url.clone());
    let outcome = pipeline::run(
        client,
        schedules,
        &args.program,
        &args.program,
        &aggregator,
        args.strategy(),
        |stream| println!("{stream}"),
    )
    .await;

    match outcome {
        AggregateOutcome::Forwarded(count) => debug!("printed {count} stream URLs"),
        AggregateOutcome::Latest(stream) => println!("{stream}"),
        AggregateOutcome::NotFound => {
            println!("No stream found for program '{}'", args.program)
        }
    }
    Ok(())
}

/// Handle the download command: resolve the latest recording and save it
pub async fn handle_download(config: AppConfig, args: DownloadArgs) -> Result<()> {
    info!("downloading latest recording of program {}", args.program);
    let client = Arc::new(build_client(&config)?);
    let schedules = ScheduleSet::new(client.fetch_schedule().await?);

    let aggregator = Aggregator::new(
        SelectionPolicy::LatestOnly,
        config.api.loop_base_url.clone(),
    );
    let outcome = pipeline::run(
        client.clone(),
        schedules,
        &args.program,
        &args.program,
        &aggregator,
        args.strategy(),
        |_| {},
    )
    .await;

    let stream = match outcome {
        AggregateOutcome::Latest(stream) => stream,
        _ => {
            println!("No stream found for program '{}'", args.program);
            return Ok(());
        }
    };

    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .unwrap(),
    );
    spinner.set_message(format!("Downloading {}", stream.url()));
    spinner.enable_steady_tick(Duration::from_millis(120));

    let downloader = Downloader::new(client.http());
    let result = downloader
        .download_to_path(stream.url(), &args.output, args.force)
        .await;
    spinner.finish_and_clear();
    let written = result?;

    println!("Downloaded {} bytes to {}", written, args.output.display());
    Ok(())
}

fn build_client(config: &AppConfig) -> Result<ScheduleClient> {
    let client = ScheduleClient::with_config(
        config.api.base_url.clone(),
        config.client.to_client_config(),
    )?;
    Ok(client)
}

fn print_schedule(schedules: &ScheduleSet) {
    for day in schedules.days() {
        println!("{}", day.date_iso.format("%Y-%m-%d"));
        for broadcast in &day.broadcasts {
            println!(
                "  * {} ({}) - {}",
                broadcast.title,
                broadcast.program_key,
                broadcast.start_iso.to_rfc3339()
            );
            if !broadcast.description.is_empty() {
                println!("    {}", broadcast.description);
            }
        }
    }
}
