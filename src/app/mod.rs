//! Core application logic for aircheck_fetcher
//!
//! This module contains the schedule client, the wire data models, and the
//! three pipeline stages (matcher, resolver, aggregator) together with the
//! strategy layer that runs them sequentially or concurrently.
//!
//! # Examples
//!
//! ```rust,no_run
//! use std::sync::Arc;
//!
//! use aircheck_fetcher::app::{
//!     pipeline, Aggregator, PipelineStrategy, ScheduleClient, ScheduleSet,
//!     SelectionPolicy, ScheduleSource,
//! };
//! use aircheck_fetcher::constants::api;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = Arc::new(ScheduleClient::new(api::BASE_URL)?);
//! let schedules = ScheduleSet::new(client.fetch_schedule().await?);
//!
//! let aggregator = Aggregator::new(SelectionPolicy::All, api::LOOP_BASE_URL);
//! pipeline::run(
//!     client,
//!     schedules,
//!     "4UL",
//!     "4UL",
//!     &aggregator,
//!     PipelineStrategy::Concurrent,
//!     |stream| println!("{stream}"),
//! )
//! .await;
//! # Ok(())
//! # }
//! ```

pub mod aggregator;
pub mod client;
pub mod matcher;
pub mod models;
pub mod pipeline;
pub mod resolver;

// Re-export main public API
pub use aggregator::{AggregateOutcome, Aggregator, SelectionPolicy};
pub use client::{ClientConfig, Downloader, ScheduleClient, ScheduleSource};
pub use models::{
    BroadcastEntry, BroadcastRef, ChannelDetail, DailySchedule, ProgramSegment, ResolvedStream,
    ScheduleSet, StreamEntry,
};
pub use pipeline::PipelineStrategy;
