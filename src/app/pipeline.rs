//! Pipeline assembly
//!
//! One entry point runs the search → resolve → aggregate computation under
//! either of two strategies: a sequential batch composition, or concurrently
//! scheduled stages connected by single-slot channels with an explicit
//! completion signal per stage boundary. Both strategies share the stage
//! implementations and must produce identical outcomes; the concurrent form
//! exists so early matches resolve while later days are still being scanned.
//!
//! Stage liveness does not depend on the consumer: every stage checks its
//! sends and terminates when its downstream disappears, so abandoning the
//! aggregator mid-run leaks nothing and deadlocks nothing.

use std::sync::Arc;

use tokio::sync::{mpsc, oneshot};
use tracing::warn;

use crate::app::aggregator::{AggregateOutcome, Aggregator};
use crate::app::client::ScheduleSource;
use crate::app::models::{ResolvedStream, ScheduleSet};
use crate::app::{matcher, resolver};
use crate::constants::STAGE_CHANNEL_CAPACITY;

/// How the three stages are scheduled
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineStrategy {
    /// Run each stage to completion over materialized lists
    Sequential,
    /// Run the stages as concurrent tasks connected by channels
    Concurrent,
}

/// Runs the full pipeline for one program over an already-fetched schedule.
///
/// `emit` receives every resolved stream in order under the all policy and
/// nothing under latest-only; the outcome carries the terminal selection.
pub async fn run(
    source: Arc<dyn ScheduleSource>,
    schedules: ScheduleSet,
    program_key: &str,
    channel_name: &str,
    aggregator: &Aggregator,
    strategy: PipelineStrategy,
    emit: impl FnMut(ResolvedStream),
) -> AggregateOutcome {
    match strategy {
        PipelineStrategy::Sequential => {
            run_sequential(source, schedules, program_key, channel_name, aggregator, emit).await
        }
        PipelineStrategy::Concurrent => {
            run_concurrent(source, schedules, program_key, channel_name, aggregator, emit).await
        }
    }
}

async fn run_sequential(
    source: Arc<dyn ScheduleSource>,
    schedules: ScheduleSet,
    program_key: &str,
    channel_name: &str,
    aggregator: &Aggregator,
    emit: impl FnMut(ResolvedStream),
) -> AggregateOutcome {
    let matches = matcher::find_matches(&schedules, program_key);
    let ids =
        resolver::resolve_matches(source.as_ref(), &schedules, &matches, channel_name).await;
    aggregator.aggregate_batch(ids, emit)
}

async fn run_concurrent(
    source: Arc<dyn ScheduleSource>,
    schedules: ScheduleSet,
    program_key: &str,
    channel_name: &str,
    aggregator: &Aggregator,
    emit: impl FnMut(ResolvedStream),
) -> AggregateOutcome {
    let (match_tx, match_rx) = mpsc::channel(STAGE_CHANNEL_CAPACITY);
    let (match_done_tx, match_done_rx) = oneshot::channel();
    let (id_tx, id_rx) = mpsc::channel(STAGE_CHANNEL_CAPACITY);
    let (resolve_done_tx, resolve_done_rx) = oneshot::channel();

    let matcher_stage = tokio::spawn(matcher::stream_matches(
        schedules.clone(),
        program_key.to_string(),
        match_tx,
        match_done_tx,
    ));
    let resolver_stage = tokio::spawn(resolver::stream_resolved(
        source,
        schedules,
        channel_name.to_string(),
        match_rx,
        match_done_rx,
        id_tx,
        resolve_done_tx,
    ));

    let outcome = aggregator
        .aggregate_stream(id_rx, resolve_done_rx, emit)
        .await;

    // Both stages terminate on their own once their downstream is gone;
    // join only to surface panics.
    let (matcher_result, resolver_result) = tokio::join!(matcher_stage, resolver_stage);
    if let Err(e) = matcher_result {
        warn!("matcher stage failed: {e}");
    }
    if let Err(e) = resolver_result {
        warn!("resolver stage failed: {e}");
    }

    outcome
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::aggregator::SelectionPolicy;
    use crate::app::testing::{broadcast, day, FakeSource};

    const LOOP_BASE: &str = "http://loop/?id=";

    const STRATEGIES: [PipelineStrategy; 2] =
        [PipelineStrategy::Sequential, PipelineStrategy::Concurrent];

    fn single_day_fixture() -> (Arc<FakeSource>, ScheduleSet) {
        let set = ScheduleSet::new(vec![day(
            "2014-12-29T00:00:00+01:00",
            vec![broadcast("4ul", true, "2014-12-29T22:00:00+01:00")],
        )]);
        let source = Arc::new(FakeSource::new().with_detail("20141229", "4ul", &["abc123"]));
        (source, set)
    }

    #[tokio::test]
    async fn test_single_aired_match_prints_one_url() {
        for strategy in STRATEGIES {
            let (source, set) = single_day_fixture();
            let aggregator = Aggregator::new(SelectionPolicy::All, LOOP_BASE);

            let mut printed = Vec::new();
            let outcome = run(source, set, "4ul", "4ul", &aggregator, strategy, |s| {
                printed.push(s.url().to_string())
            })
            .await;

            assert_eq!(outcome, AggregateOutcome::Forwarded(1), "{strategy:?}");
            assert_eq!(printed, vec!["http://loop/?id=abc123"], "{strategy:?}");
        }
    }

    #[tokio::test]
    async fn test_latest_only_selects_second_day() {
        for strategy in STRATEGIES {
            let set = ScheduleSet::new(vec![
                day(
                    "2014-12-29T00:00:00+01:00",
                    vec![broadcast("4ul", true, "2014-12-29T22:00:00+01:00")],
                ),
                day(
                    "2014-12-30T00:00:00+01:00",
                    vec![broadcast("4ul", true, "2014-12-30T22:00:00+01:00")],
                ),
            ]);
            let source = Arc::new(
                FakeSource::new()
                    .with_detail("20141229", "4ul", &["s1"])
                    .with_detail("20141230", "4ul", &["s2"]),
            );
            let aggregator = Aggregator::new(SelectionPolicy::LatestOnly, LOOP_BASE);

            let outcome = run(source, set, "4ul", "4ul", &aggregator, strategy, |_| {}).await;
            assert_eq!(
                outcome,
                AggregateOutcome::Latest(ResolvedStream::new(LOOP_BASE, "s2")),
                "{strategy:?}"
            );
        }
    }

    #[tokio::test]
    async fn test_no_match_yields_not_found_or_silence() {
        for strategy in STRATEGIES {
            let (source, set) = single_day_fixture();

            let latest = Aggregator::new(SelectionPolicy::LatestOnly, LOOP_BASE);
            let outcome = run(
                source.clone(),
                set.clone(),
                "absent",
                "absent",
                &latest,
                strategy,
                |_| {},
            )
            .await;
            assert_eq!(outcome, AggregateOutcome::NotFound, "{strategy:?}");

            let all = Aggregator::new(SelectionPolicy::All, LOOP_BASE);
            let mut printed = Vec::new();
            let outcome = run(
                source.clone(),
                set.clone(),
                "absent",
                "absent",
                &all,
                strategy,
                |s| printed.push(s),
            )
            .await;
            assert_eq!(outcome, AggregateOutcome::Forwarded(0), "{strategy:?}");
            assert!(printed.is_empty(), "{strategy:?}");
        }
    }

    #[tokio::test]
    async fn test_unaired_match_contributes_nothing_and_fetches_nothing() {
        for strategy in STRATEGIES {
            let set = ScheduleSet::new(vec![day(
                "2014-12-31T00:00:00+01:00",
                vec![broadcast("4ul", false, "2014-12-31T22:00:00+01:00")],
            )]);
            let source = Arc::new(FakeSource::new().with_detail("20141231", "4ul", &["never"]));
            let aggregator = Aggregator::new(SelectionPolicy::All, LOOP_BASE);

            let outcome = run(
                source.clone(),
                set,
                "4ul",
                "4ul",
                &aggregator,
                strategy,
                |_| {},
            )
            .await;
            assert_eq!(outcome, AggregateOutcome::Forwarded(0), "{strategy:?}");
            assert!(source.calls().is_empty(), "{strategy:?}");
        }
    }

    #[tokio::test]
    async fn test_failed_day_skipped_but_run_still_completes() {
        for strategy in STRATEGIES {
            let set = ScheduleSet::new(vec![
                day(
                    "2014-12-29T00:00:00+01:00",
                    vec![broadcast("4ul", true, "2014-12-29T22:00:00+01:00")],
                ),
                day(
                    "2014-12-30T00:00:00+01:00",
                    vec![broadcast("4ul", true, "2014-12-30T22:00:00+01:00")],
                ),
            ]);
            let source = Arc::new(
                FakeSource::new()
                    .with_error("20141229", "4ul", 500)
                    .with_detail("20141230", "4ul", &["s2"]),
            );
            let aggregator = Aggregator::new(SelectionPolicy::All, LOOP_BASE);

            let mut printed = Vec::new();
            let outcome = run(source, set, "4ul", "4ul", &aggregator, strategy, |s| {
                printed.push(s.url().to_string())
            })
            .await;

            assert_eq!(outcome, AggregateOutcome::Forwarded(1), "{strategy:?}");
            assert_eq!(printed, vec!["http://loop/?id=s2"], "{strategy:?}");
        }
    }
}
