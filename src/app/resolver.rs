//! Stream resolution for matched broadcasts
//!
//! For every matched broadcast that has actually aired, fetches that day's
//! channel detail and extracts the advertised stream identifiers. A broadcast
//! may span several stream segments, so one match can yield any number of
//! identifiers. Identifiers leave this stage in match order: a match's
//! identifiers are fully emitted (or fully skipped on fetch error) before the
//! next match is looked at.

use std::sync::Arc;

use tokio::sync::{mpsc, oneshot};
use tracing::{debug, warn};

use crate::app::client::ScheduleSource;
use crate::app::models::{BroadcastEntry, BroadcastRef, ScheduleSet};

/// Stream identifiers for one broadcast entry.
///
/// Unaired entries resolve to nothing without touching the API. A failed
/// detail fetch is logged and resolves to nothing; it never aborts the run.
pub async fn stream_ids_for_entry<S>(
    source: &S,
    entry: &BroadcastEntry,
    channel_name: &str,
) -> Vec<String>
where
    S: ScheduleSource + ?Sized,
{
    if !entry.has_aired {
        debug!(
            "skipping unaired broadcast of {} at {}",
            entry.program_key, entry.start_iso
        );
        return Vec::new();
    }

    let day = entry.start_day_segment();
    match source.fetch_channel_detail(&day, channel_name).await {
        Ok(detail) => detail
            .streams
            .into_iter()
            .map(|stream| stream.loop_stream_id)
            .collect(),
        Err(e) => {
            warn!("unable to fetch channel detail for {day}/{channel_name}: {e}");
            Vec::new()
        }
    }
}

/// Batch form: resolves a materialized match list into the full ordered
/// identifier list.
pub async fn resolve_matches<S>(
    source: &S,
    schedules: &ScheduleSet,
    matches: &[BroadcastRef],
    channel_name: &str,
) -> Vec<String>
where
    S: ScheduleSource + ?Sized,
{
    let mut ids = Vec::new();
    for &matched in matches {
        let entry = match schedules.get(matched) {
            Some(entry) => entry,
            None => continue,
        };
        ids.extend(stream_ids_for_entry(source, entry, channel_name).await);
    }
    ids
}

/// Streaming form: runs as an independent pipeline stage.
///
/// Selects between a new match on `match_rx` (fetch and emit immediately)
/// and the upstream done signal. On done, any match still buffered in the
/// channel is drained before this stage drops its own sender and forwards
/// its own done signal exactly once. A dropped upstream done sender counts
/// as done; a dropped downstream receiver terminates the stage early.
pub async fn stream_resolved(
    source: Arc<dyn ScheduleSource>,
    schedules: ScheduleSet,
    channel_name: String,
    mut match_rx: mpsc::Receiver<BroadcastRef>,
    mut match_done_rx: oneshot::Receiver<()>,
    id_tx: mpsc::Sender<String>,
    done_tx: oneshot::Sender<()>,
) {
    loop {
        tokio::select! {
            maybe_match = match_rx.recv() => match maybe_match {
                Some(matched) => {
                    if !emit_for_match(source.as_ref(), &schedules, matched, &channel_name, &id_tx)
                        .await
                    {
                        return;
                    }
                }
                None => break,
            },
            _ = &mut match_done_rx => {
                // The done signal can win the race against a match still
                // sitting in the channel; drain before finishing.
                while let Some(matched) = match_rx.recv().await {
                    if !emit_for_match(source.as_ref(), &schedules, matched, &channel_name, &id_tx)
                        .await
                    {
                        return;
                    }
                }
                break;
            }
        }
    }

    drop(id_tx);
    let _ = done_tx.send(());
}

/// Emits all identifiers for one match. Returns false when the downstream
/// consumer is gone and the stage should stop.
async fn emit_for_match<S>(
    source: &S,
    schedules: &ScheduleSet,
    matched: BroadcastRef,
    channel_name: &str,
    id_tx: &mpsc::Sender<String>,
) -> bool
where
    S: ScheduleSource + ?Sized,
{
    let entry = match schedules.get(matched) {
        Some(entry) => entry,
        None => return true,
    };
    for id in stream_ids_for_entry(source, entry, channel_name).await {
        if id_tx.send(id).await.is_err() {
            debug!("identifier consumer dropped, stopping resolution early");
            return false;
        }
    }
    true
}
