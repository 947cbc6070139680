//! Program matching over the broadcast schedule
//!
//! Scans daily schedules for broadcasts whose program key equals a target
//! key, preserving source order (day order, then within-day order). Two
//! forms exist: a pure batch scan and a streaming producer that feeds the
//! concurrent pipeline one match at a time.

use tokio::sync::{mpsc, oneshot};
use tracing::debug;

use crate::app::models::{BroadcastRef, ScheduleSet};

/// Returns every broadcast whose program key equals `program_key` exactly,
/// in schedule order. An empty key or a key with no matches yields an empty
/// list, never an error.
pub fn find_matches(schedules: &ScheduleSet, program_key: &str) -> Vec<BroadcastRef> {
    let mut matches = Vec::new();
    if program_key.is_empty() {
        return matches;
    }
    for (day, schedule) in schedules.days().iter().enumerate() {
        for (entry, broadcast) in schedule.broadcasts.iter().enumerate() {
            if broadcast.program_key == program_key {
                matches.push(BroadcastRef { day, entry });
            }
        }
    }
    matches
}

/// Streaming form of [`find_matches`].
///
/// Emits each match on `match_tx` as it is found, then drops the sender and
/// signals `done_tx` exactly once. Dropping the sender first lets the
/// consumer drain any match still sitting in the channel after it sees the
/// done signal. If the consumer goes away mid-scan, the stage returns
/// instead of blocking; the dropped `done_tx` doubles as its completion
/// signal.
pub async fn stream_matches(
    schedules: ScheduleSet,
    program_key: String,
    match_tx: mpsc::Sender<BroadcastRef>,
    done_tx: oneshot::Sender<()>,
) {
    if !program_key.is_empty() {
        for (day, schedule) in schedules.days().iter().enumerate() {
            for (entry, broadcast) in schedule.broadcasts.iter().enumerate() {
                if broadcast.program_key == program_key {
                    let matched = BroadcastRef { day, entry };
                    if match_tx.send(matched).await.is_err() {
                        debug!("match consumer dropped, stopping search early");
                        return;
                    }
                }
            }
        }
    }

    drop(match_tx);
    let _ = done_tx.send(());
}
