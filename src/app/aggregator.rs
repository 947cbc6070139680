//! Result aggregation policies
//!
//! Consumes the resolved identifier sequence under one of two selection
//! policies: forward everything in arrival order, or hold back until the
//! sequence completes and keep only the most recent identifier. One state
//! machine drives both the batch and the channel-consuming form.

use tokio::sync::{mpsc, oneshot};

use crate::app::models::ResolvedStream;

/// Which resolved streams the consumer wants
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionPolicy {
    /// Forward every stream as it arrives
    All,
    /// Keep only the chronologically last stream
    LatestOnly,
}

/// Terminal result of one aggregation run
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AggregateOutcome {
    /// All-policy: this many streams were handed to the emit callback
    Forwarded(usize),
    /// Latest-only policy over a non-empty sequence
    Latest(ResolvedStream),
    /// Latest-only policy over an empty sequence
    NotFound,
}

/// Identifier consumer implementing the selection policies
pub struct Aggregator {
    policy: SelectionPolicy,
    loop_base_url: String,
}

impl Aggregator {
    pub fn new(policy: SelectionPolicy, loop_base_url: impl Into<String>) -> Self {
        Self {
            policy,
            loop_base_url: loop_base_url.into(),
        }
    }

    pub fn policy(&self) -> SelectionPolicy {
        self.policy
    }

    /// Batch form: consumes a materialized identifier sequence.
    ///
    /// Under [`SelectionPolicy::All`] each identifier is wrapped into a
    /// playback URL and passed to `emit` in input order; under
    /// [`SelectionPolicy::LatestOnly`] nothing is emitted and the outcome
    /// carries the final selection.
    pub fn aggregate_batch(
        &self,
        ids: impl IntoIterator<Item = String>,
        mut emit: impl FnMut(ResolvedStream),
    ) -> AggregateOutcome {
        let mut state = AggregateState::new(self);
        for id in ids {
            state.feed(id, &mut emit);
        }
        state.finish()
    }

    /// Streaming form: consumes the identifier channel until the resolver's
    /// done signal (draining anything still buffered afterwards) or until
    /// the channel closes, whichever comes first.
    pub async fn aggregate_stream(
        &self,
        mut id_rx: mpsc::Receiver<String>,
        mut done_rx: oneshot::Receiver<()>,
        mut emit: impl FnMut(ResolvedStream),
    ) -> AggregateOutcome {
        let mut state = AggregateState::new(self);
        loop {
            tokio::select! {
                maybe_id = id_rx.recv() => match maybe_id {
                    Some(id) => state.feed(id, &mut emit),
                    None => break,
                },
                _ = &mut done_rx => {
                    while let Some(id) = id_rx.recv().await {
                        state.feed(id, &mut emit);
                    }
                    break;
                }
            }
        }
        state.finish()
    }
}

/// Policy state shared by both aggregation forms
struct AggregateState<'a> {
    aggregator: &'a Aggregator,
    forwarded: usize,
    last: Option<String>,
}

impl<'a> AggregateState<'a> {
    fn new(aggregator: &'a Aggregator) -> Self {
        Self {
            aggregator,
            forwarded: 0,
            last: None,
        }
    }

    fn feed(&mut self, id: String, emit: &mut impl FnMut(ResolvedStream)) {
        match self.aggregator.policy {
            SelectionPolicy::All => {
                emit(ResolvedStream::new(&self.aggregator.loop_base_url, &id));
                self.forwarded += 1;
            }
            SelectionPolicy::LatestOnly => self.last = Some(id),
        }
    }

    fn finish(self) -> AggregateOutcome {
        match self.aggregator.policy {
            SelectionPolicy::All => AggregateOutcome::Forwarded(self.forwarded),
            SelectionPolicy::LatestOnly => match self.last {
                Some(id) => AggregateOutcome::Latest(ResolvedStream::new(
                    &self.aggregator.loop_base_url,
                    &id,
                )),
                None => AggregateOutcome::NotFound,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::STAGE_CHANNEL_CAPACITY;

    const LOOP_BASE: &str = "http://loop/?id=";

    fn ids(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    #[test]
    fn test_all_policy_forwards_input_unchanged() {
        let aggregator = Aggregator::new(SelectionPolicy::All, LOOP_BASE);
        let mut seen = Vec::new();
        let outcome = aggregator.aggregate_batch(ids(&["a", "b", "c"]), |s| {
            seen.push(s.url().to_string())
        });

        assert_eq!(outcome, AggregateOutcome::Forwarded(3));
        assert_eq!(
            seen,
            vec![
                "http://loop/?id=a",
                "http://loop/?id=b",
                "http://loop/?id=c",
            ]
        );
    }

    #[test]
    fn test_all_policy_over_empty_input_emits_nothing() {
        let aggregator = Aggregator::new(SelectionPolicy::All, LOOP_BASE);
        let mut seen = Vec::new();
        let outcome =
            aggregator.aggregate_batch(Vec::new(), |s| seen.push(s.url().to_string()));

        assert_eq!(outcome, AggregateOutcome::Forwarded(0));
        assert!(seen.is_empty());
    }

    #[test]
    fn test_latest_policy_keeps_only_the_last_identifier() {
        let aggregator = Aggregator::new(SelectionPolicy::LatestOnly, LOOP_BASE);
        let mut seen = Vec::new();
        let outcome = aggregator.aggregate_batch(ids(&["s1", "s2"]), |s| {
            seen.push(s.url().to_string())
        });

        assert_eq!(
            outcome,
            AggregateOutcome::Latest(ResolvedStream::new(LOOP_BASE, "s2"))
        );
        // latest-only must stay silent until the sequence is exhausted
        assert!(seen.is_empty());
    }

    #[test]
    fn test_latest_policy_over_empty_input_reports_not_found() {
        let aggregator = Aggregator::new(SelectionPolicy::LatestOnly, LOOP_BASE);
        let outcome = aggregator.aggregate_batch(Vec::new(), |_| {});
        assert_eq!(outcome, AggregateOutcome::NotFound);
    }

    #[tokio::test]
    async fn test_stream_form_matches_batch_form() {
        for policy in [SelectionPolicy::All, SelectionPolicy::LatestOnly] {
            let aggregator = Aggregator::new(policy, LOOP_BASE);
            let mut batch_seen = Vec::new();
            let batch_outcome = aggregator
                .aggregate_batch(ids(&["s1", "s2"]), |s| batch_seen.push(s));

            let (id_tx, id_rx) = mpsc::channel(STAGE_CHANNEL_CAPACITY);
            let (done_tx, done_rx) = oneshot::channel();
            let feeder = tokio::spawn(async move {
                for id in ids(&["s1", "s2"]) {
                    id_tx.send(id).await.unwrap();
                }
                drop(id_tx);
                let _ = done_tx.send(());
            });

            let mut stream_seen = Vec::new();
            let stream_outcome = aggregator
                .aggregate_stream(id_rx, done_rx, |s| stream_seen.push(s))
                .await;
            feeder.await.unwrap();

            assert_eq!(stream_outcome, batch_outcome);
            assert_eq!(stream_seen, batch_seen);
        }
    }

    #[tokio::test]
    async fn test_stream_form_drains_after_done_signal() {
        let aggregator = Aggregator::new(SelectionPolicy::LatestOnly, LOOP_BASE);
        let (id_tx, id_rx) = mpsc::channel(STAGE_CHANNEL_CAPACITY);
        let (done_tx, done_rx) = oneshot::channel();

        // identifier buffered and done signaled before consumption begins
        id_tx.send("s9".to_string()).await.unwrap();
        drop(id_tx);
        let _ = done_tx.send(());

        let outcome = aggregator.aggregate_stream(id_rx, done_rx, |_| {}).await;
        assert_eq!(
            outcome,
            AggregateOutcome::Latest(ResolvedStream::new(LOOP_BASE, "s9"))
        );
    }
}
