//! Fetch scheduler: one immediate fetch, then one fetch per period.
//!
//! Every request runs on its own task and is tagged with a sequence number.
//! Requests are never queued or coalesced; a slow request does not hold back
//! the next tick. Results are delivered over an unbounded channel, and the
//! consumer decides (by sequence number) whether to apply them.

pub mod handle;
pub mod types;

pub use handle::SchedulerHandle;
pub use types::{FetchOutcome, FetchSeq};

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc::UnboundedSender;
use tokio::time::{Instant, MissedTickBehavior};

use crate::config::defaults::DEFAULT_INTERVAL_SECS;
use crate::sources::RecordSource;

/// Default polling period.
pub const REFRESH_INTERVAL: Duration = Duration::from_secs(DEFAULT_INTERVAL_SECS);

/// Start polling `source` every `period`, sending each outcome to `outcomes`.
///
/// The first fetch (sequence 1) is issued before this returns. Must be called
/// from within a tokio runtime. A zero period falls back to
/// [`REFRESH_INTERVAL`].
pub fn start<S: RecordSource>(
    source: Arc<S>,
    period: Duration,
    outcomes: UnboundedSender<FetchOutcome>,
) -> SchedulerHandle {
    let period = if period.is_zero() {
        tracing::warn!(
            event = "core.scheduler.zero_period",
            fallback_secs = REFRESH_INTERVAL.as_secs(),
            "Polling period of zero is not allowed - using default"
        );
        REFRESH_INTERVAL
    } else {
        period
    };

    tracing::info!(
        event = "core.scheduler.started",
        interval_secs = period.as_secs()
    );

    spawn_fetch(Arc::clone(&source), 1, outcomes.clone());

    let timer = tokio::spawn(async move {
        let mut interval = tokio::time::interval_at(Instant::now() + period, period);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
        let mut next_seq: FetchSeq = 2;

        loop {
            interval.tick().await;

            if outcomes.is_closed() {
                tracing::debug!(
                    event = "core.scheduler.stopped",
                    reason = "consumer_closed"
                );
                break;
            }

            tracing::debug!(event = "core.scheduler.tick", seq = next_seq);
            spawn_fetch(Arc::clone(&source), next_seq, outcomes.clone());
            next_seq += 1;
        }
    });

    SchedulerHandle::new(timer)
}

fn spawn_fetch<S: RecordSource>(
    source: Arc<S>,
    seq: FetchSeq,
    outcomes: UnboundedSender<FetchOutcome>,
) {
    tokio::spawn(async move {
        tracing::debug!(event = "core.fetch.started", seq = seq);
        let result = source.list_invoices().await;

        if outcomes.send(FetchOutcome { seq, result }).is_err() {
            tracing::debug!(
                event = "core.fetch.result_discarded",
                seq = seq,
                reason = "consumer_closed"
            );
        }
    });
}
