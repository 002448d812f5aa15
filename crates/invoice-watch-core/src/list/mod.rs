//! The invoice list component: scheduler, list state and view in one owner.
//!
//! `InvoiceList` owns the [`ListState`], the scheduler handle and the
//! receiving end of the outcome channel. All mutation happens through
//! `&mut self` on the event loop that owns it.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc::{self, UnboundedReceiver};

use crate::errors::InvoiceWatchError;
use crate::render::render_view;
use crate::scheduler::{self, FetchOutcome, FetchSeq, SchedulerHandle};
use crate::sources::RecordSource;
use crate::state::ListState;

/// What [`InvoiceList::apply`] did with an outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApplyResult {
    /// The snapshot was replaced.
    Replaced,
    /// The fetch failed; the snapshot is unchanged and the failure was logged.
    Failed,
    /// A newer outcome was already applied; this one was dropped.
    Stale,
    /// The list has been torn down; nothing was applied.
    TornDown,
}

pub struct InvoiceList {
    state: ListState,
    outcomes: UnboundedReceiver<FetchOutcome>,
    scheduler: Option<SchedulerHandle>,
    /// Sequence number of the last applied snapshot; 0 before the first.
    last_applied_seq: FetchSeq,
}

impl InvoiceList {
    /// Create an empty list and start polling `source` every `period`.
    ///
    /// Must be called from within a tokio runtime.
    pub fn mount<S: RecordSource>(source: Arc<S>, period: Duration) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        let handle = scheduler::start(source, period, tx);

        Self {
            state: ListState::new(),
            outcomes: rx,
            scheduler: Some(handle),
            last_applied_seq: 0,
        }
    }

    /// Wait for the next fetch outcome. Returns `None` once torn down.
    pub async fn next_outcome(&mut self) -> Option<FetchOutcome> {
        if !self.is_mounted() {
            return None;
        }
        self.outcomes.recv().await
    }

    /// Apply a fetch outcome to the list state.
    ///
    /// Failures are logged and never mutate state. Successful outcomes older
    /// than the last applied one are ignored, so a slow early request can
    /// never overwrite a newer snapshot.
    pub fn apply(&mut self, outcome: FetchOutcome) -> ApplyResult {
        let FetchOutcome { seq, result } = outcome;

        if !self.is_mounted() {
            tracing::debug!(
                event = "core.list.outcome_ignored",
                seq = seq,
                reason = "torn_down"
            );
            return ApplyResult::TornDown;
        }

        let records = match result {
            Ok(records) => records.unwrap_or_default(),
            Err(e) => {
                tracing::error!(
                    event = "core.fetch.failed",
                    seq = seq,
                    error = %e,
                    error_code = e.error_code(),
                    "Failed to fetch invoices - keeping previous snapshot"
                );
                return ApplyResult::Failed;
            }
        };

        if seq <= self.last_applied_seq {
            tracing::info!(
                event = "core.list.stale_outcome_ignored",
                seq = seq,
                last_applied_seq = self.last_applied_seq
            );
            return ApplyResult::Stale;
        }

        self.state.replace_snapshot(records);
        self.last_applied_seq = seq;
        tracing::info!(
            event = "core.fetch.completed",
            seq = seq,
            record_count = self.state.len(),
            generation = self.state.generation()
        );
        ApplyResult::Replaced
    }

    /// Toggle a row open or closed. Returns the resulting expanded id.
    pub fn toggle(&mut self, id: &str) -> Option<&str> {
        let selected = self.state.toggle_selection(id);
        tracing::debug!(
            event = "core.list.selection_toggled",
            id = id,
            expanded = selected.is_some()
        );
        selected
    }

    pub fn state(&self) -> &ListState {
        &self.state
    }

    pub fn render(&self) -> String {
        render_view(&self.state)
    }

    pub fn is_mounted(&self) -> bool {
        self.scheduler.is_some()
    }

    /// Disarm the scheduler and stop accepting outcomes.
    ///
    /// Fetches still in flight finish on their own; their results are
    /// discarded. Returns `false` if already torn down.
    pub fn teardown(&mut self) -> bool {
        let Some(mut handle) = self.scheduler.take() else {
            return false;
        };

        handle.stop();
        self.outcomes.close();
        let mut discarded = 0usize;
        while self.outcomes.try_recv().is_ok() {
            discarded += 1;
        }

        tracing::info!(
            event = "core.list.torn_down",
            discarded_outcomes = discarded
        );
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{GatedSource, ScriptedSource, failure, invoice};
    use serde_json::json;

    const PERIOD: Duration = Duration::from_secs(30);

    fn ok(seq: FetchSeq, ids: &[&str]) -> FetchOutcome {
        FetchOutcome {
            seq,
            result: Ok(Some(
                ids.iter().map(|id| invoice(json!({"id": id}))).collect(),
            )),
        }
    }

    fn ids(list: &InvoiceList) -> Vec<String> {
        list.state()
            .records()
            .iter()
            .map(|r| r.id().to_string())
            .collect()
    }

    /// A mounted list whose source never resolves, so only manual outcomes apply.
    fn idle_list() -> InvoiceList {
        InvoiceList::mount(Arc::new(GatedSource::new(vec![])), PERIOD)
    }

    #[tokio::test(start_paused = true)]
    async fn test_success_replaces_snapshot_in_order() {
        let mut list = idle_list();

        assert_eq!(list.apply(ok(1, &["b", "a", "c"])), ApplyResult::Replaced);
        assert_eq!(ids(&list), vec!["b", "a", "c"]);
        assert!(list.state().last_updated().is_some());
    }

    #[tokio::test(start_paused = true)]
    async fn test_null_payload_becomes_empty_list() {
        let mut list = idle_list();
        list.apply(ok(1, &["x"]));

        let result = list.apply(FetchOutcome {
            seq: 2,
            result: Ok(None),
        });

        assert_eq!(result, ApplyResult::Replaced);
        assert!(list.state().is_empty());
        assert_eq!(list.state().generation(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_failure_leaves_state_untouched() {
        let mut list = idle_list();
        list.apply(ok(1, &["1", "2"]));
        list.toggle("2");
        let before_ts = list.state().last_updated();
        let before_gen = list.state().generation();

        let result = list.apply(FetchOutcome {
            seq: 2,
            result: Err(failure("network down")),
        });

        assert_eq!(result, ApplyResult::Failed);
        assert_eq!(ids(&list), vec!["1", "2"]);
        assert_eq!(list.state().selected_id(), Some("2"));
        assert_eq!(list.state().last_updated(), before_ts);
        assert_eq!(list.state().generation(), before_gen);
    }

    #[tokio::test(start_paused = true)]
    async fn test_stale_result_is_ignored() {
        let mut list = idle_list();

        assert_eq!(list.apply(ok(2, &["new"])), ApplyResult::Replaced);
        assert_eq!(list.apply(ok(1, &["old"])), ApplyResult::Stale);
        assert_eq!(ids(&list), vec!["new"]);
        assert_eq!(list.state().generation(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_failure_does_not_advance_sequence() {
        let mut list = idle_list();
        list.apply(ok(1, &["a"]));
        list.apply(FetchOutcome {
            seq: 3,
            result: Err(failure("timeout")),
        });

        // Request 2 finished after request 3 failed; it is still newer than 1.
        assert_eq!(list.apply(ok(2, &["b"])), ApplyResult::Replaced);
        assert_eq!(ids(&list), vec!["b"]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_toggle_does_not_refresh_timestamp() {
        let mut list = idle_list();
        list.apply(ok(1, &["1"]));
        let stamp = list.state().last_updated();

        assert_eq!(list.toggle("1"), Some("1"));
        assert_eq!(list.toggle("1"), None);
        assert_eq!(list.toggle("1"), Some("1"));
        assert_eq!(list.toggle("2"), Some("2"));

        assert_eq!(list.state().last_updated(), stamp);
        assert_eq!(list.state().generation(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_scheduler_outcomes_drive_state() {
        let source = Arc::new(ScriptedSource::new(vec![
            Ok(Some(vec![invoice(json!({"id": "1", "balance": 100, "customerRef": {"name": "A"}}))])),
            Err(failure("flaky")),
            Ok(None),
        ]));
        let mut list = InvoiceList::mount(Arc::clone(&source), PERIOD);

        let first = list.next_outcome().await.unwrap();
        assert_eq!(list.apply(first), ApplyResult::Replaced);
        assert!(list.render().contains("│ 1  │ A    │ $100.00 │"));

        let second = list.next_outcome().await.unwrap();
        assert_eq!(list.apply(second), ApplyResult::Failed);
        assert_eq!(list.state().len(), 1);

        let third = list.next_outcome().await.unwrap();
        assert_eq!(list.apply(third), ApplyResult::Replaced);
        assert!(list.state().is_empty());
        assert_eq!(source.calls(), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn test_teardown_blocks_in_flight_result() {
        let source = Arc::new(GatedSource::new(vec![invoice(json!({"id": "late"}))]));
        let mut list = InvoiceList::mount(Arc::clone(&source), PERIOD);

        tokio::time::sleep(Duration::from_millis(10)).await;
        assert_eq!(source.calls(), 1);

        assert!(list.teardown());
        assert!(!list.is_mounted());

        // The in-flight request resolves after teardown.
        source.release(1);
        tokio::time::sleep(PERIOD * 3).await;

        assert!(list.next_outcome().await.is_none());
        assert!(list.state().is_empty());
        assert_eq!(list.state().generation(), 0);
        assert_eq!(source.calls(), 1);

        let late = FetchOutcome {
            seq: 99,
            result: Ok(Some(vec![invoice(json!({"id": "late"}))])),
        };
        assert_eq!(list.apply(late), ApplyResult::TornDown);
        assert!(list.state().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_teardown_twice() {
        let mut list = idle_list();
        assert!(list.teardown());
        assert!(!list.teardown());
    }
}
