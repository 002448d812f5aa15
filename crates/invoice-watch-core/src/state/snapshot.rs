use chrono::{DateTime, Local};

use crate::records::Invoice;

use super::selection::SelectionState;

/// Suffix the table adds to a cell it had to shorten.
const TRUNCATION_MARKER: &str = "...";

/// The most recent snapshot plus row selection and refresh tracking.
///
/// Encapsulates:
/// - `records`: the collection from the last successful fetch
/// - `selection`: the expanded row, if any
/// - `last_updated`: when the snapshot was last replaced
/// - `generation`: bumped on every replacement
#[derive(Debug, Default)]
pub struct ListState {
    records: Vec<Invoice>,
    selection: SelectionState,
    last_updated: Option<DateTime<Local>>,
    generation: u64,
}

impl ListState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the whole snapshot and stamp it with the current local time.
    ///
    /// No merge or diff: an identical collection still counts as a new
    /// snapshot and refreshes the timestamp.
    pub fn replace_snapshot(&mut self, records: Vec<Invoice>) {
        self.replace_snapshot_at(records, Local::now());
    }

    /// Replace the snapshot with an explicit timestamp.
    pub fn replace_snapshot_at(&mut self, records: Vec<Invoice>, at: DateTime<Local>) {
        self.records = records;
        self.generation += 1;
        self.last_updated = Some(at);
    }

    /// Toggle a row open or closed. Returns the resulting expanded id.
    pub fn toggle_selection(&mut self, id: &str) -> Option<&str> {
        self.selection.toggle(id)
    }

    pub fn records(&self) -> &[Invoice] {
        &self.records
    }

    pub fn selected_id(&self) -> Option<&str> {
        self.selection.id()
    }

    /// Get the expanded record, if any.
    ///
    /// Returns `None` if nothing is expanded or the expanded id is no longer
    /// in the current snapshot.
    pub fn selected_record(&self) -> Option<&Invoice> {
        let id = self.selection.id()?;
        self.records.iter().find(|r| r.id() == id)
    }

    /// Match typed text against the ids in the snapshot.
    ///
    /// An exact id wins. Otherwise the text, minus a trailing `...` copied
    /// from a truncated cell, must be a prefix of exactly one id. Returns
    /// `None` when nothing or more than one id matches.
    pub fn resolve_row_id(&self, text: &str) -> Option<&str> {
        if let Some(record) = self.records.iter().find(|r| r.id() == text) {
            return Some(record.id());
        }

        let prefix = text.strip_suffix(TRUNCATION_MARKER).unwrap_or(text);
        if prefix.is_empty() {
            return None;
        }

        let mut matches = self
            .records
            .iter()
            .map(Invoice::id)
            .filter(|id| id.starts_with(prefix));
        match (matches.next(), matches.next()) {
            (Some(id), None) => Some(id),
            _ => None,
        }
    }

    /// When the snapshot was last replaced; `None` before the first successful fetch.
    pub fn last_updated(&self) -> Option<DateTime<Local>> {
        self.last_updated
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
