//! Test doubles for record sources.

use std::collections::VecDeque;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use serde_json::Value;
use tokio::sync::Semaphore;

use crate::records::{Invoice, RecordFields};
use crate::sources::{FetchError, RecordSource};

pub type FetchResult = Result<Option<Vec<Invoice>>, FetchError>;

/// Build an invoice from a JSON object literal with the default field names.
pub fn invoice(value: Value) -> Invoice {
    match value {
        Value::Object(map) => Invoice::from_map(map, &RecordFields::default()),
        other => panic!("invoice fixture must be an object, got {}", other),
    }
}

pub fn failure(message: &str) -> FetchError {
    FetchError::Request {
        message: message.to_string(),
    }
}

/// Returns scripted results in order, then empty collections forever.
pub struct ScriptedSource {
    responses: Mutex<VecDeque<FetchResult>>,
    calls: AtomicUsize,
}

impl ScriptedSource {
    pub fn new(responses: Vec<FetchResult>) -> Self {
        Self {
            responses: Mutex::new(responses.into()),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl RecordSource for ScriptedSource {
    async fn list_invoices(&self) -> FetchResult {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let next = self.responses.lock().unwrap().pop_front();
        next.unwrap_or(Ok(Some(Vec::new())))
    }
}

/// Holds every fetch until [`GatedSource::release`] lets one through.
pub struct GatedSource {
    gate: Semaphore,
    calls: AtomicUsize,
    records: Vec<Invoice>,
}

impl GatedSource {
    pub fn new(records: Vec<Invoice>) -> Self {
        Self {
            gate: Semaphore::new(0),
            calls: AtomicUsize::new(0),
            records,
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn release(&self, count: usize) {
        self.gate.add_permits(count);
    }
}

impl RecordSource for GatedSource {
    async fn list_invoices(&self) -> FetchResult {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match self.gate.acquire().await {
            Ok(permit) => {
                permit.forget();
                Ok(Some(self.records.clone()))
            }
            Err(_) => Err(failure("gate closed")),
        }
    }
}
