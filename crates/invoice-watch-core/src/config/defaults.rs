//! Default values and resolved accessors for configuration types.

use std::time::Duration;

use crate::config::types::{FieldsConfig, PollConfig, SourceConfig, WatchConfig};
use crate::records::RecordFields;

/// Default table name queried on the REST endpoint.
pub const DEFAULT_TABLE: &str = "invoices";

/// Default seconds between scheduled fetches.
pub const DEFAULT_INTERVAL_SECS: u64 = 30;

/// Default per-request deadline in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Environment variable consulted for the API key when none is configured.
pub const API_KEY_ENV: &str = "INVOICE_WATCH_API_KEY";

impl SourceConfig {
    pub fn table(&self) -> &str {
        self.table.as_deref().unwrap_or(DEFAULT_TABLE)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS))
    }
}

impl PollConfig {
    pub fn interval(&self) -> Duration {
        Duration::from_secs(self.interval_secs.unwrap_or(DEFAULT_INTERVAL_SECS))
    }
}

impl FieldsConfig {
    /// Resolve configured key names, falling back to `id` / `customerRef` / `balance`.
    pub fn record_fields(&self) -> RecordFields {
        let defaults = RecordFields::default();
        RecordFields {
            id: self.id.clone().unwrap_or(defaults.id),
            customer_ref: self.customer_ref.clone().unwrap_or(defaults.customer_ref),
            balance: self.balance.clone().unwrap_or(defaults.balance),
        }
    }
}

impl WatchConfig {
    pub fn interval(&self) -> Duration {
        self.poll.interval()
    }

    pub fn record_fields(&self) -> RecordFields {
        self.fields.record_fields()
    }
}
