//! Configuration type definitions for invoice-watch.
//!
//! These types are deserialized from TOML config files.
//!
//! # Example Configuration
//!
//! ```toml
//! [source]
//! url = "https://example.supabase.co"
//! table = "invoices"
//! api_key = "service-key"
//! timeout_secs = 10
//!
//! [poll]
//! interval_secs = 30
//!
//! [fields]
//! id = "Id"
//! customer_ref = "CustomerRef"
//! balance = "Balance"
//! ```

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Main configuration loaded from TOML config files.
///
/// Loaded from:
/// 1. User config: `~/.invoice-watch/config.toml`
/// 2. Project config: `./.invoice-watch/config.toml`
///
/// Project config values override user config values.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct WatchConfig {
    /// Where invoice records are fetched from
    #[serde(default)]
    pub source: SourceConfig,

    /// Polling behavior
    #[serde(default)]
    pub poll: PollConfig,

    /// JSON key names used to read records
    #[serde(default)]
    pub fields: FieldsConfig,
}

/// Record source configuration.
///
/// Exactly one of `url` or `file` selects the source.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct SourceConfig {
    /// Base URL of a PostgREST-compatible REST endpoint.
    #[serde(default)]
    pub url: Option<String>,

    /// Table to select from (default: `invoices`).
    #[serde(default)]
    pub table: Option<String>,

    /// API key sent as `apikey` and bearer token. Also read from `INVOICE_WATCH_API_KEY`.
    #[serde(default)]
    pub api_key: Option<String>,

    /// Local JSON file read on every fetch instead of a remote store.
    #[serde(default)]
    pub file: Option<PathBuf>,

    /// Per-request deadline in seconds (default: 10).
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

/// Polling configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct PollConfig {
    /// Seconds between scheduled fetches (default: 30).
    #[serde(default)]
    pub interval_secs: Option<u64>,
}

/// Record field name configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct FieldsConfig {
    #[serde(default)]
    pub id: Option<String>,

    #[serde(default)]
    pub customer_ref: Option<String>,

    #[serde(default)]
    pub balance: Option<String>,
}
