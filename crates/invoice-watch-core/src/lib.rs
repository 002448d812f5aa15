//! invoice-watch-core: polled invoice list with expandable rows
//!
//! This library fetches invoice snapshots from a record source on a fixed
//! period, keeps the latest snapshot and the expanded row, and renders them
//! as a text table. It is used by the `invoice-watch` CLI.
//!
//! # Main Entry Points
//!
//! - [`list`] - The `InvoiceList` component (scheduler + state + view)
//! - [`scheduler`] - Periodic, sequence-tagged fetching
//! - [`sources`] - HTTP and file record sources
//! - [`render`] - Table, detail panel and value formatting
//! - [`config`] - Configuration management

pub mod config;
pub mod errors;
pub mod events;
pub mod list;
pub mod logging;
pub mod records;
pub mod render;
pub mod scheduler;
pub mod sources;
pub mod state;

#[cfg(test)]
pub(crate) mod testing;

// Re-export commonly used types at crate root for convenience
pub use config::WatchConfig;
pub use errors::{ConfigError, InvoiceWatchError};
pub use list::{ApplyResult, InvoiceList};
pub use records::{Invoice, RecordFields};
pub use render::render_view;
pub use scheduler::{FetchOutcome, SchedulerHandle};
pub use sources::{FetchError, RecordSource, Source};
pub use state::ListState;

// Re-export logging initialization
pub use logging::init_logging;
