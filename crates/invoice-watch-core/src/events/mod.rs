//! Lifecycle log events shared by the CLI commands.

use tracing::{error, info};

pub fn log_app_startup() {
    info!(
        event = "core.app.startup_completed",
        version = env!("CARGO_PKG_VERSION")
    );
}

/// Logged once the watch loop has mounted its list and armed the scheduler.
pub fn log_watch_started(source: &str, interval_secs: u64) {
    info!(
        event = "core.watch.started",
        source = source,
        interval_secs = interval_secs
    );
}

/// Logged when the watch loop exits, with what ended it (`quit`, `ctrl_c`, `stdin_closed`).
pub fn log_watch_stopped(reason: &str) {
    info!(event = "core.watch.stopped", reason = reason);
}

pub fn log_app_error(error: &dyn std::error::Error) {
    error!(
        event = "core.app.error_occurred",
        error = %error,
        error_type = std::any::type_name_of_val(error)
    );
}
