use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize logging with optional quiet mode.
///
/// When `quiet` is true, only error-level events are emitted.
/// When `quiet` is false, info-level and above events are emitted.
///
/// Logs go to stderr as JSON lines so the rendered table on stdout stays clean.
pub fn init_logging(quiet: bool) {
    let directive = if quiet {
        "invoice_watch=error"
    } else {
        "invoice_watch=info"
    };
    let core_directive = if quiet {
        "invoice_watch_core=error"
    } else {
        "invoice_watch_core=info"
    };

    let filter = match (directive.parse(), core_directive.parse()) {
        (Ok(cli), Ok(core)) => EnvFilter::from_default_env()
            .add_directive(cli)
            .add_directive(core),
        _ => EnvFilter::from_default_env(),
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .json()
                .with_writer(std::io::stderr)
                .with_current_span(false)
                .with_span_list(false),
        )
        .with(filter)
        .init();
}
