use invoice_watch_core::init_logging;

mod app;
mod commands;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let app = app::build_cli();
    let matches = app.get_matches();

    // Quiet by default; -v/--verbose enables info-level logs
    let verbose = matches.get_flag("verbose");
    init_logging(!verbose);

    // Single-threaded event loop: timer ticks, fetch results and input are
    // multiplexed on one thread.
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    let result = runtime.block_on(commands::run_command(&matches));

    // A pending stdin read cannot be cancelled; do not wait for it.
    runtime.shutdown_background();

    result
}
