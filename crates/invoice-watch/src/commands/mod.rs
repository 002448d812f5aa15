use clap::ArgMatches;
use tracing::error;

use invoice_watch_core::events;

pub mod helpers;

mod list;
mod watch;

pub async fn run_command(matches: &ArgMatches) -> Result<(), Box<dyn std::error::Error>> {
    events::log_app_startup();

    match matches.subcommand() {
        Some(("watch", sub_matches)) => watch::handle_watch_command(sub_matches).await,
        Some(("list", sub_matches)) => list::handle_list_command(sub_matches).await,
        _ => {
            error!(event = "cli.command_unknown");
            Err("Unknown command".into())
        }
    }
}
