use clap::ArgMatches;
use tracing::{error, info};

use invoice_watch_core::{InvoiceWatchError, ListState, RecordSource, events, render_view};

use super::helpers::resolve_source;

pub(crate) async fn handle_list_command(
    matches: &ArgMatches,
) -> Result<(), Box<dyn std::error::Error>> {
    let json_output = matches.get_flag("json");
    let expand = matches.get_one::<String>("expand");

    let (_config, source) = resolve_source(matches)?;
    info!(event = "cli.list_started", source = %source.describe());

    let records = match source.list_invoices().await {
        Ok(records) => records.unwrap_or_default(),
        Err(e) => {
            eprintln!("Error: Failed to fetch invoices: {}", e);
            error!(
                event = "cli.list_failed",
                error = %e,
                error_code = e.error_code()
            );
            events::log_app_error(&e);
            return Err(e.into());
        }
    };

    let count = records.len();

    if json_output {
        println!("{}", serde_json::to_string_pretty(&records)?);
    } else {
        let mut state = ListState::new();
        state.replace_snapshot(records);
        if let Some(text) = expand {
            let id = state.resolve_row_id(text).unwrap_or(text).to_string();
            state.toggle_selection(&id);
            if state.selected_record().is_none() {
                eprintln!("Warning: Invoice '{}' is not in the current list.", id);
            }
        }
        print!("{}", render_view(&state));
    }

    info!(event = "cli.list_completed", count = count);
    Ok(())
}
