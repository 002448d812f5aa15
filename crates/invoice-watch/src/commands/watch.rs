use std::io::{IsTerminal, Write};
use std::sync::Arc;

use clap::ArgMatches;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{info, warn};

use invoice_watch_core::{ApplyResult, InvoiceList, events};

use super::helpers::resolve_source;

const CLEAR_SCREEN: &str = "\x1b[2J\x1b[H";
const CONTROLS_HINT: &str = "Enter an invoice ID (or its first characters) to expand/collapse it, \
:id <ID> for an exact ID, an empty line to redraw, :q to quit.";

/// Control commands start with this, so any invoice id can be typed as is.
const COMMAND_PREFIX: char = ':';

/// One line of user input.
#[derive(Debug, PartialEq, Eq)]
enum Input<'a> {
    /// Id text, matched against the snapshot by exact id or unique prefix.
    Toggle(&'a str),
    /// Id taken literally, including the empty id.
    ToggleExact(&'a str),
    Redraw,
    Quit,
    Unknown(&'a str),
}

fn parse_input(line: &str) -> Input<'_> {
    let line = line.trim();
    let Some(command) = line.strip_prefix(COMMAND_PREFIX) else {
        return match line {
            "" => Input::Redraw,
            id => Input::Toggle(id),
        };
    };

    match command.split_once(' ') {
        Some(("id", id)) => Input::ToggleExact(id.trim()),
        _ => match command {
            "q" | "quit" => Input::Quit,
            "id" => Input::ToggleExact(""),
            _ => Input::Unknown(line),
        },
    }
}

/// Toggle the row the user meant and report ids that match nothing.
fn toggle_row(list: &mut InvoiceList, text: &str) {
    let id = list
        .state()
        .resolve_row_id(text)
        .unwrap_or(text)
        .to_string();
    if list.toggle(&id).is_some() && list.state().selected_record().is_none() {
        warn!(event = "cli.watch.toggle_unmatched", id = %id);
    }
}

fn draw(list: &InvoiceList, clear: bool, stdin_open: bool) -> std::io::Result<()> {
    let mut out = std::io::stdout().lock();
    if clear {
        write!(out, "{}", CLEAR_SCREEN)?;
    }
    write!(out, "{}", list.render())?;
    if stdin_open {
        writeln!(out, "{}", CONTROLS_HINT)?;
    }
    out.flush()
}

pub(crate) async fn handle_watch_command(
    matches: &ArgMatches,
) -> Result<(), Box<dyn std::error::Error>> {
    let (config, source) = resolve_source(matches)?;
    let description = source.describe();
    let interval = config.interval();

    let mut list = InvoiceList::mount(Arc::new(source), interval);
    events::log_watch_started(&description, interval.as_secs());

    let clear = std::io::stdout().is_terminal();
    let mut stdin_open = true;
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    draw(&list, clear, stdin_open)?;

    let reason = loop {
        tokio::select! {
            outcome = list.next_outcome() => {
                let Some(outcome) = outcome else {
                    break "scheduler_closed";
                };
                if list.apply(outcome) == ApplyResult::Replaced {
                    draw(&list, clear, stdin_open)?;
                }
            }
            line = lines.next_line(), if stdin_open => {
                match line {
                    Ok(Some(line)) => match parse_input(&line) {
                        Input::Quit => break "quit",
                        Input::Redraw => draw(&list, clear, stdin_open)?,
                        Input::Toggle(text) => {
                            toggle_row(&mut list, text);
                            draw(&list, clear, stdin_open)?;
                        }
                        Input::ToggleExact(id) => {
                            list.toggle(id);
                            draw(&list, clear, stdin_open)?;
                        }
                        Input::Unknown(command) => {
                            warn!(event = "cli.watch.unknown_command", command = command);
                            draw(&list, clear, stdin_open)?;
                        }
                    },
                    Ok(None) => {
                        info!(event = "cli.watch.stdin_closed", "Input closed - watching without controls");
                        stdin_open = false;
                    }
                    Err(e) => {
                        warn!(event = "cli.watch.stdin_failed", error = %e);
                        stdin_open = false;
                    }
                }
            }
            _ = tokio::signal::ctrl_c() => break "ctrl_c",
        }
    };

    list.teardown();
    events::log_watch_stopped(reason);
    Ok(())
}
