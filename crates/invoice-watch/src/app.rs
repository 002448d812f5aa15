use clap::{Arg, ArgAction, Command, value_parser};

/// Arguments shared by every command that talks to a record source.
fn source_args() -> [Arg; 3] {
    [
        Arg::new("file")
            .long("file")
            .short('f')
            .help("Read invoices from a local JSON file (overrides config)")
            .conflicts_with("url"),
        Arg::new("url")
            .long("url")
            .short('u')
            .help("Base URL of a PostgREST-compatible endpoint (overrides config)"),
        Arg::new("table")
            .long("table")
            .short('t')
            .help("Table to select from (overrides config, default: invoices)"),
    ]
}

pub fn build_cli() -> Command {
    Command::new("invoice-watch")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Watch a polled list of invoice records in the terminal")
        .long_about("invoice-watch fetches invoice records from a remote store (or a local JSON file) on a fixed interval, shows them as a table, and lets you expand one row at a time to see the full record.")
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .help("Enable verbose logging output")
                .action(ArgAction::SetTrue)
                .global(true),
        )
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(
            Command::new("watch")
                .about("Poll the record source and show a live, expandable invoice table")
                .long_about(
                    "Fetches immediately, then every interval, re-rendering the table after each successful fetch.\n\n\
                    Controls (type then press Enter):\n\
                    - <invoice id>  expand that row, or collapse it if already open; a unique leading part of the id is enough\n\
                    - :id <id>      same, matching the id exactly (`:id` alone is the empty id)\n\
                    - (empty line)  redraw\n\
                    - :q            quit"
                )
                .args(source_args())
                .arg(
                    Arg::new("interval")
                        .long("interval")
                        .short('i')
                        .help("Seconds between fetches (overrides config, default: 30)")
                        .value_parser(value_parser!(u64).range(1..))
                )
        )
        .subcommand(
            Command::new("list")
                .about("Fetch once and print the invoice table")
                .args(source_args())
                .arg(
                    Arg::new("expand")
                        .long("expand")
                        .short('e')
                        .help("Invoice ID to show expanded with its full detail")
                )
                .arg(
                    Arg::new("json")
                        .long("json")
                        .help("Output the fetched records as JSON")
                        .action(ArgAction::SetTrue)
                        .conflicts_with("expand")
                )
        )
}
