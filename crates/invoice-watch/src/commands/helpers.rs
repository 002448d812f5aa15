use std::path::PathBuf;

use clap::ArgMatches;
use tracing::{error, warn};

use invoice_watch_core::config::WatchConfig;
use invoice_watch_core::{InvoiceWatchError, Source};

/// Load configuration with warning on errors.
///
/// Falls back to defaults if config loading fails, but notifies the user via:
/// - stderr message for immediate visibility
/// - structured log event `cli.config.load_failed` for debugging
pub fn load_config_with_warning() -> WatchConfig {
    match WatchConfig::load_hierarchy() {
        Ok(config) => config,
        Err(e) => {
            eprintln!(
                "Warning: Could not load config: {}. Using defaults.\n\
                 Tip: Check ~/.invoice-watch/config.toml and ./.invoice-watch/config.toml for syntax errors.",
                e
            );
            warn!(
                event = "cli.config.load_failed",
                error = %e,
                error_code = e.error_code(),
                "Config load failed, using defaults"
            );
            WatchConfig::default()
        }
    }
}

/// Apply source-related CLI flags on top of a loaded config.
///
/// Selecting `--file` or `--url` replaces whichever source the config files chose.
pub fn apply_cli_overrides(config: &mut WatchConfig, matches: &ArgMatches) {
    if let Some(file) = matches.get_one::<String>("file") {
        config.source.file = Some(PathBuf::from(file));
        config.source.url = None;
    }
    if let Some(url) = matches.get_one::<String>("url") {
        config.source.url = Some(url.clone());
        config.source.file = None;
    }
    if let Some(table) = matches.get_one::<String>("table") {
        config.source.table = Some(table.clone());
    }
    // Only `watch` defines --interval.
    if let Ok(Some(interval)) = matches.try_get_one::<u64>("interval") {
        config.poll.interval_secs = Some(*interval);
    }
}

/// Resolve the final config and the record source for a command.
pub fn resolve_source(
    matches: &ArgMatches,
) -> Result<(WatchConfig, Source), Box<dyn std::error::Error>> {
    let mut config = load_config_with_warning();
    apply_cli_overrides(&mut config, matches);

    if let Err(e) = config.validate() {
        eprintln!("Error: {}", e);
        error!(event = "cli.config.invalid", error = %e, error_code = e.error_code());
        return Err(e.into());
    }

    match Source::from_config(&config) {
        Ok(source) => Ok((config, source)),
        Err(e) => {
            eprintln!("Error: {}", e);
            error!(event = "cli.source.missing", error = %e, error_code = e.error_code());
            Err(e.into())
        }
    }
}
