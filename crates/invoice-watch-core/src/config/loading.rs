//! Configuration loading and merging logic.
//!
//! Configuration is loaded in the following order (later sources override earlier ones):
//! 1. **Hardcoded defaults** - Built-in fallback values
//! 2. **User config** - `~/.invoice-watch/config.toml`
//! 3. **Project config** - `./.invoice-watch/config.toml`
//! 4. **Environment** - `INVOICE_WATCH_API_KEY` when no key is configured
//! 5. **CLI arguments** - Command-line flags (applied by the CLI)

use std::fs;
use std::path::{Path, PathBuf};

use crate::config::defaults::API_KEY_ENV;
use crate::config::types::{FieldsConfig, PollConfig, SourceConfig, WatchConfig};
use crate::config::validation::validate_config;
use crate::errors::ConfigError;

const CONFIG_DIR: &str = ".invoice-watch";
const CONFIG_FILE: &str = "config.toml";

/// Load configuration from the hierarchy of config files.
///
/// # Errors
///
/// Returns an error if a config file exists but cannot be read or parsed, or
/// if the merged configuration fails validation. Missing files are not errors.
pub fn load_hierarchy() -> Result<WatchConfig, ConfigError> {
    let mut paths = Vec::new();
    if let Some(home) = dirs::home_dir() {
        paths.push(home.join(CONFIG_DIR).join(CONFIG_FILE));
    } else {
        tracing::debug!(
            event = "core.config.home_dir_missing",
            "Could not find home directory - skipping user config"
        );
    }
    if let Ok(cwd) = std::env::current_dir() {
        paths.push(cwd.join(CONFIG_DIR).join(CONFIG_FILE));
    }

    let mut config = load_from_paths(&paths)?;
    apply_env_api_key(&mut config, std::env::var(API_KEY_ENV).ok());
    validate_config(&config)?;

    Ok(config)
}

/// Load and merge the given config files in order, skipping missing ones.
pub fn load_from_paths(paths: &[PathBuf]) -> Result<WatchConfig, ConfigError> {
    let mut config = WatchConfig::default();

    for path in paths {
        match load_config_file(path)? {
            Some(file_config) => {
                tracing::debug!(
                    event = "core.config.file_loaded",
                    path = %path.display()
                );
                config = merge_configs(config, file_config);
            }
            None => continue,
        }
    }

    Ok(config)
}

/// Load a configuration file. Returns `Ok(None)` if the file does not exist.
fn load_config_file(path: &Path) -> Result<Option<WatchConfig>, ConfigError> {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(e) => {
            return Err(ConfigError::ConfigReadError {
                path: path.display().to_string(),
                source: e,
            });
        }
    };

    toml::from_str(&content)
        .map(Some)
        .map_err(|e| ConfigError::ConfigParseError {
            path: path.display().to_string(),
            message: e.to_string(),
        })
}

/// Use the environment API key only when no config file provided one.
fn apply_env_api_key(config: &mut WatchConfig, env_key: Option<String>) {
    if config.source.api_key.is_none() {
        config.source.api_key = env_key.filter(|k| !k.is_empty());
    }
}

/// Merge two configurations, with override_config taking precedence.
///
/// A source selected by the override (url or file) replaces the base's
/// selection entirely so the two never end up set together.
pub fn merge_configs(base: WatchConfig, override_config: WatchConfig) -> WatchConfig {
    let override_selects_source =
        override_config.source.url.is_some() || override_config.source.file.is_some();
    let (url, file) = if override_selects_source {
        (override_config.source.url, override_config.source.file)
    } else {
        (base.source.url, base.source.file)
    };

    WatchConfig {
        source: SourceConfig {
            url,
            file,
            table: override_config.source.table.or(base.source.table),
            api_key: override_config.source.api_key.or(base.source.api_key),
            timeout_secs: override_config
                .source
                .timeout_secs
                .or(base.source.timeout_secs),
        },
        poll: PollConfig {
            interval_secs: override_config
                .poll
                .interval_secs
                .or(base.poll.interval_secs),
        },
        fields: FieldsConfig {
            id: override_config.fields.id.or(base.fields.id),
            customer_ref: override_config
                .fields
                .customer_ref
                .or(base.fields.customer_ref),
            balance: override_config.fields.balance.or(base.fields.balance),
        },
    }
}
