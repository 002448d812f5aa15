//! Configuration validation.

use crate::config::types::WatchConfig;
use crate::errors::ConfigError;

/// Validate a merged configuration.
///
/// A missing source is not a validation error here; callers that need a
/// source resolve it with [`crate::sources::Source::from_config`].
pub fn validate_config(config: &WatchConfig) -> Result<(), ConfigError> {
    if config.poll.interval_secs == Some(0) {
        return Err(ConfigError::InvalidConfiguration {
            message: "poll.interval_secs must be greater than 0".to_string(),
        });
    }

    if config.source.timeout_secs == Some(0) {
        return Err(ConfigError::InvalidConfiguration {
            message: "source.timeout_secs must be greater than 0".to_string(),
        });
    }

    if config.source.url.is_some() && config.source.file.is_some() {
        return Err(ConfigError::InvalidConfiguration {
            message: "source.url and source.file are mutually exclusive".to_string(),
        });
    }

    if let Some(url) = &config.source.url
        && !(url.starts_with("http://") || url.starts_with("https://"))
    {
        return Err(ConfigError::InvalidConfiguration {
            message: format!("source.url must start with http:// or https://, got '{}'", url),
        });
    }

    if let Some(table) = &config.source.table
        && table.trim().is_empty()
    {
        return Err(ConfigError::InvalidConfiguration {
            message: "source.table must not be empty".to_string(),
        });
    }

    let fields = [
        ("fields.id", &config.fields.id),
        ("fields.customer_ref", &config.fields.customer_ref),
        ("fields.balance", &config.fields.balance),
    ];
    for (name, value) in fields {
        if let Some(v) = value
            && v.is_empty()
        {
            return Err(ConfigError::InvalidConfiguration {
                message: format!("{} must not be empty", name),
            });
        }
    }

    Ok(())
}
