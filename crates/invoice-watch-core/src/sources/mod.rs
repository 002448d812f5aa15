//! Record sources: where invoice snapshots come from.

pub mod errors;
pub mod file;
pub mod http;
pub mod traits;

pub use errors::FetchError;
pub use file::FileSource;
pub use http::HttpSource;
pub use traits::RecordSource;

use crate::config::WatchConfig;
use crate::errors::ConfigError;
use crate::records::Invoice;

/// The record source selected by configuration.
pub enum Source {
    Http(HttpSource),
    File(FileSource),
}

impl Source {
    /// Build the configured source. `file` is checked before `url`.
    pub fn from_config(config: &WatchConfig) -> Result<Self, ConfigError> {
        let fields = config.record_fields();

        if let Some(path) = &config.source.file {
            return Ok(Source::File(FileSource::new(path.clone(), fields)));
        }

        if let Some(url) = &config.source.url {
            return Ok(Source::Http(HttpSource::new(
                url,
                config.source.table(),
                config.source.api_key.clone(),
                config.source.timeout(),
                fields,
            )));
        }

        Err(ConfigError::MissingSource)
    }

    /// Short human-readable description for logs.
    pub fn describe(&self) -> String {
        match self {
            Source::Http(source) => format!("http:{}", source.endpoint()),
            Source::File(source) => format!("file:{}", source.path().display()),
        }
    }
}

impl RecordSource for Source {
    async fn list_invoices(&self) -> Result<Option<Vec<Invoice>>, FetchError> {
        match self {
            Source::Http(source) => source.list_invoices().await,
            Source::File(source) => source.list_invoices().await,
        }
    }
}
