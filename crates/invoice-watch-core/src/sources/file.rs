//! Local JSON file record source.
//!
//! The file is re-read on every fetch, so editing it while `watch` runs is
//! picked up on the next tick.

use std::path::{Path, PathBuf};

use serde_json::Value;

use crate::records::{Invoice, RecordFields, decode_payload};
use crate::sources::errors::FetchError;
use crate::sources::traits::RecordSource;

pub struct FileSource {
    path: PathBuf,
    fields: RecordFields,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>, fields: RecordFields) -> Self {
        Self {
            path: path.into(),
            fields,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl RecordSource for FileSource {
    async fn list_invoices(&self) -> Result<Option<Vec<Invoice>>, FetchError> {
        let content = tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|e| FetchError::Io {
                path: self.path.display().to_string(),
                source: e,
            })?;

        let payload: Value = serde_json::from_str(&content).map_err(|e| FetchError::Decode {
            message: format!("{}: {}", self.path.display(), e),
        })?;

        decode_payload(payload, &self.fields)
    }
}
