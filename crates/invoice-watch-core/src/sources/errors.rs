use crate::errors::InvoiceWatchError;

/// Failure to obtain a usable collection from a record source.
///
/// This is the only runtime error kind. The list component logs and swallows
/// it, leaving the last-known-good snapshot on screen.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("Request failed: {message}")]
    Request { message: String },

    #[error("Record source returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Could not decode records: {message}")]
    Decode { message: String },

    #[error("Failed to read records from '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

impl InvoiceWatchError for FetchError {
    fn error_code(&self) -> &'static str {
        match self {
            FetchError::Request { .. } => "FETCH_REQUEST_FAILED",
            FetchError::Status { .. } => "FETCH_BAD_STATUS",
            FetchError::Decode { .. } => "FETCH_DECODE_FAILED",
            FetchError::Io { .. } => "FETCH_IO_ERROR",
        }
    }

    fn is_user_error(&self) -> bool {
        matches!(self, FetchError::Status { status, .. } if *status == 401 || *status == 403 || *status == 404)
    }
}
