use thiserror::Error;

/// Errors raised while talking to a record store.
#[derive(Debug, Error)]
pub enum RecordError {
    /// Network or TLS failure from the underlying HTTP client.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The record service answered with `"success": false`.
    #[error("record service error: {0}")]
    Api(String),

    #[error("unexpected HTTP status {status} from {url}")]
    UnexpectedStatus { status: u16, url: String },

    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("pagination limit reached: exceeded {max_pages} pages")]
    PaginationLimit { max_pages: usize },

    #[error("invalid record service URL \"{url}\": {reason}")]
    InvalidBaseUrl { url: String, reason: String },

    #[error("failed to read dataset {path}: {source}")]
    DatasetIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("dataset is not a JSON array of listings: {0}")]
    DatasetParse(#[source] serde_json::Error),
}

/// The failure the query orchestration surfaces to callers.
///
/// Only the record store can fail; normalization and filtering never do.
/// Callers are expected to show the message and offer a retry.
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("property data is unavailable: {0}")]
    DataSourceUnavailable(#[source] RecordError),
}

impl From<RecordError> for ServiceError {
    fn from(err: RecordError) -> Self {
        ServiceError::DataSourceUnavailable(err)
    }
}
