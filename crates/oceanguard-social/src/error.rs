use oceanguard_core::ReportStoreError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SocialError {
    /// Network, TLS, or timeout failure talking to a social platform.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("unexpected HTTP status {status} from {url}")]
    UnexpectedStatus { status: u16, url: String },

    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    /// The local report store could not be read. Unlike upstream fetch
    /// failures this aborts the whole aggregation.
    #[error(transparent)]
    ReportStore(#[from] ReportStoreError),
}
