use thiserror::Error;

/// Errors returned by the government-feed and weather clients.
///
/// The alert collectors never return these to their callers; they log them
/// and yield an empty list. Only [`crate::OceanWeatherClient`] surfaces them.
#[derive(Debug, Error)]
pub enum AlertsError {
    /// Network or TLS failure from the underlying HTTP client.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The upstream answered with a non-2xx status.
    #[error("unexpected HTTP status {status} from {context}")]
    UnexpectedStatus { status: u16, context: String },

    /// The response body could not be deserialized into the expected type.
    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid base URL '{url}': {reason}")]
    InvalidBaseUrl { url: String, reason: String },

    /// Weather lookups need `OPENWEATHER_API_KEY`.
    #[error("OpenWeather API key not configured")]
    MissingApiKey,
}
