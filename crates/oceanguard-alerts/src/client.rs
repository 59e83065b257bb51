//! Shared HTTP plumbing for the NOAA, USGS, and OpenWeather clients.

use std::time::Duration;

use reqwest::{Client, Url};
use serde::de::DeserializeOwned;

use crate::error::AlertsError;

/// Build a `reqwest::Client` with the feed timeout and identifying `User-Agent`.
pub(crate) fn build_http_client(
    user_agent: &str,
    timeout_secs: u64,
) -> Result<Client, AlertsError> {
    Ok(Client::builder()
        .timeout(Duration::from_secs(timeout_secs))
        .connect_timeout(Duration::from_secs(timeout_secs))
        .user_agent(user_agent)
        .build()?)
}

/// Parse `base_url`, normalised to end with exactly one slash so that
/// [`Url::join`] appends to the path instead of replacing its last segment.
pub(crate) fn parse_base_url(base_url: &str) -> Result<Url, AlertsError> {
    let normalised = format!("{}/", base_url.trim_end_matches('/'));
    Url::parse(&normalised).map_err(|e| AlertsError::InvalidBaseUrl {
        url: base_url.to_string(),
        reason: e.to_string(),
    })
}

/// Join `path` onto `base` and append `query` pairs.
pub(crate) fn endpoint(
    base: &Url,
    path: &str,
    query: &[(&str, &str)],
) -> Result<Url, AlertsError> {
    let mut url = base.join(path).map_err(|e| AlertsError::InvalidBaseUrl {
        url: base.to_string(),
        reason: e.to_string(),
    })?;
    if !query.is_empty() {
        let mut pairs = url.query_pairs_mut();
        for (key, value) in query {
            pairs.append_pair(key, value);
        }
    }
    Ok(url)
}

/// GET `url` and decode the JSON body as `T`.
///
/// Request URLs are stripped from transport errors because the OpenWeather
/// query string carries the API key.
pub(crate) async fn get_json<T: DeserializeOwned>(
    client: &Client,
    url: Url,
    context: &str,
) -> Result<T, AlertsError> {
    let response = client
        .get(url)
        .send()
        .await
        .map_err(|e| AlertsError::Http(e.without_url()))?;

    let status = response.status();
    if !status.is_success() {
        return Err(AlertsError::UnexpectedStatus {
            status: status.as_u16(),
            context: context.to_string(),
        });
    }

    let body = response
        .text()
        .await
        .map_err(|e| AlertsError::Http(e.without_url()))?;
    serde_json::from_str(&body).map_err(|e| AlertsError::Deserialize {
        context: context.to_string(),
        source: e,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_url_without_trailing_slash_keeps_its_path() {
        let base = parse_base_url("https://api.openweathermap.org/data/2.5").unwrap();
        let url = endpoint(&base, "weather", &[("units", "metric")]).unwrap();
        assert_eq!(
            url.as_str(),
            "https://api.openweathermap.org/data/2.5/weather?units=metric"
        );
    }

    #[test]
    fn repeated_trailing_slashes_are_collapsed() {
        let base = parse_base_url("https://api.weather.gov//").unwrap();
        let url = endpoint(&base, "alerts/active", &[]).unwrap();
        assert_eq!(url.as_str(), "https://api.weather.gov/alerts/active");
    }

    #[test]
    fn invalid_base_url_is_rejected() {
        let err = parse_base_url("not a url").unwrap_err();
        assert!(matches!(err, AlertsError::InvalidBaseUrl { .. }));
    }
}
