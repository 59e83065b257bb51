//! NOAA active-alerts collector (`api.weather.gov`).

use chrono::Utc;
use reqwest::{Client, Url};
use serde::Deserialize;

use crate::client::{build_http_client, endpoint, get_json, parse_base_url};
use crate::error::AlertsError;
use crate::normalize::{is_marine_relevant, noaa_to_alert};
use crate::types::{AlertsConfig, NormalizedAlert};

/// NOAA alerts kept after the marine filter, in feed order.
pub const MAX_NOAA_ALERTS: usize = 20;

#[derive(Debug, Deserialize)]
pub(crate) struct NoaaCollection {
    #[serde(default)]
    pub(crate) features: Vec<NoaaFeature>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct NoaaFeature {
    pub(crate) id: String,
    pub(crate) properties: NoaaProperties,
}

/// Alert properties. Every field is nullable in the live feed.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct NoaaProperties {
    pub(crate) event: Option<String>,
    pub(crate) severity: Option<String>,
    pub(crate) headline: Option<String>,
    pub(crate) description: Option<String>,
    pub(crate) instruction: Option<String>,
    pub(crate) area_desc: Option<String>,
    pub(crate) onset: Option<String>,
    pub(crate) expires: Option<String>,
}

pub struct NoaaClient {
    client: Client,
    base_url: Url,
}

impl NoaaClient {
    /// # Errors
    ///
    /// Returns [`AlertsError::Http`] if the HTTP client cannot be built, or
    /// [`AlertsError::InvalidBaseUrl`] for a malformed `noaa_base_url`.
    pub fn new(config: &AlertsConfig) -> Result<Self, AlertsError> {
        Ok(Self {
            client: build_http_client(&config.user_agent, config.timeout_secs)?,
            base_url: parse_base_url(&config.noaa_base_url)?,
        })
    }

    /// Active marine-relevant weather and tsunami alerts.
    ///
    /// Never fails: network and parse errors are logged and yield an empty list.
    pub async fn fetch_weather_alerts(&self) -> Vec<NormalizedAlert> {
        match self.try_fetch().await {
            Ok(alerts) => {
                tracing::debug!(source = "noaa", count = alerts.len(), "collected NOAA alerts");
                alerts
            }
            Err(e) => {
                tracing::warn!(source = "noaa", error = %e, "NOAA alert fetch failed");
                Vec::new()
            }
        }
    }

    async fn try_fetch(&self) -> Result<Vec<NormalizedAlert>, AlertsError> {
        let url = endpoint(&self.base_url, "alerts/active", &[("message_type", "alert")])?;
        let collection: NoaaCollection = get_json(&self.client, url, "NOAA active alerts").await?;

        let fetched_at = Utc::now();
        Ok(collection
            .features
            .iter()
            .filter(|feature| is_marine_relevant(&feature.properties))
            .map(|feature| noaa_to_alert(feature, fetched_at))
            .take(MAX_NOAA_ALERTS)
            .collect())
    }
}
