//! USGS earthquake collector (FDSN event service, GeoJSON).

use reqwest::{Client, Url};
use serde::Deserialize;

use crate::client::{build_http_client, endpoint, get_json, parse_base_url};
use crate::error::AlertsError;
use crate::normalize::{is_relevant_quake, usgs_to_alert};
use crate::types::{AlertsConfig, NormalizedAlert};

/// Earthquakes kept after the relevance filter, newest first.
pub const MAX_USGS_ALERTS: usize = 15;

const MIN_MAGNITUDE: &str = "4.5";
const QUERY_LIMIT: &str = "50";

#[derive(Debug, Deserialize)]
pub(crate) struct UsgsCollection {
    #[serde(default)]
    pub(crate) features: Vec<UsgsFeature>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct UsgsFeature {
    pub(crate) id: String,
    pub(crate) properties: UsgsProperties,
    pub(crate) geometry: Option<UsgsGeometry>,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct UsgsProperties {
    pub(crate) mag: Option<f64>,
    pub(crate) place: Option<String>,
    /// Epoch milliseconds.
    pub(crate) time: Option<i64>,
    pub(crate) url: Option<String>,
    #[serde(default)]
    pub(crate) tsunami: i64,
    pub(crate) title: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct UsgsGeometry {
    /// `[lng, lat, depth_km]`.
    pub(crate) coordinates: Vec<f64>,
}

pub struct UsgsClient {
    client: Client,
    base_url: Url,
}

impl UsgsClient {
    /// # Errors
    ///
    /// Returns [`AlertsError::Http`] if the HTTP client cannot be built, or
    /// [`AlertsError::InvalidBaseUrl`] for a malformed `usgs_base_url`.
    pub fn new(config: &AlertsConfig) -> Result<Self, AlertsError> {
        Ok(Self {
            client: build_http_client(&config.user_agent, config.timeout_secs)?,
            base_url: parse_base_url(&config.usgs_base_url)?,
        })
    }

    /// Recent shallow-and-strong or tsunami-flagged earthquakes.
    ///
    /// Never fails: network and parse errors are logged and yield an empty list.
    pub async fn fetch_earthquake_alerts(&self) -> Vec<NormalizedAlert> {
        match self.try_fetch().await {
            Ok(alerts) => {
                tracing::debug!(
                    source = "usgs",
                    count = alerts.len(),
                    "collected USGS earthquakes"
                );
                alerts
            }
            Err(e) => {
                tracing::warn!(source = "usgs", error = %e, "USGS earthquake fetch failed");
                Vec::new()
            }
        }
    }

    async fn try_fetch(&self) -> Result<Vec<NormalizedAlert>, AlertsError> {
        let url = endpoint(
            &self.base_url,
            "fdsnws/event/1/query",
            &[
                ("format", "geojson"),
                ("minmagnitude", MIN_MAGNITUDE),
                ("limit", QUERY_LIMIT),
                ("orderby", "time"),
            ],
        )?;
        let collection: UsgsCollection = get_json(&self.client, url, "USGS earthquakes").await?;

        Ok(collection
            .features
            .iter()
            .filter(|feature| is_relevant_quake(feature))
            .filter_map(usgs_to_alert)
            .take(MAX_USGS_ALERTS)
            .collect())
    }
}
