use chrono::{DateTime, Utc};
use oceanguard_core::AppConfig;
use serde::Serialize;

pub const NOAA_BASE_URL: &str = "https://api.weather.gov";
pub const USGS_BASE_URL: &str = "https://earthquake.usgs.gov";
pub const OPENWEATHER_BASE_URL: &str = "https://api.openweathermap.org/data/2.5";

/// Kind of hazard an alert describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertCategory {
    Weather,
    Tsunami,
    Earthquake,
}

/// Government agency that issued an alert.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum AlertSource {
    #[serde(rename = "NOAA")]
    Noaa,
    #[serde(rename = "USGS")]
    Usgs,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

/// A NOAA weather/tsunami alert or USGS earthquake in one common shape.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NormalizedAlert {
    /// Source-native id prefixed with `noaa:` or `usgs:`.
    pub id: String,
    pub category: AlertCategory,
    pub source: AlertSource,
    pub title: String,
    pub severity_label: String,
    pub description: String,
    pub location_label: String,
    pub coordinates: Option<Coordinates>,
    pub observed_at: DateTime<Utc>,
    pub expires_at: Option<DateTime<Utc>>,
    pub details_url: Option<String>,
    pub instruction: Option<String>,
}

/// Per-category counts. `total` always equals the sum of the other three.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct AlertSummary {
    pub total: usize,
    pub weather: usize,
    pub tsunami: usize,
    pub earthquake: usize,
}

impl AlertSummary {
    #[must_use]
    pub fn from_alerts(alerts: &[NormalizedAlert]) -> Self {
        let count = |category| alerts.iter().filter(|a| a.category == category).count();
        let weather = count(AlertCategory::Weather);
        let tsunami = count(AlertCategory::Tsunami);
        let earthquake = count(AlertCategory::Earthquake);
        Self {
            total: weather + tsunami + earthquake,
            weather,
            tsunami,
            earthquake,
        }
    }
}

/// Merged government alert feed, most recent first.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AlertFeed {
    pub alerts: Vec<NormalizedAlert>,
    pub summary: AlertSummary,
    pub last_updated: DateTime<Utc>,
}

/// Endpoints and client settings for the government feeds and OpenWeather.
#[derive(Clone)]
pub struct AlertsConfig {
    pub noaa_base_url: String,
    pub usgs_base_url: String,
    pub openweather_base_url: String,
    pub user_agent: String,
    pub timeout_secs: u64,
    pub openweather_api_key: Option<String>,
}

impl std::fmt::Debug for AlertsConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AlertsConfig")
            .field("noaa_base_url", &self.noaa_base_url)
            .field("usgs_base_url", &self.usgs_base_url)
            .field("openweather_base_url", &self.openweather_base_url)
            .field("user_agent", &self.user_agent)
            .field("timeout_secs", &self.timeout_secs)
            .field(
                "openweather_api_key",
                &self.openweather_api_key.as_ref().map(|_| "[redacted]"),
            )
            .finish()
    }
}

impl Default for AlertsConfig {
    fn default() -> Self {
        Self {
            noaa_base_url: NOAA_BASE_URL.to_string(),
            usgs_base_url: USGS_BASE_URL.to_string(),
            openweather_base_url: OPENWEATHER_BASE_URL.to_string(),
            user_agent: "OceanGuard-App/1.0 (contact@oceanguard.com)".to_string(),
            timeout_secs: 10,
            openweather_api_key: None,
        }
    }
}

impl AlertsConfig {
    #[must_use]
    pub fn from_app_config(config: &AppConfig) -> Self {
        Self {
            user_agent: config.alerts_user_agent.clone(),
            timeout_secs: config.alerts_timeout_secs,
            openweather_api_key: config.openweather_api_key.clone(),
            ..Self::default()
        }
    }
}
