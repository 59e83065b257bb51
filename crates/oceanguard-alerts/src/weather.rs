//! Point marine weather from OpenWeather, with Beaufort-style sea conditions.

use chrono::{DateTime, Utc};
use reqwest::{Client, Url};
use serde::{Deserialize, Serialize};

use crate::client::{build_http_client, endpoint, get_json, parse_base_url};
use crate::error::AlertsError;
use crate::types::{AlertsConfig, Coordinates};

/// 3-hour steps requested for the forecast (next 24 hours).
const FORECAST_STEPS: &str = "8";
const DEFAULT_VISIBILITY_M: i64 = 10_000;
const MS_TO_KMH: f64 = 3.6;

const COMPASS_POINTS: [&str; 16] = [
    "N", "NNE", "NE", "ENE", "E", "ESE", "SE", "SSE", "S", "SSW", "SW", "WSW", "W", "WNW", "NW",
    "NNW",
];

/// `(upper bound km/h exclusive, condition, wave height range, description)`.
const SEA_STATE_TABLE: &[(f64, &str, &str, &str)] = &[
    (6.0, "Calm", "0-0.1m", "Sea like a mirror"),
    (12.0, "Light Air", "0.1-0.2m", "Ripples without crests"),
    (20.0, "Light Breeze", "0.2-0.5m", "Small wavelets"),
    (29.0, "Gentle Breeze", "0.5-1m", "Large wavelets, some crests"),
    (39.0, "Moderate Breeze", "1-2m", "Small waves, frequent white horses"),
    (50.0, "Fresh Breeze", "2-3m", "Moderate waves, many white horses"),
    (62.0, "Strong Breeze", "3-4m", "Large waves, white foam crests"),
    (75.0, "Near Gale", "4-5.5m", "Sea heaps up, foam streaks"),
    (89.0, "Gale", "5.5-7.5m", "High waves, dense foam"),
];
const STORM: (&str, &str, &str) = ("Storm", "7.5m+", "Very high waves, dangerous conditions");

// --- OpenWeather wire types -------------------------------------------------

#[derive(Debug, Deserialize)]
struct CurrentResponse {
    name: Option<String>,
    #[serde(default)]
    weather: Vec<WireCondition>,
    main: WireMain,
    #[serde(default)]
    wind: WireWind,
    visibility: Option<i64>,
}

#[derive(Debug, Deserialize)]
struct WireCondition {
    main: Option<String>,
    description: Option<String>,
    icon: Option<String>,
}

#[derive(Debug, Deserialize)]
struct WireMain {
    temp: f64,
    #[serde(default)]
    feels_like: f64,
    #[serde(default)]
    temp_min: f64,
    #[serde(default)]
    temp_max: f64,
    #[serde(default)]
    humidity: i64,
    #[serde(default)]
    pressure: i64,
}

#[derive(Debug, Default, Deserialize)]
struct WireWind {
    #[serde(default)]
    speed: f64,
    #[serde(default)]
    deg: f64,
    gust: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct ForecastResponse {
    #[serde(default)]
    list: Vec<ForecastItem>,
}

#[derive(Debug, Deserialize)]
struct ForecastItem {
    dt_txt: String,
    main: WireMain,
    #[serde(default)]
    weather: Vec<WireCondition>,
    #[serde(default)]
    wind: WireWind,
    rain: Option<WireRain>,
}

#[derive(Debug, Deserialize)]
struct WireRain {
    #[serde(rename = "3h", default)]
    three_hours: f64,
}

// --- Public shapes ----------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeatherLocation {
    pub lat: f64,
    pub lng: f64,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WeatherSummary {
    pub description: String,
    pub icon: String,
    pub main: String,
}

/// Degrees Celsius, rounded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Temperature {
    pub current: i64,
    pub feels_like: i64,
    pub min: i64,
    pub max: i64,
}

/// Wind in km/h with the raw bearing and its compass point.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Wind {
    pub speed: i64,
    pub direction: f64,
    pub gust: Option<i64>,
    pub compass_direction: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SeaConditions {
    pub condition: &'static str,
    pub wave_height_range: &'static str,
    pub description: &'static str,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OceanWeather {
    pub location: WeatherLocation,
    pub weather: WeatherSummary,
    pub temperature: Temperature,
    pub wind: Wind,
    pub sea_conditions: SeaConditions,
    /// Metres.
    pub visibility: i64,
    pub humidity: i64,
    pub pressure: i64,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ForecastEntry {
    /// OpenWeather's `dt_txt`, e.g. `2025-07-01 12:00:00`.
    pub timestamp: String,
    pub temperature: i64,
    pub weather: String,
    pub wind_speed: i64,
    pub wind_direction: f64,
    pub humidity: i64,
    /// Rain volume over the 3-hour step, mm.
    pub rain: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MarineForecast {
    pub location: Coordinates,
    pub forecasts: Vec<ForecastEntry>,
}

// --- Pure helpers -----------------------------------------------------------

/// Round half up, matching how the dashboard rounds displayed values.
#[allow(clippy::cast_possible_truncation)]
fn round_half_up(value: f64) -> i64 {
    (value + 0.5).floor() as i64
}

fn ms_to_kmh(speed: f64) -> i64 {
    round_half_up(speed * MS_TO_KMH)
}

/// 16-point compass label for a bearing in degrees.
#[must_use]
pub fn wind_direction(degrees: f64) -> &'static str {
    #[allow(clippy::cast_sign_loss, clippy::cast_possible_truncation)]
    let index = round_half_up(degrees / 22.5).rem_euclid(16) as usize;
    COMPASS_POINTS[index]
}

/// Beaufort-style sea state for a wind speed in km/h.
#[must_use]
pub fn sea_conditions(wind_kmh: f64) -> SeaConditions {
    let (condition, wave_height_range, description) = SEA_STATE_TABLE
        .iter()
        .find(|(upper, ..)| wind_kmh < *upper)
        .map_or(STORM, |&(_, condition, range, description)| {
            (condition, range, description)
        });
    SeaConditions {
        condition,
        wave_height_range,
        description,
    }
}

fn describe(conditions: &[WireCondition]) -> WeatherSummary {
    let first = conditions.first();
    let pick = |field: Option<&String>, default: &str| {
        field
            .filter(|s| !s.is_empty())
            .map_or_else(|| default.to_string(), Clone::clone)
    };
    WeatherSummary {
        description: pick(first.and_then(|c| c.description.as_ref()), "Unknown"),
        icon: pick(first.and_then(|c| c.icon.as_ref()), "01d"),
        main: pick(first.and_then(|c| c.main.as_ref()), "Clear"),
    }
}

fn to_ocean_weather(lat: f64, lng: f64, raw: CurrentResponse, now: DateTime<Utc>) -> OceanWeather {
    let speed = ms_to_kmh(raw.wind.speed);
    #[allow(clippy::cast_precision_loss)]
    let sea = sea_conditions(speed as f64);

    OceanWeather {
        location: WeatherLocation {
            lat,
            lng,
            name: raw
                .name
                .filter(|n| !n.is_empty())
                .unwrap_or_else(|| "Ocean Location".to_string()),
        },
        weather: describe(&raw.weather),
        temperature: Temperature {
            current: round_half_up(raw.main.temp),
            feels_like: round_half_up(raw.main.feels_like),
            min: round_half_up(raw.main.temp_min),
            max: round_half_up(raw.main.temp_max),
        },
        wind: Wind {
            speed,
            direction: raw.wind.deg,
            gust: raw.wind.gust.filter(|g| *g > 0.0).map(ms_to_kmh),
            compass_direction: wind_direction(raw.wind.deg),
        },
        sea_conditions: sea,
        visibility: raw
            .visibility
            .filter(|v| *v > 0)
            .unwrap_or(DEFAULT_VISIBILITY_M),
        humidity: raw.main.humidity,
        pressure: raw.main.pressure,
        timestamp: now,
    }
}

fn to_forecast_entry(item: ForecastItem) -> ForecastEntry {
    ForecastEntry {
        timestamp: item.dt_txt,
        temperature: round_half_up(item.main.temp),
        weather: describe(&item.weather).description,
        wind_speed: ms_to_kmh(item.wind.speed),
        wind_direction: item.wind.deg,
        humidity: item.main.humidity,
        rain: item.rain.map_or(0.0, |r| r.three_hours),
    }
}

// --- Client -----------------------------------------------------------------

/// OpenWeather client for current conditions and the 24-hour forecast.
///
/// Built without an API key it still constructs; every lookup then returns
/// [`AlertsError::MissingApiKey`].
pub struct OceanWeatherClient {
    client: Client,
    base_url: Url,
    api_key: Option<String>,
}

impl OceanWeatherClient {
    /// # Errors
    ///
    /// Returns [`AlertsError::Http`] if the HTTP client cannot be built, or
    /// [`AlertsError::InvalidBaseUrl`] for a malformed `openweather_base_url`.
    pub fn new(config: &AlertsConfig) -> Result<Self, AlertsError> {
        Ok(Self {
            client: build_http_client(&config.user_agent, config.timeout_secs)?,
            base_url: parse_base_url(&config.openweather_base_url)?,
            api_key: config.openweather_api_key.clone(),
        })
    }

    #[must_use]
    pub fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }

    fn url(
        &self,
        path: &str,
        lat: f64,
        lng: f64,
        extra: &[(&str, &str)],
    ) -> Result<Url, AlertsError> {
        let key = self.api_key.as_deref().ok_or(AlertsError::MissingApiKey)?;
        let (lat, lon) = (lat.to_string(), lng.to_string());
        let mut query = vec![
            ("lat", lat.as_str()),
            ("lon", lon.as_str()),
            ("appid", key),
            ("units", "metric"),
        ];
        query.extend_from_slice(extra);
        endpoint(&self.base_url, path, &query)
    }

    /// Current conditions at `(lat, lng)`.
    ///
    /// # Errors
    ///
    /// - [`AlertsError::MissingApiKey`] when no key is configured.
    /// - [`AlertsError::Http`] / [`AlertsError::UnexpectedStatus`] on upstream failure.
    /// - [`AlertsError::Deserialize`] if the body does not match the expected shape.
    pub async fn current(&self, lat: f64, lng: f64) -> Result<OceanWeather, AlertsError> {
        let url = self.url("weather", lat, lng, &[])?;
        let raw: CurrentResponse = get_json(&self.client, url, "OpenWeather current").await?;
        Ok(to_ocean_weather(lat, lng, raw, Utc::now()))
    }

    /// Next 24 hours in 3-hour steps at `(lat, lng)`.
    ///
    /// # Errors
    ///
    /// Same as [`OceanWeatherClient::current`].
    pub async fn forecast(&self, lat: f64, lng: f64) -> Result<MarineForecast, AlertsError> {
        let url = self.url("forecast", lat, lng, &[("cnt", FORECAST_STEPS)])?;
        let raw: ForecastResponse = get_json(&self.client, url, "OpenWeather forecast").await?;
        Ok(MarineForecast {
            location: Coordinates { lat, lng },
            forecasts: raw.list.into_iter().map(to_forecast_entry).collect(),
        })
    }
}
