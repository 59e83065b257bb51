//! Government alert and marine weather commands.

use oceanguard_alerts::{AlertAggregator, AlertsConfig, OceanWeatherClient};
use oceanguard_core::AppConfig;

use crate::print_json;

fn parse_bounded(raw: &str, name: &str, bound: f64) -> Result<f64, String> {
    let value: f64 = raw
        .trim()
        .parse()
        .map_err(|_| format!("{name} must be a number, got '{raw}'"))?;
    if (-bound..=bound).contains(&value) {
        Ok(value)
    } else {
        Err(format!("{name} must be within [-{bound}, {bound}]"))
    }
}

pub(crate) fn parse_latitude(raw: &str) -> Result<f64, String> {
    parse_bounded(raw, "latitude", 90.0)
}

pub(crate) fn parse_longitude(raw: &str) -> Result<f64, String> {
    parse_bounded(raw, "longitude", 180.0)
}

pub(crate) async fn run_alerts(config: &AppConfig) -> anyhow::Result<()> {
    let aggregator = AlertAggregator::new(&AlertsConfig::from_app_config(config))?;
    let feed = aggregator.get_all_alerts().await;
    tracing::info!(
        total = feed.summary.total,
        weather = feed.summary.weather,
        tsunami = feed.summary.tsunami,
        earthquake = feed.summary.earthquake,
        "alert feed collected"
    );
    print_json(&feed)
}

/// Print current conditions, or the 24 hour forecast when `forecast` is set.
///
/// # Errors
///
/// Returns an error when `OPENWEATHER_API_KEY` is unset or the upstream call fails.
pub(crate) async fn run_weather(
    config: &AppConfig,
    lat: f64,
    lng: f64,
    forecast: bool,
) -> anyhow::Result<()> {
    let client = OceanWeatherClient::new(&AlertsConfig::from_app_config(config))?;
    if !client.is_configured() {
        anyhow::bail!("OPENWEATHER_API_KEY is not set");
    }

    if forecast {
        print_json(&client.forecast(lat, lng).await?)
    } else {
        print_json(&client.current(lat, lng).await?)
    }
}
