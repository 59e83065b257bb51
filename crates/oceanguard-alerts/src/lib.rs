//! Government hazard alerts (NOAA, USGS) and marine point weather.

mod client;
mod normalize;

pub mod aggregate;
pub mod error;
pub mod noaa;
pub mod types;
pub mod usgs;
pub mod weather;

pub use aggregate::{merge_alerts, AlertAggregator};
pub use error::AlertsError;
pub use noaa::{NoaaClient, MAX_NOAA_ALERTS};
pub use normalize::magnitude_severity;
pub use types::{
    AlertCategory, AlertFeed, AlertSource, AlertSummary, AlertsConfig, Coordinates,
    NormalizedAlert,
};
pub use usgs::{UsgsClient, MAX_USGS_ALERTS};
pub use weather::{
    sea_conditions, wind_direction, MarineForecast, OceanWeather, OceanWeatherClient,
    SeaConditions,
};
