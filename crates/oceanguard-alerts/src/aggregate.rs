//! Merges the NOAA and USGS collectors into one recency-ordered feed.

use chrono::Utc;

use crate::error::AlertsError;
use crate::noaa::NoaaClient;
use crate::types::{AlertFeed, AlertSummary, AlertsConfig, NormalizedAlert};
use crate::usgs::UsgsClient;

/// Concatenate both sources and sort by `observed_at`, most recent first.
///
/// The sort is stable, so alerts sharing a timestamp keep NOAA-then-USGS order.
#[must_use]
pub fn merge_alerts(
    noaa: Vec<NormalizedAlert>,
    usgs: Vec<NormalizedAlert>,
) -> (Vec<NormalizedAlert>, AlertSummary) {
    let mut alerts = noaa;
    alerts.extend(usgs);
    alerts.sort_by(|a, b| b.observed_at.cmp(&a.observed_at));
    let summary = AlertSummary::from_alerts(&alerts);
    (alerts, summary)
}

pub struct AlertAggregator {
    noaa: NoaaClient,
    usgs: UsgsClient,
}

impl AlertAggregator {
    /// # Errors
    ///
    /// Returns [`AlertsError`] if either collector's HTTP client or base URL
    /// is invalid.
    pub fn new(config: &AlertsConfig) -> Result<Self, AlertsError> {
        Ok(Self {
            noaa: NoaaClient::new(config)?,
            usgs: UsgsClient::new(config)?,
        })
    }

    /// Fetch both government feeds concurrently and merge them.
    ///
    /// Source failures only shrink the feed; when both fail the result is an
    /// empty list with a zeroed summary.
    pub async fn get_all_alerts(&self) -> AlertFeed {
        let (noaa, usgs) = tokio::join!(
            self.noaa.fetch_weather_alerts(),
            self.usgs.fetch_earthquake_alerts()
        );
        let (noaa_count, usgs_count) = (noaa.len(), usgs.len());

        let (alerts, summary) = merge_alerts(noaa, usgs);
        tracing::info!(
            noaa = noaa_count,
            usgs = usgs_count,
            total = summary.total,
            "government alerts aggregated"
        );

        AlertFeed {
            alerts,
            summary,
            last_updated: Utc::now(),
        }
    }
}
