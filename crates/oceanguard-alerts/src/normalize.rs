//! Relevance rules and conversion of NOAA/USGS records into [`NormalizedAlert`].

use chrono::{DateTime, Utc};

use crate::noaa::{NoaaFeature, NoaaProperties};
use crate::types::{AlertCategory, AlertSource, Coordinates, NormalizedAlert};
use crate::usgs::UsgsFeature;

const MARINE_KEYWORDS: &[&str] = &[
    "marine",
    "coastal",
    "ocean",
    "tsunami",
    "beach",
    "surf",
    "rip current",
    "storm surge",
    "hurricane",
    "tropical",
];

const SHALLOW_DEPTH_KM: f64 = 70.0;
const SHALLOW_MIN_MAGNITUDE: f64 = 5.0;

fn non_empty(value: Option<&String>) -> Option<&str> {
    value.map(String::as_str).filter(|s| !s.trim().is_empty())
}

/// Parse an RFC 3339 timestamp with any offset into UTC.
pub(crate) fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw.trim())
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}

/// A NOAA alert is marine-relevant when its event name, description, or area
/// mentions any marine keyword (case-insensitive substring).
pub(crate) fn is_marine_relevant(properties: &NoaaProperties) -> bool {
    let fields = [
        &properties.event,
        &properties.description,
        &properties.area_desc,
    ];
    fields
        .iter()
        .filter_map(|field| field.as_deref())
        .map(str::to_lowercase)
        .any(|text| MARINE_KEYWORDS.iter().any(|keyword| text.contains(keyword)))
}

pub(crate) fn noaa_to_alert(feature: &NoaaFeature, fetched_at: DateTime<Utc>) -> NormalizedAlert {
    let p = &feature.properties;
    let event = p.event.clone().unwrap_or_default();
    let category = if event.to_lowercase().contains("tsunami") {
        AlertCategory::Tsunami
    } else {
        AlertCategory::Weather
    };

    NormalizedAlert {
        id: format!("noaa:{}", feature.id),
        category,
        source: AlertSource::Noaa,
        severity_label: non_empty(p.severity.as_ref())
            .unwrap_or("Unknown")
            .to_string(),
        description: non_empty(p.headline.as_ref())
            .or_else(|| non_empty(p.description.as_ref()))
            .unwrap_or_default()
            .to_string(),
        location_label: p.area_desc.clone().unwrap_or_default(),
        coordinates: None,
        observed_at: p
            .onset
            .as_deref()
            .and_then(parse_timestamp)
            .unwrap_or(fetched_at),
        expires_at: p.expires.as_deref().and_then(parse_timestamp),
        details_url: None,
        instruction: non_empty(p.instruction.as_ref()).map(ToString::to_string),
        title: event,
    }
}

/// Shallow (< 70 km) quakes of magnitude 5.0+, or any tsunami-flagged quake.
///
/// A deep strong quake without the tsunami flag is excluded. Quakes with no
/// reported depth or magnitude only pass on the tsunami flag.
pub(crate) fn is_relevant_quake(feature: &UsgsFeature) -> bool {
    if feature.properties.tsunami == 1 {
        return true;
    }
    let depth = feature
        .geometry
        .as_ref()
        .and_then(|g| g.coordinates.get(2).copied());
    match (depth, feature.properties.mag) {
        (Some(depth), Some(mag)) => depth < SHALLOW_DEPTH_KM && mag >= SHALLOW_MIN_MAGNITUDE,
        _ => false,
    }
}

/// Severity label by magnitude: 7.0+ Extreme, 6.0+ Severe, else Moderate.
#[must_use]
pub fn magnitude_severity(mag: f64) -> &'static str {
    if mag >= 7.0 {
        "Extreme"
    } else if mag >= 6.0 {
        "Severe"
    } else {
        "Moderate"
    }
}

/// Convert a USGS feature. Features missing a magnitude or event time are dropped.
pub(crate) fn usgs_to_alert(feature: &UsgsFeature) -> Option<NormalizedAlert> {
    let p = &feature.properties;
    let mag = p.mag?;
    let observed_at = DateTime::from_timestamp_millis(p.time?)?;
    let tsunami_possible = p.tsunami == 1;

    let coordinates = feature
        .geometry
        .as_ref()
        .and_then(|g| match g.coordinates.as_slice() {
            [lng, lat, ..] => Some(Coordinates { lat: *lat, lng: *lng }),
            _ => None,
        });

    let mut description = format!("Magnitude {mag:.1} earthquake");
    if tsunami_possible {
        description.push_str(" - TSUNAMI POSSIBLE");
    }

    let place = p.place.clone().unwrap_or_default();
    Some(NormalizedAlert {
        id: format!("usgs:{}", feature.id),
        category: AlertCategory::Earthquake,
        source: AlertSource::Usgs,
        title: p
            .title
            .clone()
            .unwrap_or_else(|| format!("M {mag:.1} - {place}")),
        severity_label: magnitude_severity(mag).to_string(),
        description,
        location_label: place,
        coordinates,
        observed_at,
        expires_at: None,
        details_url: p.url.clone(),
        instruction: None,
    })
}

#[cfg(test)]
#[path = "normalize_test.rs"]
mod tests;
