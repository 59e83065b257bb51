use axum::{
    extract::{Query, State},
    Extension, Json,
};
use oceanguard_alerts::{AlertFeed, AlertsError, MarineForecast, OceanWeather};
use serde::Deserialize;

use crate::middleware::RequestId;

use super::{ApiError, ApiResponse, AppState};

/// Raw `lat`/`lng` query values, validated by [`parse_coordinates`].
#[derive(Debug, Deserialize)]
pub(super) struct CoordinatesQuery {
    pub lat: Option<String>,
    pub lng: Option<String>,
}

/// Parse and range-check the coordinate query.
pub(super) fn parse_coordinates(
    query: &CoordinatesQuery,
    request_id: &str,
) -> Result<(f64, f64), ApiError> {
    let (Some(lat), Some(lng)) = (query.lat.as_deref(), query.lng.as_deref()) else {
        return Err(ApiError::new(
            request_id,
            "bad_request",
            "latitude and longitude are required",
        ));
    };

    let invalid = || ApiError::new(request_id, "validation_error", "invalid coordinates");
    let lat: f64 = lat.trim().parse().map_err(|_| invalid())?;
    let lng: f64 = lng.trim().parse().map_err(|_| invalid())?;

    if !(-90.0..=90.0).contains(&lat) || !(-180.0..=180.0).contains(&lng) {
        return Err(invalid());
    }
    Ok((lat, lng))
}

fn map_weather_error(request_id: String, error: &AlertsError) -> ApiError {
    match error {
        AlertsError::MissingApiKey => {
            tracing::warn!("weather requested but OPENWEATHER_API_KEY is not configured");
            ApiError::new(
                request_id,
                "service_unavailable",
                "weather data is not configured",
            )
        }
        other => {
            tracing::error!(error = %other, "weather upstream request failed");
            ApiError::new(request_id, "bad_gateway", "unable to fetch weather data")
        }
    }
}

/// Merged NOAA + USGS feed. Served from the scheduler-refreshed cache when
/// fresh; fetched inline otherwise. Never fails.
pub(super) async fn government_alerts<S>(
    State(state): State<AppState<S>>,
    Extension(req_id): Extension<RequestId>,
) -> Json<ApiResponse<AlertFeed>> {
    if let Some(feed) = state.alerts_cache.fresh().await {
        return Json(ApiResponse::new(feed, req_id.0));
    }

    let feed = state.alerts.get_all_alerts().await;
    state.alerts_cache.store(feed.clone()).await;
    Json(ApiResponse::new(feed, req_id.0))
}

pub(super) async fn weather_at_location<S>(
    State(state): State<AppState<S>>,
    Extension(req_id): Extension<RequestId>,
    Query(query): Query<CoordinatesQuery>,
) -> Result<Json<ApiResponse<OceanWeather>>, ApiError> {
    let (lat, lng) = parse_coordinates(&query, &req_id.0)?;
    let weather = state
        .weather
        .current(lat, lng)
        .await
        .map_err(|e| map_weather_error(req_id.0.clone(), &e))?;
    Ok(Json(ApiResponse::new(weather, req_id.0)))
}

pub(super) async fn forecast_at_location<S>(
    State(state): State<AppState<S>>,
    Extension(req_id): Extension<RequestId>,
    Query(query): Query<CoordinatesQuery>,
) -> Result<Json<ApiResponse<MarineForecast>>, ApiError> {
    let (lat, lng) = parse_coordinates(&query, &req_id.0)?;
    let forecast = state
        .weather
        .forecast(lat, lng)
        .await
        .map_err(|e| map_weather_error(req_id.0.clone(), &e))?;
    Ok(Json(ApiResponse::new(forecast, req_id.0)))
}
