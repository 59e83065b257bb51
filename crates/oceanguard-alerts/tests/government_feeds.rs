//! Integration tests for the alert collectors, aggregator, and weather client
//! using wiremock HTTP mocks.

use oceanguard_alerts::{
    AlertAggregator, AlertCategory, AlertsConfig, AlertsError, NoaaClient, OceanWeatherClient,
    UsgsClient, MAX_NOAA_ALERTS, MAX_USGS_ALERTS,
};
use serde_json::{json, Value};
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn test_config(server: &MockServer) -> AlertsConfig {
    AlertsConfig {
        noaa_base_url: server.uri(),
        usgs_base_url: server.uri(),
        openweather_base_url: format!("{}/data/2.5", server.uri()),
        timeout_secs: 5,
        openweather_api_key: Some("test-key".to_string()),
        ..AlertsConfig::default()
    }
}

fn noaa_feature(id: &str, event: &str, area: &str, onset: &str) -> Value {
    json!({
        "id": id,
        "type": "Feature",
        "properties": {
            "event": event,
            "severity": "Moderate",
            "certainty": "Likely",
            "urgency": "Expected",
            "headline": format!("{event} issued"),
            "description": "Conditions expected.",
            "instruction": null,
            "areaDesc": area,
            "onset": onset,
            "expires": "2025-07-02T00:00:00Z"
        }
    })
}

fn usgs_feature(id: &str, mag: f64, depth: f64, tsunami: i64, time_ms: i64) -> Value {
    json!({
        "id": id,
        "properties": {
            "mag": mag,
            "place": "Near the coast",
            "time": time_ms,
            "updated": time_ms,
            "url": format!("https://earthquake.usgs.gov/earthquakes/eventpage/{id}"),
            "detail": "",
            "tsunami": tsunami,
            "title": format!("M {mag} - Near the coast")
        },
        "geometry": { "type": "Point", "coordinates": [142.1, 38.3, depth] }
    })
}

async fn mount_noaa(server: &MockServer, features: Vec<Value>) {
    Mock::given(method("GET"))
        .and(path("/alerts/active"))
        .and(query_param("message_type", "alert"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "features": features })))
        .mount(server)
        .await;
}

async fn mount_usgs(server: &MockServer, features: Vec<Value>) {
    Mock::given(method("GET"))
        .and(path("/fdsnws/event/1/query"))
        .and(query_param("format", "geojson"))
        .and(query_param("minmagnitude", "4.5"))
        .and(query_param("limit", "50"))
        .and(query_param("orderby", "time"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "features": features })))
        .mount(server)
        .await;
}

#[tokio::test]
async fn aggregator_merges_sorts_and_summarizes() {
    let server = MockServer::start().await;

    mount_noaa(
        &server,
        vec![
            noaa_feature("n1", "Rip Current Statement", "Coastal Carolina", "2025-07-01T06:00:00Z"),
            noaa_feature("n2", "Tsunami Advisory", "Coastal Alaska", "2025-07-01T10:00:00Z"),
            noaa_feature("n3", "Hurricane Warning", "Gulf Coast", "2025-07-01T02:00:00Z"),
            noaa_feature("n4", "Frost Advisory", "Central Valley", "2025-07-01T11:00:00Z"),
        ],
    )
    .await;
    // 2025-07-01T08:00Z and 2025-07-01T04:00Z
    mount_usgs(
        &server,
        vec![
            usgs_feature("q1", 6.1, 20.0, 0, 1_751_356_800_000),
            usgs_feature("q2", 7.4, 300.0, 1, 1_751_342_400_000),
            usgs_feature("q3", 6.0, 100.0, 0, 1_751_360_000_000),
        ],
    )
    .await;

    let aggregator = AlertAggregator::new(&test_config(&server)).expect("aggregator");
    let feed = aggregator.get_all_alerts().await;

    let ids: Vec<&str> = feed.alerts.iter().map(|a| a.id.as_str()).collect();
    assert_eq!(
        ids,
        vec!["noaa:n2", "usgs:q1", "noaa:n1", "usgs:q2", "noaa:n3"]
    );
    assert!(feed
        .alerts
        .windows(2)
        .all(|pair| pair[0].observed_at >= pair[1].observed_at));
    assert_eq!(feed.summary.total, 5);
    assert_eq!(feed.summary.weather, 2);
    assert_eq!(feed.summary.tsunami, 1);
    assert_eq!(feed.summary.earthquake, 2);
    assert_eq!(
        feed.summary.total,
        feed.summary.weather + feed.summary.tsunami + feed.summary.earthquake
    );
}

#[tokio::test]
async fn one_failing_source_keeps_the_other() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/alerts/active"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;
    mount_usgs(&server, vec![usgs_feature("q1", 5.5, 10.0, 0, 1_751_356_800_000)]).await;

    let aggregator = AlertAggregator::new(&test_config(&server)).unwrap();
    let feed = aggregator.get_all_alerts().await;

    assert_eq!(feed.alerts.len(), 1);
    assert_eq!(feed.alerts[0].category, AlertCategory::Earthquake);
    assert_eq!(feed.summary.total, 1);
}

#[tokio::test]
async fn both_sources_failing_yields_empty_feed() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/alerts/active"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/fdsnws/event/1/query"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;

    let aggregator = AlertAggregator::new(&test_config(&server)).unwrap();
    let feed = aggregator.get_all_alerts().await;

    assert!(feed.alerts.is_empty());
    assert_eq!(feed.summary.total, 0);
    assert_eq!(feed.summary.weather, 0);
    assert_eq!(feed.summary.tsunami, 0);
    assert_eq!(feed.summary.earthquake, 0);
}

#[tokio::test]
async fn noaa_keeps_feed_order_and_caps_at_twenty() {
    let server = MockServer::start().await;

    let features: Vec<Value> = (0..30)
        .map(|i| {
            noaa_feature(
                &format!("n{i}"),
                "Coastal Flood Advisory",
                "Shoreline",
                "2025-07-01T00:00:00Z",
            )
        })
        .collect();
    mount_noaa(&server, features).await;

    let client = NoaaClient::new(&test_config(&server)).unwrap();
    let alerts = client.fetch_weather_alerts().await;

    assert_eq!(alerts.len(), MAX_NOAA_ALERTS);
    assert_eq!(alerts[0].id, "noaa:n0");
    assert_eq!(alerts[19].id, "noaa:n19");
}

#[tokio::test]
async fn usgs_filters_before_capping_at_fifteen_most_recent() {
    let server = MockServer::start().await;

    // Newest first, as USGS returns with orderby=time. Every third quake is
    // deep and untagged, so it never qualifies.
    let newest_ms: i64 = 1_751_356_800_000;
    let features: Vec<Value> = (0..30)
        .map(|i| {
            let depth = if i % 3 == 2 { 300.0 } else { 10.0 };
            usgs_feature(&format!("q{i}"), 5.5, depth, 0, newest_ms - i * 60_000)
        })
        .collect();
    mount_usgs(&server, features).await;

    let client = UsgsClient::new(&test_config(&server)).unwrap();
    let alerts = client.fetch_earthquake_alerts().await;

    assert_eq!(alerts.len(), MAX_USGS_ALERTS);
    let expected: Vec<String> = (0..30)
        .filter(|i| i % 3 != 2)
        .take(MAX_USGS_ALERTS)
        .map(|i| format!("usgs:q{i}"))
        .collect();
    let ids: Vec<String> = alerts.iter().map(|a| a.id.clone()).collect();
    assert_eq!(ids, expected);
    assert!(alerts
        .windows(2)
        .all(|pair| pair[0].observed_at > pair[1].observed_at));
}

#[tokio::test]
async fn collectors_send_identifying_user_agent() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/fdsnws/event/1/query"))
        .and(header(
            "user-agent",
            "OceanGuard-App/1.0 (contact@oceanguard.com)",
        ))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "features": [] })))
        .expect(1)
        .mount(&server)
        .await;

    let client = UsgsClient::new(&test_config(&server)).unwrap();
    assert!(client.fetch_earthquake_alerts().await.is_empty());
}

#[tokio::test]
async fn current_weather_converts_units_and_adds_sea_state() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/data/2.5/weather"))
        .and(query_param("lat", "25.5"))
        .and(query_param("lon", "-80.1"))
        .and(query_param("appid", "test-key"))
        .and(query_param("units", "metric"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "name": "Key Biscayne",
            "weather": [{ "main": "Clouds", "description": "scattered clouds", "icon": "03d" }],
            "main": {
                "temp": 29.6, "feels_like": 33.2, "temp_min": 28.4, "temp_max": 30.5,
                "humidity": 74, "pressure": 1014
            },
            "wind": { "speed": 8.0, "deg": 135, "gust": 11.0 },
            "visibility": 9000
        })))
        .mount(&server)
        .await;

    let client = OceanWeatherClient::new(&test_config(&server)).unwrap();
    let weather = client.current(25.5, -80.1).await.expect("weather");

    assert_eq!(weather.location.name, "Key Biscayne");
    assert_eq!(weather.weather.main, "Clouds");
    assert_eq!(weather.temperature.current, 30);
    assert_eq!(weather.temperature.feels_like, 33);
    assert_eq!(weather.wind.speed, 29);
    assert_eq!(weather.wind.gust, Some(40));
    assert_eq!(weather.wind.compass_direction, "SE");
    assert_eq!(weather.sea_conditions.condition, "Moderate Breeze");
    assert_eq!(weather.visibility, 9000);
    assert_eq!(weather.humidity, 74);
}

#[tokio::test]
async fn forecast_requests_eight_steps() {
    let server = MockServer::start().await;

    let step = |hour: u32| {
        json!({
            "dt_txt": format!("2025-07-01 {hour:02}:00:00"),
            "main": { "temp": 27.2, "humidity": 70 },
            "weather": [{ "description": "clear sky" }],
            "wind": { "speed": 3.0, "deg": 90 },
            "rain": { "3h": 0.4 }
        })
    };
    Mock::given(method("GET"))
        .and(path("/data/2.5/forecast"))
        .and(query_param("cnt", "8"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "list": [step(0), step(3)] })),
        )
        .mount(&server)
        .await;

    let client = OceanWeatherClient::new(&test_config(&server)).unwrap();
    let forecast = client.forecast(25.5, -80.1).await.expect("forecast");

    assert_eq!(forecast.forecasts.len(), 2);
    assert_eq!(forecast.forecasts[1].timestamp, "2025-07-01 03:00:00");
    assert_eq!(forecast.forecasts[0].wind_speed, 11);
    assert!((forecast.forecasts[0].rain - 0.4).abs() < f64::EPSILON);
    assert!((forecast.location.lat - 25.5).abs() < f64::EPSILON);
}

#[tokio::test]
async fn weather_without_api_key_is_rejected_before_any_request() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let config = AlertsConfig {
        openweather_api_key: None,
        ..test_config(&server)
    };
    let client = OceanWeatherClient::new(&config).unwrap();

    let err = client.current(0.0, 0.0).await.unwrap_err();
    assert!(matches!(err, AlertsError::MissingApiKey));
    assert!(!client.is_configured());
}

#[tokio::test]
async fn weather_upstream_error_is_surfaced() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/data/2.5/weather"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let client = OceanWeatherClient::new(&test_config(&server)).unwrap();
    let err = client.current(1.0, 2.0).await.unwrap_err();

    assert!(matches!(
        err,
        AlertsError::UnexpectedStatus { status: 401, .. }
    ));
}
