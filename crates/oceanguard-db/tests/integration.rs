//! Offline unit tests for oceanguard-db pool configuration and row types.
//! These tests do not require a live database connection.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};

use chrono::{TimeZone, Utc};
use oceanguard_core::{AppConfig, Environment, LocalReport};
use oceanguard_db::{connect_pool_from_config, DbError, PoolConfig, RecentReportRow};

fn app_config() -> AppConfig {
    AppConfig {
        database_url: Some("postgres://example".to_string()),
        env: Environment::Test,
        bind_addr: SocketAddr::new(IpAddr::V4(Ipv4Addr::LOCALHOST), 3000),
        log_level: "info".to_string(),
        db_max_connections: 42,
        db_min_connections: 7,
        db_acquire_timeout_secs: 9,
        reddit_user_agent: "ua".to_string(),
        reddit_communities: vec!["ocean".to_string()],
        reddit_max_communities: 2,
        reddit_post_limit: 25,
        reddit_timeout_secs: 5,
        reddit_inter_request_delay_ms: 2_000,
        alerts_user_agent: "ua".to_string(),
        alerts_timeout_secs: 10,
        openweather_api_key: None,
        analytics_cache_ttl_secs: 300,
        alerts_refresh_secs: 300,
    }
}

#[test]
fn pool_config_from_app_config_uses_core_values() {
    let pool_config = PoolConfig::from_app_config(&app_config());
    assert_eq!(pool_config.max_connections, 42);
    assert_eq!(pool_config.min_connections, 7);
    assert_eq!(pool_config.acquire_timeout_secs, 9);
}

#[tokio::test]
async fn connect_without_database_url_fails_before_dialing() {
    let config = AppConfig {
        database_url: None,
        ..app_config()
    };

    let result = connect_pool_from_config(&config).await;
    assert!(matches!(result, Err(DbError::MissingDatabaseUrl)));
}

#[test]
fn recent_report_row_converts_to_local_report() {
    let created_at = Utc.with_ymd_and_hms(2025, 6, 1, 9, 30, 0).unwrap();
    let row = RecentReportRow {
        hazard_type: "Oil Spill".to_string(),
        severity: 8,
        created_at,
    };

    let report = LocalReport::from(row);
    assert_eq!(
        report,
        LocalReport {
            hazard_type: "Oil Spill".to_string(),
            severity: 8,
            created_at,
        }
    );
}
