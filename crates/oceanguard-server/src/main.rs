mod api;
mod cache;
mod middleware;
mod scheduler;

use std::sync::Arc;
use std::time::Duration;

use oceanguard_alerts::{AlertAggregator, AlertsConfig, OceanWeatherClient};
use oceanguard_db::PgReportStore;
use oceanguard_social::{SocialAnalyticsService, SocialConfig};
use tracing_subscriber::EnvFilter;

use crate::{
    api::{build_app, default_rate_limit_state, AppState},
    cache::{AnalyticsCache, CacheSlot},
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = oceanguard_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt().with_env_filter(env_filter).init();
    tracing::info!(env = %config.env, bind_addr = %config.bind_addr, "starting oceanguard server");

    let pool = oceanguard_db::connect_pool_from_config(&config).await?;
    let applied = oceanguard_db::run_migrations(&pool).await?;
    tracing::info!(applied, "database migrations complete");

    let social_config = SocialConfig::from_app_config(&config);
    let alerts_config = AlertsConfig::from_app_config(&config);
    if alerts_config.openweather_api_key.is_none() {
        tracing::warn!("OPENWEATHER_API_KEY not set; weather endpoints will answer 503");
    }

    let cache_ttl = Duration::from_secs(config.analytics_cache_ttl_secs);
    let state = AppState {
        pool: pool.clone(),
        social: Arc::new(SocialAnalyticsService::new(
            &social_config,
            PgReportStore::new(pool),
        )?),
        alerts: Arc::new(AlertAggregator::new(&alerts_config)?),
        weather: Arc::new(OceanWeatherClient::new(&alerts_config)?),
        analytics_cache: AnalyticsCache::new(cache_ttl),
        alerts_cache: Arc::new(CacheSlot::new(cache_ttl)),
    };

    let _scheduler = scheduler::build_scheduler(
        Arc::clone(&state.alerts),
        Arc::clone(&state.alerts_cache),
        config.alerts_refresh_secs,
    )
    .await?;

    let app = build_app(state, default_rate_limit_state());

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    tracing::info!(addr = %config.bind_addr, "listening");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to listen for ctrl-c");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("received shutdown signal, starting graceful shutdown");
}
