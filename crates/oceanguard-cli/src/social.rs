//! One-shot social analytics run.

use oceanguard_core::{AppConfig, LocalReport};
use oceanguard_db::PgReportStore;
use oceanguard_social::{SocialAnalyticsService, SocialConfig};

use crate::print_json;

/// Collect, classify, and aggregate once, then print the analytics payload.
///
/// # Errors
///
/// Returns an error if the database is unreachable (unless `offline`) or the
/// local report query fails. Reddit outages are absorbed by the collector.
pub(crate) async fn run_social(
    config: &AppConfig,
    hazards_only: bool,
    offline: bool,
) -> anyhow::Result<()> {
    let social_config = SocialConfig::from_app_config(config);

    let analytics = if offline {
        tracing::info!("offline run: local report store skipped");
        SocialAnalyticsService::new(&social_config, Vec::<LocalReport>::new())?
            .get_social_media_analytics(hazards_only)
            .await?
    } else {
        let pool = oceanguard_db::connect_pool_from_config(config).await?;
        let service =
            SocialAnalyticsService::new(&social_config, PgReportStore::new(pool.clone()))?;
        let analytics = service.get_social_media_analytics(hazards_only).await;
        pool.close().await;
        analytics?
    };

    print_json(&analytics)
}
