//! Background job scheduler.
//!
//! Keeps the government alert feed warm so the alerts endpoint rarely has to
//! fetch NOAA and USGS inline.

use std::sync::Arc;
use std::time::Duration;

use oceanguard_alerts::AlertAggregator;
use tokio_cron_scheduler::{Job, JobScheduler, JobSchedulerError};

use crate::cache::AlertsCache;

/// Builds and starts the background job scheduler.
///
/// Returns the running [`JobScheduler`] handle, which must be kept alive for
/// the lifetime of the process. Dropping it shuts down all scheduled jobs.
/// A zero `alerts_refresh_secs` registers no jobs.
///
/// # Errors
///
/// Returns [`JobSchedulerError`] if the scheduler cannot be initialised,
/// a job cannot be registered, or the scheduler fails to start.
pub async fn build_scheduler(
    alerts: Arc<AlertAggregator>,
    alerts_cache: AlertsCache,
    alerts_refresh_secs: u64,
) -> Result<JobScheduler, JobSchedulerError> {
    let scheduler = JobScheduler::new().await?;

    if alerts_refresh_secs == 0 {
        tracing::info!("scheduler: alert refresh disabled");
    } else {
        register_alert_refresh_job(
            &scheduler,
            alerts,
            alerts_cache,
            Duration::from_secs(alerts_refresh_secs),
        )
        .await?;
    }

    scheduler.start().await?;
    Ok(scheduler)
}

/// Register a repeated job that refetches both government feeds and replaces
/// the cached alert feed.
async fn register_alert_refresh_job(
    scheduler: &JobScheduler,
    alerts: Arc<AlertAggregator>,
    alerts_cache: AlertsCache,
    every: Duration,
) -> Result<(), JobSchedulerError> {
    let job = Job::new_repeated_async(every, move |_uuid, _lock| {
        let alerts = Arc::clone(&alerts);
        let alerts_cache = Arc::clone(&alerts_cache);

        Box::pin(async move {
            let feed = alerts.get_all_alerts().await;
            tracing::info!(
                total = feed.summary.total,
                "scheduler: government alert feed refreshed"
            );
            alerts_cache.store(feed).await;
        })
    })?;

    scheduler.add(job).await?;
    tracing::info!(
        every_secs = every.as_secs(),
        "scheduler: registered alert refresh job"
    );
    Ok(())
}
