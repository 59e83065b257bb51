//! Read-only queries against the `hazard_reports` table.

use chrono::{DateTime, Utc};
use oceanguard_core::{LocalReport, ReportStore, ReportStoreError};
use sqlx::PgPool;

use crate::DbError;

/// The columns of `hazard_reports` the analytics pipeline reads.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct RecentReportRow {
    pub hazard_type: String,
    pub severity: i16,
    pub created_at: DateTime<Utc>,
}

impl From<RecentReportRow> for LocalReport {
    fn from(row: RecentReportRow) -> Self {
        Self {
            hazard_type: row.hazard_type,
            severity: row.severity,
            created_at: row.created_at,
        }
    }
}

/// Up to `limit` hazard reports, most recent first.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn list_recent_hazard_reports(
    pool: &PgPool,
    limit: i64,
) -> Result<Vec<RecentReportRow>, DbError> {
    let rows = sqlx::query_as::<_, RecentReportRow>(
        "SELECT hazard_type, severity, created_at \
         FROM hazard_reports \
         ORDER BY created_at DESC, id DESC \
         LIMIT $1",
    )
    .bind(limit.max(0))
    .fetch_all(pool)
    .await?;

    Ok(rows)
}

/// [`ReportStore`] backed by the Postgres `hazard_reports` table.
#[derive(Debug, Clone)]
pub struct PgReportStore {
    pool: PgPool,
}

impl PgReportStore {
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

impl ReportStore for PgReportStore {
    async fn recent_hazard_reports(
        &self,
        limit: i64,
    ) -> Result<Vec<LocalReport>, ReportStoreError> {
        let rows = list_recent_hazard_reports(&self.pool, limit)
            .await
            .map_err(|e| {
                tracing::error!(error = %e, "hazard report query failed");
                ReportStoreError::new("recent hazard reports", e)
            })?;
        Ok(rows.into_iter().map(LocalReport::from).collect())
    }
}
