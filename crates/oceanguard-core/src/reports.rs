//! Read-only contract for the local hazard-report store.
//!
//! Reports are written by the platform's CRUD surface; the analytics
//! pipelines only ever read the most recent ones.

use std::future::Future;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::ReportStoreError;

/// The slice of a user-submitted hazard report the analytics pipeline needs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocalReport {
    pub hazard_type: String,
    /// 1 (minor) through 10 (critical).
    pub severity: i16,
    pub created_at: DateTime<Utc>,
}

/// Source of recent local hazard reports.
pub trait ReportStore {
    /// Returns up to `limit` reports, most recent first.
    fn recent_hazard_reports(
        &self,
        limit: i64,
    ) -> impl Future<Output = Result<Vec<LocalReport>, ReportStoreError>> + Send;
}

/// In-memory store, used by the CLI when no database is reachable and by tests.
impl ReportStore for Vec<LocalReport> {
    async fn recent_hazard_reports(
        &self,
        limit: i64,
    ) -> Result<Vec<LocalReport>, ReportStoreError> {
        let mut reports = self.clone();
        reports.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        reports.truncate(usize::try_from(limit.max(0)).unwrap_or(0));
        Ok(reports)
    }
}
