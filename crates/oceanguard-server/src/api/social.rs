use axum::{
    extract::{Query, State},
    Extension, Json,
};
use oceanguard_core::ReportStore;
use oceanguard_social::SocialMediaAnalytics;
use serde::Deserialize;

use crate::middleware::RequestId;

use super::{ApiError, ApiResponse, AppState};

#[derive(Debug, Deserialize)]
pub(super) struct AnalyticsQuery {
    #[serde(default)]
    pub hazards_only: bool,
}

/// Serve social analytics, preferring a fresh cached result.
///
/// When the pipeline fails (the local report store is unreachable) the last
/// good result for the same filter is served instead, however old. Only with
/// no cached result at all does the request fail.
pub(super) async fn social_media_analytics<S>(
    State(state): State<AppState<S>>,
    Extension(req_id): Extension<RequestId>,
    Query(query): Query<AnalyticsQuery>,
) -> Result<Json<ApiResponse<SocialMediaAnalytics>>, ApiError>
where
    S: ReportStore + Send + Sync + 'static,
{
    let slot = state.analytics_cache.slot(query.hazards_only);

    if let Some(cached) = slot.fresh().await {
        tracing::debug!(hazards_only = query.hazards_only, "serving cached social analytics");
        return Ok(Json(ApiResponse::new(cached, req_id.0)));
    }

    match state
        .social
        .get_social_media_analytics(query.hazards_only)
        .await
    {
        Ok(analytics) => {
            slot.store(analytics.clone()).await;
            Ok(Json(ApiResponse::new(analytics, req_id.0)))
        }
        Err(e) => {
            if let Some(stale) = slot.any().await {
                tracing::warn!(
                    error = %e,
                    hazards_only = query.hazards_only,
                    "social analytics failed; serving stale cache"
                );
                return Ok(Json(ApiResponse::new(stale, req_id.0)));
            }
            tracing::error!(error = %e, "social analytics failed");
            Err(ApiError::new(
                req_id.0,
                "internal_error",
                "social media analytics unavailable",
            ))
        }
    }
}
