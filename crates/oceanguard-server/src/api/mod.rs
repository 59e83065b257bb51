mod government;
mod social;

use std::sync::Arc;
use std::time::Duration;

use axum::{
    extract::State,
    http::{header, HeaderName, Method, StatusCode},
    response::IntoResponse,
    routing::get,
    Extension, Json, Router,
};
use chrono::{DateTime, Utc};
use oceanguard_alerts::{AlertAggregator, OceanWeatherClient};
use oceanguard_core::ReportStore;
use oceanguard_db::PgReportStore;
use oceanguard_social::SocialAnalyticsService;
use serde::Serialize;
use sqlx::PgPool;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::cache::{AlertsCache, AnalyticsCache};
use crate::middleware::{enforce_rate_limit, request_id, RateLimitState, RequestId};

/// Shared handler state. `S` is the local report store behind the social
/// pipeline; production uses Postgres.
pub struct AppState<S = PgReportStore> {
    pub pool: PgPool,
    pub social: Arc<SocialAnalyticsService<S>>,
    pub alerts: Arc<AlertAggregator>,
    pub weather: Arc<OceanWeatherClient>,
    pub analytics_cache: AnalyticsCache,
    pub alerts_cache: AlertsCache,
}

impl<S> Clone for AppState<S> {
    fn clone(&self) -> Self {
        Self {
            pool: self.pool.clone(),
            social: Arc::clone(&self.social),
            alerts: Arc::clone(&self.alerts),
            weather: Arc::clone(&self.weather),
            analytics_cache: self.analytics_cache.clone(),
            alerts_cache: Arc::clone(&self.alerts_cache),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub data: T,
    pub meta: ResponseMeta,
}

#[derive(Debug, Serialize)]
pub struct ResponseMeta {
    pub request_id: String,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
pub struct ApiError {
    pub error: ErrorBody,
    pub meta: ResponseMeta,
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub code: String,
    pub message: String,
}

#[derive(Debug, Serialize, PartialEq, Eq)]
struct HealthData {
    status: &'static str,
    database: &'static str,
}

impl ResponseMeta {
    pub(super) fn new(request_id: String) -> Self {
        Self {
            request_id,
            timestamp: Utc::now(),
        }
    }
}

impl<T: Serialize> ApiResponse<T> {
    pub(super) fn new(data: T, request_id: String) -> Self {
        Self {
            data,
            meta: ResponseMeta::new(request_id),
        }
    }
}

impl ApiError {
    pub fn new(
        request_id: impl Into<String>,
        code: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            error: ErrorBody {
                code: code.into(),
                message: message.into(),
            },
            meta: ResponseMeta::new(request_id.into()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let status = match self.error.code.as_str() {
            "not_found" => StatusCode::NOT_FOUND,
            "bad_request" | "validation_error" => StatusCode::BAD_REQUEST,
            "rate_limited" => StatusCode::TOO_MANY_REQUESTS,
            "bad_gateway" => StatusCode::BAD_GATEWAY,
            "service_unavailable" => StatusCode::SERVICE_UNAVAILABLE,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        (status, Json(self)).into_response()
    }
}

fn build_cors() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(tower_http::cors::Any)
        .allow_methods([Method::GET, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, HeaderName::from_static("x-request-id")])
}

fn rate_limited_router<S>(rate_limit: RateLimitState) -> Router<AppState<S>>
where
    S: ReportStore + Send + Sync + 'static,
{
    Router::new()
        .route(
            "/api/v1/social-media/analytics",
            get(social::social_media_analytics::<S>),
        )
        .route(
            "/api/v1/government/alerts",
            get(government::government_alerts::<S>),
        )
        .route(
            "/api/v1/government/weather",
            get(government::weather_at_location::<S>),
        )
        .route(
            "/api/v1/government/forecast",
            get(government::forecast_at_location::<S>),
        )
        .layer(axum::middleware::from_fn_with_state(
            rate_limit,
            enforce_rate_limit,
        ))
}

pub fn build_app<S>(state: AppState<S>, rate_limit: RateLimitState) -> Router
where
    S: ReportStore + Send + Sync + 'static,
{
    let public_routes = Router::new().route("/api/v1/health", get(health::<S>));

    Router::new()
        .merge(public_routes)
        .merge(rate_limited_router(rate_limit))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(build_cors())
                .layer(axum::middleware::from_fn(request_id)),
        )
        .with_state(state)
}

async fn health<S>(
    State(state): State<AppState<S>>,
    Extension(req_id): Extension<RequestId>,
) -> impl IntoResponse {
    let meta = ResponseMeta::new(req_id.0);

    match oceanguard_db::health_check(&state.pool).await {
        Ok(()) => (
            StatusCode::OK,
            Json(ApiResponse {
                data: HealthData {
                    status: "ok",
                    database: "ok",
                },
                meta,
            }),
        ),
        Err(e) => {
            tracing::warn!(error = %e, "health check: database unavailable");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(ApiResponse {
                    data: HealthData {
                        status: "degraded",
                        database: "unavailable",
                    },
                    meta,
                }),
            )
        }
    }
}

pub fn default_rate_limit_state() -> RateLimitState {
    RateLimitState::new(120, Duration::from_secs(60))
}

#[cfg(test)]
#[path = "api_test.rs"]
mod tests;
