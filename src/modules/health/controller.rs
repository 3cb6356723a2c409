use axum::{Json, extract::State, http::StatusCode};
use tracing::instrument;

use super::model::{BANNER, HealthResponse};
use super::service::HealthService;
use crate::state::AppState;

/// Liveness banner
#[utoipa::path(
    get,
    path = "/",
    responses(
        (status = 200, description = "Server is running", body = String, content_type = "text/plain")
    ),
    tag = "Health"
)]
pub async fn banner() -> &'static str {
    BANNER
}

/// Readiness check including a store ping
#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Server and store are reachable", body = HealthResponse),
        (status = 503, description = "Store is unreachable", body = HealthResponse)
    ),
    tag = "Health"
)]
#[instrument(skip(state))]
pub async fn health_check(State(state): State<AppState>) -> (StatusCode, Json<HealthResponse>) {
    let health = HealthService::check(state.store.as_ref()).await;
    let status = if health.is_healthy() {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };
    (status, Json(health))
}
