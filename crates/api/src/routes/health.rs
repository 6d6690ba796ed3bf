use axum::extract::State;
use axum::{routing::get, Json, Router};
use routewise_db::PoolStats;
use serde::Serialize;

use crate::state::AppState;

/// Health check response payload.
#[derive(Serialize)]
pub struct HealthResponse {
    /// `ok`, or `degraded` when the database is unreachable.
    pub status: &'static str,
    /// Crate version from Cargo.toml.
    pub version: &'static str,
    pub db_healthy: bool,
}

/// GET /health -- returns service and database health.
async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let db_healthy = routewise_db::health_check(&state.pool).await.is_ok();
    if !db_healthy {
        tracing::warn!("Health check: database unreachable");
    }

    Json(HealthResponse {
        status: if db_healthy { "ok" } else { "degraded" },
        version: env!("CARGO_PKG_VERSION"),
        db_healthy,
    })
}

/// GET /metrics -- database pool connection counts.
async fn pool_metrics(State(state): State<AppState>) -> Json<PoolStats> {
    Json(routewise_db::pool_stats(&state.pool))
}

/// Mount operational routes (root level, not under `/api/v1`).
///
/// ```text
/// GET /health     service and database health
/// GET /metrics    database pool statistics
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/health", get(health_check))
        .route("/metrics", get(pool_metrics))
}
