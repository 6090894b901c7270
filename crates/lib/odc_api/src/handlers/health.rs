//! Health check.

use axum::Json;
use axum::extract::State;
use tracing::warn;

use crate::AppState;
use crate::error::AppResult;
use crate::models::HealthResponse;

/// `GET /health` — reports the service version and whether the store answers.
pub async fn health_handler(State(state): State<AppState>) -> AppResult<Json<HealthResponse>> {
    let store_reachable = state.store.ping().await;
    if !store_reachable {
        warn!("trace store is not reachable");
    }

    Ok(Json(HealthResponse {
        status: "ok".into(),
        version: odc_core::version().to_string(),
        store_reachable,
    }))
}
