//! Trace resources: the trace list and single traces by id.

use axum::extract::rejection::PathRejection;
use axum::extract::{Path, State};
use axum::{Extension, Json};
use tracing::debug;

use crate::AppState;
use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthenticatedUser;
use crate::models::{DataResponse, TraceDocument};

/// `GET /traces` — all available traces.
pub async fn list_traces_handler(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
) -> AppResult<Json<DataResponse<Vec<TraceDocument>>>> {
    let traces = state.store.list_traces().await?;
    debug!(sub = %user.0.sub, count = traces.len(), "listed traces");
    let data = traces.into_iter().map(TraceDocument::from).collect();
    Ok(Json(DataResponse::new(data)))
}

/// `GET /traces/{trace_id}` — a single trace by identifier.
pub async fn get_trace_handler(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    trace_id: Result<Path<String>, PathRejection>,
) -> AppResult<Json<DataResponse<TraceDocument>>> {
    let Path(trace_id) = trace_id.map_err(|e| AppError::Validation(e.body_text()))?;
    let trace = state
        .store
        .get_trace(&trace_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Trace not found.".into()))?;
    debug!(sub = %user.0.sub, trace_id = %trace.id, "fetched trace");
    Ok(Json(DataResponse::new(TraceDocument::from(trace))))
}
