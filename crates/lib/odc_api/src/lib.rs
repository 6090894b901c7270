//! # odc_api
//!
//! HTTP API library for the odc trace catalogue.
//!
//! Every trace resource sits behind [`middleware::auth::require_auth`]; the
//! health check is public.

pub mod config;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod routes;

use std::sync::Arc;

use axum::Router;
use axum::routing::get;
use odc_core::store::TraceStore;
use sqlx::PgPool;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::config::ApiConfig;
use crate::handlers::{health, traces};

/// Shared application state passed to all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Trace storage backend.
    pub store: Arc<dyn TraceStore>,
    /// API configuration.
    pub config: ApiConfig,
}

impl AppState {
    pub fn new(store: Arc<dyn TraceStore>, config: ApiConfig) -> Self {
        Self { store, config }
    }
}

/// Run embedded database migrations.
///
/// Delegates to `odc_core::migrate::migrate()` which owns the migration files.
pub async fn migrate(pool: &PgPool) -> Result<(), sqlx::migrate::MigrateError> {
    odc_core::migrate::migrate(pool).await
}

/// Builds the Axum router with all routes and shared state.
pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let public = Router::new().route(routes::GET_HEALTH, get(health::health_handler));

    let protected = Router::new()
        .route(routes::GET_TRACES, get(traces::list_traces_handler))
        .route(routes::GET_TRACES_ID, get(traces::get_trace_handler))
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            middleware::auth::require_auth,
        ));

    Router::new()
        .merge(public)
        .merge(protected)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
