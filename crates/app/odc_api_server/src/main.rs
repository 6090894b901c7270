//! odc API server binary.
//!
//! Serves the trace catalogue over HTTP, backed by PostgreSQL or, with
//! `--memory`, by an empty in-memory store.

use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use odc_api::config::ApiConfig;
use odc_core::store::{MemoryTraceStore, PgTraceStore, TraceStore};
use sqlx::postgres::PgPoolOptions;
use tracing::info;

/// CLI arguments for the API server.
///
/// Flags override the environment read by [`ApiConfig::from_env`].
#[derive(Parser, Debug)]
#[command(name = "odc_api_server", version, about = "odc trace catalogue API server")]
struct Args {
    /// Address to listen on [default: $BIND_ADDR or 127.0.0.1:8081].
    #[arg(long)]
    bind_addr: Option<String>,

    /// PostgreSQL connection URL [default: $DATABASE_URL].
    #[arg(long)]
    database_url: Option<String>,

    /// Maximum number of database connections [default: $DB_MAX_CONNECTIONS or 5].
    #[arg(long)]
    max_connections: Option<u32>,

    /// Serve from an in-memory store instead of PostgreSQL.
    #[arg(long, default_value_t = false)]
    memory: bool,
}

impl Args {
    fn into_config(self, mut config: ApiConfig) -> ApiConfig {
        if let Some(bind_addr) = self.bind_addr {
            config.bind_addr = bind_addr;
        }
        if let Some(database_url) = self.database_url {
            config.database_url = database_url;
        }
        if let Some(max_connections) = self.max_connections.filter(|n| *n > 0) {
            config.max_connections = max_connections;
        }
        config
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,odc_api=debug,odc_core=debug,tower_http=debug".into()),
        )
        .init();

    let args = Args::parse();
    let memory = args.memory;
    let config = args.into_config(ApiConfig::from_env());

    info!(bind_addr = %config.bind_addr, memory, "starting odc_api_server");

    let store: Arc<dyn TraceStore> = if memory {
        info!("using in-memory trace store");
        Arc::new(MemoryTraceStore::new())
    } else {
        info!(max_connections = config.max_connections, "configuring connection pool");
        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .acquire_timeout(Duration::from_secs(30))
            .connect(&config.database_url)
            .await?;

        info!("running database migrations");
        odc_api::migrate(&pool).await?;

        Arc::new(PgTraceStore::new(pool))
    };

    let app = odc_api::router(odc_api::AppState::new(store, config.clone()));

    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    let local_addr = listener.local_addr()?;
    info!(addr = %local_addr, "REST API listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("server stopped");
    Ok(())
}

/// Resolves on Ctrl-C or, on Unix, SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::warn!("failed to listen for Ctrl-C: {e}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::warn!("failed to listen for SIGTERM: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
    info!("shutdown signal received");
}
