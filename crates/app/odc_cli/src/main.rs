// Import and re-export the `error` module
pub use self::error::{Error, Result};
mod error;

use clap::Parser;
use cli::{Cli, Commands, TraceCommands};
use odc_core::models::trace::NewTrace;
use odc_core::store::{PgTraceStore, TraceStore};
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use std::time::Duration;

mod cli;
mod logging;

#[tokio::main]
async fn main() -> Result<()> {
    if let Err(e) = run().await {
        log::error!("{}", e);
        std::process::exit(1);
    }
    Ok(())
}

async fn run() -> Result<()> {
    dotenvy::dotenv().ok();
    logging::init()?;

    let args = Cli::parse();

    match args.command {
        Commands::Version => {
            println!("{} {}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));
        }
        Commands::Token {
            sub,
            email,
            ttl_minutes,
        } => {
            let ttl = chrono::Duration::try_minutes(ttl_minutes).ok_or_else(|| {
                Error::Custom(format!("token lifetime of {ttl_minutes} minutes is too large"))
            })?;
            let secret = odc_core::auth::jwt::resolve_jwt_secret();
            let token = odc_core::auth::jwt::issue_access_token(
                &sub,
                email.as_deref(),
                ttl,
                secret.as_bytes(),
            )?;
            println!("{token}");
        }
        Commands::Migrate => {
            let pool = connect(&args.database_url).await?;
            odc_core::migrate::migrate(&pool).await?;
            log::info!("migrations applied");
        }
        Commands::Trace { command } => {
            let pool = connect(&args.database_url).await?;
            let store = PgTraceStore::new(pool);
            run_trace(&store, command).await?;
        }
    }

    Ok(())
}

async fn run_trace(store: &dyn TraceStore, command: TraceCommands) -> Result<()> {
    match command {
        TraceCommands::List => {
            for trace in store.list_traces().await? {
                println!("{}\t{}\t{}", trace.id, trace.name, trace.kind);
            }
        }
        TraceCommands::Add { id, name, kind } => {
            let trace = store.insert_trace(NewTrace::new(id, name, kind)).await?;
            log::info!("registered trace '{}'", trace.id);
        }
        TraceCommands::Remove { id } => {
            if !store.delete_trace(&id).await? {
                return Err(Error::Custom(format!("trace '{id}' does not exist")));
            }
            log::info!("removed trace '{id}'");
        }
    }
    Ok(())
}

async fn connect(database_url: &str) -> Result<PgPool> {
    let pool = PgPoolOptions::new()
        .max_connections(1)
        .acquire_timeout(Duration::from_secs(10))
        .connect(database_url)
        .await?;
    log::debug!("connected to database");
    Ok(pool)
}
