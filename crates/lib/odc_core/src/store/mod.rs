//! Trace storage.
//!
//! [`TraceStore`] is the seam between the HTTP resources and the database.
//! [`PgTraceStore`] backs production deployments; [`MemoryTraceStore`] serves
//! tests and database-less local runs. Both list traces ordered by name, then id.

mod memory;
mod postgres;

pub use memory::MemoryTraceStore;
pub use postgres::PgTraceStore;

use async_trait::async_trait;
use thiserror::Error;

use crate::models::trace::{NewTrace, Trace};

/// Errors raised by trace stores.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Trace '{0}' already exists")]
    Duplicate(String),

    #[error("Database error: {0}")]
    Db(#[from] sqlx::Error),
}

/// Result type for store operations.
pub type StoreResult<T> = std::result::Result<T, StoreError>;

/// Storage operations for traces.
#[async_trait]
pub trait TraceStore: Send + Sync {
    /// All traces, ordered by name then id.
    async fn list_traces(&self) -> StoreResult<Vec<Trace>>;

    /// A trace by identifier, `None` when absent.
    async fn get_trace(&self, id: &str) -> StoreResult<Option<Trace>>;

    /// Validate and store a new trace.
    async fn insert_trace(&self, trace: NewTrace) -> StoreResult<Trace>;

    /// Remove a trace; `true` when something was removed.
    async fn delete_trace(&self, id: &str) -> StoreResult<bool>;

    /// Whether the backend is reachable.
    async fn ping(&self) -> bool;
}
