//! PostgreSQL trace store.

use async_trait::async_trait;
use sqlx::PgPool;

use super::{StoreError, StoreResult, TraceStore};
use crate::models::trace::{NewTrace, Trace};

type TraceRow = (String, String, String);

fn into_trace((id, name, kind): TraceRow) -> Trace {
    Trace { id, name, kind }
}

/// Trace store over the `traces` table.
#[derive(Debug, Clone)]
pub struct PgTraceStore {
    pool: PgPool,
}

impl PgTraceStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// The underlying connection pool.
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[async_trait]
impl TraceStore for PgTraceStore {
    async fn list_traces(&self) -> StoreResult<Vec<Trace>> {
        let rows = sqlx::query_as::<_, TraceRow>(
            "SELECT id, name, type FROM traces ORDER BY name, id",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows.into_iter().map(into_trace).collect())
    }

    async fn get_trace(&self, id: &str) -> StoreResult<Option<Trace>> {
        let row = sqlx::query_as::<_, TraceRow>("SELECT id, name, type FROM traces WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.map(into_trace))
    }

    async fn insert_trace(&self, trace: NewTrace) -> StoreResult<Trace> {
        trace.validate().map_err(StoreError::Validation)?;
        let row = sqlx::query_as::<_, TraceRow>(
            "INSERT INTO traces (id, name, type) VALUES ($1, $2, $3) RETURNING id, name, type",
        )
        .bind(&trace.id)
        .bind(&trace.name)
        .bind(&trace.kind)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(ref db) if db.is_unique_violation() => {
                StoreError::Duplicate(trace.id.clone())
            }
            other => StoreError::Db(other),
        })?;
        Ok(into_trace(row))
    }

    async fn delete_trace(&self, id: &str) -> StoreResult<bool> {
        let result = sqlx::query("DELETE FROM traces WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn ping(&self) -> bool {
        sqlx::query("SELECT 1").execute(&self.pool).await.is_ok()
    }
}
