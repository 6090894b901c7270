//! In-memory trace store for testing and development.

use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::{StoreError, StoreResult, TraceStore};
use crate::models::trace::{NewTrace, Trace};

/// Trace store keyed by id, held behind a shared lock.
#[derive(Debug, Clone, Default)]
pub struct MemoryTraceStore {
    traces: Arc<RwLock<BTreeMap<String, Trace>>>,
}

impl MemoryTraceStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store pre-populated with `traces`.
    pub fn with_traces(traces: impl IntoIterator<Item = Trace>) -> Self {
        let map = traces.into_iter().map(|t| (t.id.clone(), t)).collect();
        Self {
            traces: Arc::new(RwLock::new(map)),
        }
    }
}

#[async_trait]
impl TraceStore for MemoryTraceStore {
    async fn list_traces(&self) -> StoreResult<Vec<Trace>> {
        let traces = self.traces.read().await;
        let mut all: Vec<Trace> = traces.values().cloned().collect();
        all.sort_by(|a, b| a.name.cmp(&b.name).then_with(|| a.id.cmp(&b.id)));
        Ok(all)
    }

    async fn get_trace(&self, id: &str) -> StoreResult<Option<Trace>> {
        Ok(self.traces.read().await.get(id).cloned())
    }

    async fn insert_trace(&self, trace: NewTrace) -> StoreResult<Trace> {
        trace.validate().map_err(StoreError::Validation)?;
        let mut traces = self.traces.write().await;
        if traces.contains_key(&trace.id) {
            return Err(StoreError::Duplicate(trace.id));
        }
        let trace = Trace::from(trace);
        traces.insert(trace.id.clone(), trace.clone());
        Ok(trace)
    }

    async fn delete_trace(&self, id: &str) -> StoreResult<bool> {
        Ok(self.traces.write().await.remove(id).is_some())
    }

    async fn ping(&self) -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn trace(id: &str, name: &str) -> Trace {
        Trace {
            id: id.into(),
            name: name.into(),
            kind: "VM".into(),
        }
    }

    #[tokio::test]
    async fn list_is_ordered_by_name_then_id() {
        let store = MemoryTraceStore::with_traces([
            trace("c", "Bitbrains"),
            trace("a", "Solvinity"),
            trace("b", "Bitbrains"),
        ]);
        let ids: Vec<String> = store
            .list_traces()
            .await
            .unwrap()
            .into_iter()
            .map(|t| t.id)
            .collect();
        assert_eq!(ids, ["b", "c", "a"]);
    }

    #[tokio::test]
    async fn get_returns_none_for_unknown_id() {
        let store = MemoryTraceStore::with_traces([trace("123", "Bitbrains")]);
        assert_eq!(store.get_trace("123").await.unwrap(), Some(trace("123", "Bitbrains")));
        assert_eq!(store.get_trace("1").await.unwrap(), None);
    }

    #[tokio::test]
    async fn insert_rejects_duplicates_and_invalid_traces() {
        let store = MemoryTraceStore::new();
        store
            .insert_trace(NewTrace::new("x", "X", "VM"))
            .await
            .unwrap();

        let dup = store.insert_trace(NewTrace::new("x", "Y", "VM")).await;
        assert!(matches!(dup, Err(StoreError::Duplicate(id)) if id == "x"));

        let invalid = store.insert_trace(NewTrace::new("", "Y", "VM")).await;
        assert!(matches!(invalid, Err(StoreError::Validation(_))));

        assert_eq!(store.list_traces().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn delete_reports_whether_a_trace_was_removed() {
        let store = MemoryTraceStore::with_traces([trace("x", "X")]);
        assert!(store.delete_trace("x").await.unwrap());
        assert!(!store.delete_trace("x").await.unwrap());
        assert!(store.list_traces().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn clones_share_state() {
        let store = MemoryTraceStore::new();
        let other = store.clone();
        store
            .insert_trace(NewTrace::new("x", "X", "VM"))
            .await
            .unwrap();
        assert!(other.get_trace("x").await.unwrap().is_some());
        assert!(other.ping().await);
    }
}
