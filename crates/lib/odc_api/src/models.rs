//! API request/response documents.
//!
//! Field names here are the wire contract; domain types live in
//! `odc_core::models`.

use odc_core::models::trace::Trace;
use serde::{Deserialize, Serialize};

/// Error body returned for every non-2xx response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
}

/// Envelope wrapping every successful resource payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataResponse<T> {
    pub data: T,
}

impl<T> DataResponse<T> {
    pub fn new(data: T) -> Self {
        Self { data }
    }
}

/// Serialized trace.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TraceDocument {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
}

impl From<Trace> for TraceDocument {
    fn from(t: Trace) -> Self {
        Self {
            id: t.id,
            name: t.name,
            kind: t.kind,
        }
    }
}

/// Health check body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    #[serde(rename = "storeReachable")]
    pub store_reachable: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trace_document_uses_wire_field_names() {
        let doc = TraceDocument::from(Trace {
            id: "bitbrains-small".into(),
            name: "Bitbrains (small)".into(),
            kind: "VM".into(),
        });
        let json = serde_json::to_value(DataResponse::new(doc)).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "data": { "_id": "bitbrains-small", "name": "Bitbrains (small)", "type": "VM" }
            })
        );
    }

    #[test]
    fn health_uses_camel_case() {
        let json = serde_json::to_value(HealthResponse {
            status: "ok".into(),
            version: "0.1.0".into(),
            store_reachable: true,
        })
        .unwrap();
        assert_eq!(json["storeReachable"], true);
    }
}
