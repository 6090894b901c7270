//! Trace domain models.

use serde::{Deserialize, Serialize};

/// A named workload dataset registered in the catalogue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Trace {
    /// Opaque identifier, used as a URL path segment.
    pub id: String,
    /// Human-readable name.
    pub name: String,
    /// Trace type (e.g. `VM`, `Workflow`).
    pub kind: String,
}

/// A trace that has not been stored yet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewTrace {
    pub id: String,
    pub name: String,
    pub kind: String,
}

impl NewTrace {
    pub fn new(id: impl Into<String>, name: impl Into<String>, kind: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            kind: kind.into(),
        }
    }

    /// Check the fields, returning a description of the first problem found.
    pub fn validate(&self) -> Result<(), String> {
        if self.id.trim().is_empty() {
            return Err("trace id must not be empty".into());
        }
        if self.id.contains('/') || self.id.chars().any(char::is_whitespace) {
            return Err(format!(
                "trace id '{}' must not contain '/' or whitespace",
                self.id
            ));
        }
        if self.name.trim().is_empty() {
            return Err("trace name must not be empty".into());
        }
        if self.kind.trim().is_empty() {
            return Err("trace type must not be empty".into());
        }
        Ok(())
    }
}

impl From<NewTrace> for Trace {
    fn from(t: NewTrace) -> Self {
        Self {
            id: t.id,
            name: t.name,
            kind: t.kind,
        }
    }
}
