//! Domain models.
//!
//! These are internal domain models, distinct from the API documents in
//! `odc_api::models` (which carry the wire field names).

pub mod auth;
pub mod trace;
