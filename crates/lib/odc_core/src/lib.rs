//! # odc_core
//!
//! Core domain logic for the odc trace catalogue: the trace model, trace
//! storage backends, token handling and database lifecycle helpers.

pub mod auth;
pub mod db;
pub mod migrate;
pub mod models;
pub mod store;

/// Returns the crate version.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
