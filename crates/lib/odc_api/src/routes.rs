//! Route paths.

pub const GET_HEALTH: &str = "/health";
pub const GET_TRACES: &str = "/traces";
pub const GET_TRACES_ID: &str = "/traces/{trace_id}";
