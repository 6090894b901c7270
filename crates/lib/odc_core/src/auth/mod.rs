//! Authentication logic.
//!
//! Provides JWT issuing and verification shared by `odc_api` (which verifies
//! bearer tokens) and `odc_cli` (which mints them for operators).

pub mod jwt;

use thiserror::Error;

/// Authentication errors.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Token error: {0}")]
    TokenError(String),

    #[error("Validation error: {0}")]
    ValidationError(String),
}
