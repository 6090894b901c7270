//! JWT token generation and verification.

use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::{Duration, Utc};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use rand::distr::Alphanumeric;
use rand::{Rng, rng};
use tracing::{info, warn};

use super::AuthError;
use crate::models::auth::TokenClaims;

/// Default access token lifetime in minutes.
pub const ACCESS_TOKEN_EXPIRY_MINUTES: i64 = 15;

/// Length of generated secrets.
const GENERATED_SECRET_LEN: usize = 64;

/// Generate a signed JWT access token (HS256) valid for `ttl`.
pub fn issue_access_token(
    sub: &str,
    email: Option<&str>,
    ttl: Duration,
    secret: &[u8],
) -> Result<String, AuthError> {
    if sub.trim().is_empty() {
        return Err(AuthError::ValidationError("token subject must not be empty".into()));
    }
    if ttl <= Duration::zero() {
        return Err(AuthError::ValidationError("token lifetime must be positive".into()));
    }
    let now = Utc::now();
    let expires_at = now
        .checked_add_signed(ttl)
        .ok_or_else(|| AuthError::ValidationError("token lifetime too large".into()))?;
    let claims = TokenClaims {
        sub: sub.to_string(),
        email: email.map(str::to_string),
        exp: expires_at.timestamp(),
        iat: now.timestamp(),
    };
    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret),
    )
    .map_err(|e| AuthError::TokenError(format!("jwt encode: {e}")))
}

/// Verify a JWT access token, returning the claims on success.
pub fn verify_access_token(token: &str, secret: &[u8]) -> Option<TokenClaims> {
    let key = DecodingKey::from_secret(secret);
    let mut validation = Validation::default();
    validation.validate_exp = true;
    decode::<TokenClaims>(token, &key, &validation)
        .ok()
        .map(|data| data.claims)
}

/// Resolve the JWT secret: env var `JWT_SECRET` → `AUTH_SECRET` → persisted file.
pub fn resolve_jwt_secret() -> String {
    resolve_secret_with(
        std::env::var("JWT_SECRET").ok(),
        std::env::var("AUTH_SECRET").ok(),
        &jwt_secret_path(),
    )
}

/// Pick the first non-empty explicit secret, else read or create the file at `path`.
pub fn resolve_secret_with(
    jwt_secret: Option<String>,
    auth_secret: Option<String>,
    path: &Path,
) -> String {
    if let Some(secret) = jwt_secret
        && !secret.is_empty()
    {
        return secret;
    }
    if let Some(secret) = auth_secret
        && !secret.is_empty()
    {
        return secret;
    }
    if let Ok(existing) = std::fs::read_to_string(path) {
        let trimmed = existing.trim();
        if !trimmed.is_empty() {
            return trimmed.to_string();
        }
    }
    let secret: String = rng()
        .sample_iter(&Alphanumeric)
        .take(GENERATED_SECRET_LEN)
        .map(char::from)
        .collect();
    match persist_secret(path, &secret) {
        Ok(()) => info!(path = %path.display(), "generated new JWT secret"),
        Err(e) => warn!(
            path = %path.display(),
            error = %e,
            "could not persist generated JWT secret; it is only valid for this process"
        ),
    }
    secret
}

/// Write `secret` to `path`, readable by the owner only on Unix.
fn persist_secret(path: &Path, secret: &str) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let mut options = std::fs::OpenOptions::new();
    options.write(true).create(true).truncate(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(0o600);
    }
    let mut file = options.open(path)?;
    file.write_all(secret.as_bytes())?;
    file.sync_all()
}

/// Path to the persisted JWT secret file.
fn jwt_secret_path() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("odc")
        .join("jwt-secret")
}
