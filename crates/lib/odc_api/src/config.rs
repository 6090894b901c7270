//! API server configuration.

use odc_core::auth::jwt::resolve_jwt_secret;

/// Default listen address.
pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:8081";

/// Default PostgreSQL connection URL.
pub const DEFAULT_DATABASE_URL: &str = "postgres://localhost:5432/odc";

/// Default connection pool size.
pub const DEFAULT_MAX_CONNECTIONS: u32 = 5;

/// Configuration for the API server.
#[derive(Clone, Debug)]
pub struct ApiConfig {
    /// Address to bind the HTTP listener (e.g. "127.0.0.1:8081").
    pub bind_addr: String,
    /// PostgreSQL connection URL.
    pub database_url: String,
    /// JWT signing secret.
    pub jwt_secret: String,
    /// Maximum number of pooled database connections.
    pub max_connections: u32,
}

impl ApiConfig {
    /// Reads configuration from environment variables with sensible defaults.
    ///
    /// | Variable             | Default                          |
    /// |----------------------|----------------------------------|
    /// | `BIND_ADDR`          | `127.0.0.1:8081`                 |
    /// | `DATABASE_URL`       | `postgres://localhost:5432/odc`  |
    /// | `JWT_SECRET` / `AUTH_SECRET` | generated & persisted to file |
    /// | `DB_MAX_CONNECTIONS` | `5`                              |
    pub fn from_env() -> Self {
        Self {
            bind_addr: std::env::var("BIND_ADDR").unwrap_or_else(|_| DEFAULT_BIND_ADDR.into()),
            database_url: std::env::var("DATABASE_URL")
                .unwrap_or_else(|_| DEFAULT_DATABASE_URL.into()),
            jwt_secret: resolve_jwt_secret(),
            max_connections: parse_max_connections(std::env::var("DB_MAX_CONNECTIONS").ok()),
        }
    }
}

/// Parse a pool size, falling back to the default for missing, invalid or zero values.
fn parse_max_connections(raw: Option<String>) -> u32 {
    raw.and_then(|v| v.trim().parse::<u32>().ok())
        .filter(|n| *n > 0)
        .unwrap_or(DEFAULT_MAX_CONNECTIONS)
}
