//! Application configuration structures
//!
//! Populated by the infra config loader from environment variables or a
//! JSON/TOML file. See `glasline-infra::config::loader` for the loading
//! strategy.

use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_DB_POOL_SIZE, DEFAULT_SESSION_TTL_SECONDS};

/// Top-level application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// HTTP server settings
    pub server: ServerConfig,
    /// SQLite database settings
    pub database: DatabaseConfig,
    /// Password-gate session settings
    pub session: SessionConfig,
    /// External rate-limit collaborator settings
    pub rate_limit: RateLimitConfig,
}

/// HTTP server settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Socket address the API binds to, e.g. `127.0.0.1:8080`
    pub bind_addr: String,
}

/// SQLite database settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// Path to the database file
    pub path: String,
    /// Connection pool size
    #[serde(default = "default_pool_size")]
    pub pool_size: u32,
}

/// Password-gate session settings
///
/// Rotating `secret` or bumping `generation` invalidates every outstanding
/// session token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Password protecting the order flow
    pub password: String,
    /// Secret the session-token MAC key is derived from
    pub secret: String,
    /// Token generation; bump to invalidate all issued tokens
    #[serde(default)]
    pub generation: u32,
    /// Token lifetime in seconds
    #[serde(default = "default_session_ttl")]
    pub ttl_seconds: i64,
}

/// External rate-limit collaborator settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RateLimitConfig {
    /// Base URL of the rate-limit endpoint; `None` disables the gate
    pub endpoint: Option<String>,
}

fn default_pool_size() -> u32 {
    DEFAULT_DB_POOL_SIZE
}

fn default_session_ttl() -> i64 {
    DEFAULT_SESSION_TTL_SECONDS
}
