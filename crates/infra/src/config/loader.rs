//! Configuration loader
//!
//! Loads application configuration from environment variables or files.
//!
//! ## Loading Strategy
//! 1. First, attempts to load from environment variables
//! 2. If incomplete, falls back to loading from file
//! 3. Probes multiple paths for config files
//! 4. Supports JSON and TOML formats
//!
//! ## Environment Variables
//! - `GLASLINE_BIND_ADDR`: Socket address for the HTTP server
//! - `GLASLINE_DB_PATH`: Database file path
//! - `GLASLINE_DB_POOL_SIZE`: Connection pool size (optional)
//! - `GLASLINE_GATE_PASSWORD`: Password protecting the order flow
//! - `GLASLINE_SESSION_SECRET`: Secret the session MAC key is derived from
//! - `GLASLINE_SESSION_GENERATION`: Token generation (optional, default 0)
//! - `GLASLINE_SESSION_TTL`: Token lifetime in seconds (optional)
//! - `GLASLINE_RATE_LIMIT_ENDPOINT`: Rate-limit collaborator URL (optional;
//!   unset disables the gate)
//!
//! ## File Locations
//! The loader probes `./config.{json,toml}` and `./glasline.{json,toml}` in
//! the working directory, then the same names up to two directories up.

use std::path::{Path, PathBuf};

use glasline_domain::constants::{DEFAULT_DB_POOL_SIZE, DEFAULT_SESSION_TTL_SECONDS};
use glasline_domain::{
    Config, DatabaseConfig, GlaslineError, RateLimitConfig, Result, ServerConfig, SessionConfig,
};

/// Load configuration with automatic fallback strategy
///
/// First attempts to load from environment variables. If any required
/// variables are missing, falls back to loading from a config file.
///
/// # Errors
/// Returns `GlaslineError::Config` if configuration cannot be loaded from
/// either source.
pub fn load() -> Result<Config> {
    match load_from_env() {
        Ok(config) => {
            tracing::info!("Configuration loaded from environment variables");
            Ok(config)
        }
        Err(e) => {
            tracing::debug!(error = ?e, "Failed to load from environment, trying file");
            load_from_file(None)
        }
    }
}

/// Load configuration from environment variables
///
/// # Errors
/// Returns `GlaslineError::Config` if required variables are missing or have
/// invalid values.
pub fn load_from_env() -> Result<Config> {
    let bind_addr = env_var("GLASLINE_BIND_ADDR")?;
    let db_path = env_var("GLASLINE_DB_PATH")?;
    let db_pool_size = match std::env::var("GLASLINE_DB_POOL_SIZE") {
        Ok(raw) => raw
            .parse::<u32>()
            .map_err(|e| GlaslineError::Config(format!("Invalid pool size: {e}")))?,
        Err(_) => DEFAULT_DB_POOL_SIZE,
    };

    let password = env_var("GLASLINE_GATE_PASSWORD")?;
    let secret = env_var("GLASLINE_SESSION_SECRET")?;
    let generation = match std::env::var("GLASLINE_SESSION_GENERATION") {
        Ok(raw) => raw
            .parse::<u32>()
            .map_err(|e| GlaslineError::Config(format!("Invalid session generation: {e}")))?,
        Err(_) => 0,
    };
    let ttl_seconds = match std::env::var("GLASLINE_SESSION_TTL") {
        Ok(raw) => raw
            .parse::<i64>()
            .map_err(|e| GlaslineError::Config(format!("Invalid session ttl: {e}")))?,
        Err(_) => DEFAULT_SESSION_TTL_SECONDS,
    };

    let rate_limit_endpoint = std::env::var("GLASLINE_RATE_LIMIT_ENDPOINT").ok();

    Ok(Config {
        server: ServerConfig { bind_addr },
        database: DatabaseConfig { path: db_path, pool_size: db_pool_size },
        session: SessionConfig { password, secret, generation, ttl_seconds },
        rate_limit: RateLimitConfig { endpoint: rate_limit_endpoint },
    })
}

/// Load configuration from a file
///
/// If `path` is `None`, probes multiple locations for config files. Supports
/// both JSON and TOML formats (detected by file extension).
///
/// # Errors
/// Returns `GlaslineError::Config` if no file is found or parsing fails.
pub fn load_from_file(path: Option<PathBuf>) -> Result<Config> {
    let config_path = match path {
        Some(p) => {
            if !p.exists() {
                return Err(GlaslineError::Config(format!(
                    "Config file not found: {}",
                    p.display()
                )));
            }
            p
        }
        None => probe_config_paths().ok_or_else(|| {
            GlaslineError::Config(
                "No config file found in any of the standard locations".to_string(),
            )
        })?,
    };

    tracing::info!(path = %config_path.display(), "Loading configuration from file");

    let contents = std::fs::read_to_string(&config_path)
        .map_err(|e| GlaslineError::Config(format!("Failed to read config file: {e}")))?;

    parse_config(&contents, &config_path)
}

/// Parse configuration from string content
///
/// Format is detected by file extension (`.json` or `.toml`).
fn parse_config(contents: &str, path: &Path) -> Result<Config> {
    let extension = path.extension().and_then(|e| e.to_str()).unwrap_or("json");

    match extension {
        "toml" => toml::from_str(contents)
            .map_err(|e| GlaslineError::Config(format!("Invalid TOML format: {e}"))),
        "json" => serde_json::from_str(contents)
            .map_err(|e| GlaslineError::Config(format!("Invalid JSON format: {e}"))),
        _ => Err(GlaslineError::Config(format!("Unsupported config format: {extension}"))),
    }
}

/// Probe multiple paths for configuration files
///
/// # Returns
/// The first config file found, or `None` if no file exists.
fn probe_config_paths() -> Option<PathBuf> {
    let names = ["config.json", "config.toml", "glasline.json", "glasline.toml"];
    let bases = [".", "..", "../.."];

    for base in bases {
        for name in names {
            let candidate = Path::new(base).join(name);
            if candidate.is_file() {
                return Some(candidate);
            }
        }
    }
    None
}

fn env_var(name: &str) -> Result<String> {
    std::env::var(name)
        .map_err(|_| GlaslineError::Config(format!("Missing environment variable: {name}")))
}
