//! Error types used throughout the application

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Main error type for Glasline
#[derive(Error, Debug, Serialize, Deserialize)]
#[serde(tag = "type", content = "message")]
pub enum GlaslineError {
    /// Database read/write failure.
    #[error("Database error: {0}")]
    Database(String),

    /// Configuration could not be loaded or is invalid.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Transport-level failure talking to an external collaborator.
    #[error("Network error: {0}")]
    Network(String),

    /// Session token or password-gate failure.
    #[error("Authentication error: {0}")]
    Auth(String),

    /// A requested entity does not exist.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Caller-supplied data failed validation.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// The request was refused by the rate-limit gate.
    #[error("Rate limited: {0}")]
    RateLimited(String),

    /// Anything that should never happen in normal operation.
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Result type alias for Glasline operations
pub type Result<T> = std::result::Result<T, GlaslineError>;
