//! Conversions from external infrastructure errors into domain errors.

use glasline_domain::GlaslineError;
use reqwest::Error as HttpError;
use rusqlite::Error as SqlError;

/// Error newtype that keeps conversions on the infrastructure side and can be
/// converted back into the domain error.
#[derive(Debug)]
pub struct InfraError(pub GlaslineError);

impl From<InfraError> for GlaslineError {
    fn from(value: InfraError) -> Self {
        value.0
    }
}

impl From<GlaslineError> for InfraError {
    fn from(value: GlaslineError) -> Self {
        InfraError(value)
    }
}

impl From<SqlError> for InfraError {
    fn from(value: SqlError) -> Self {
        use rusqlite::ffi::ErrorCode;

        let mapped = match value {
            SqlError::QueryReturnedNoRows => {
                GlaslineError::NotFound("no rows returned by query".into())
            }
            SqlError::SqliteFailure(err, maybe_message) => {
                let message = maybe_message.unwrap_or_default();
                match err.code {
                    ErrorCode::DatabaseBusy => GlaslineError::Database("database is busy".into()),
                    ErrorCode::DatabaseLocked => {
                        GlaslineError::Database("database is locked".into())
                    }
                    ErrorCode::ConstraintViolation => {
                        GlaslineError::Database(format!("constraint violation: {message}"))
                    }
                    _ => GlaslineError::Database(format!(
                        "sqlite failure {:?} (code {}): {message}",
                        err.code, err.extended_code
                    )),
                }
            }
            other => GlaslineError::Database(other.to_string()),
        };
        InfraError(mapped)
    }
}

impl From<r2d2::Error> for InfraError {
    fn from(value: r2d2::Error) -> Self {
        InfraError(GlaslineError::Database(format!("connection pool error: {value}")))
    }
}

impl From<HttpError> for InfraError {
    fn from(value: HttpError) -> Self {
        let mapped = if value.is_timeout() {
            GlaslineError::Network("request timed out".into())
        } else if value.is_connect() {
            GlaslineError::Network(format!("connection failed: {value}"))
        } else {
            GlaslineError::Network(value.to_string())
        };
        InfraError(mapped)
    }
}

impl From<serde_json::Error> for InfraError {
    fn from(value: serde_json::Error) -> Self {
        InfraError(GlaslineError::Database(format!("stored JSON is invalid: {value}")))
    }
}
