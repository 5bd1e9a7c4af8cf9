//! # Glasline API
//!
//! HTTP surface of the ordering backend: route handlers, error mapping, and
//! the application context that wires repositories into the core services.

pub mod context;
pub mod error;
pub mod routes;

pub use context::AppContext;
pub use error::ApiError;
pub use routes::router;
