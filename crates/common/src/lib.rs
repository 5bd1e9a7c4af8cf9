//! # Glasline Common
//!
//! Cross-cutting utilities with no domain knowledge.
//!
//! This crate contains:
//! - Signed session tokens for the password gate (`auth`)
//! - Customer-input validation rules (`validation`)
//!
//! ## Architecture
//! - No dependencies on other Glasline crates
//! - Pure utilities; no I/O

pub mod auth;
pub mod validation;
