//! Customer-input validation
//!
//! Small, composable field rules used by the order intake. Each rule
//! returns `Err` with a human-readable message naming the field, so callers
//! can collect every failure before rejecting a request.

mod rules;

pub use rules::{
    validate_email, validate_phone, validate_postal_code, validate_required,
};
