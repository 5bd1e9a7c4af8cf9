//! Address availability lookup

pub mod ports;
pub mod service;

pub use service::{AvailabilityResult, AvailabilityService};
