//! Client for the external rate-limit collaborator

mod client;

pub use client::RateLimitClient;
