//! # Glasline Core
//!
//! Pure business logic layer - no infrastructure dependencies.
//!
//! This crate contains:
//! - Promotion fetching, applicability matching, and discount resolution
//! - Quote pricing and order intake
//! - Availability lookup
//! - Port/adapter interfaces (traits)
//!
//! ## Architecture Principles
//! - Only depends on `glasline-domain` and `glasline-common`
//! - No database or HTTP code
//! - All external dependencies via traits
//! - Pure, testable business logic

pub mod availability;
pub mod ordering;
pub mod promotions;

// Re-export specific items to avoid ambiguity
pub use availability::ports::BuildingStore;
pub use availability::{AvailabilityResult, AvailabilityService};
pub use ordering::ports::{CatalogStore, OrderStore, RateLimitDecision, RateLimitGate};
pub use ordering::{OrderRequest, OrderService, QuoteService};
pub use promotions::ports::{PromotionRecord, PromotionStore};
pub use promotions::{
    applicable_promotions, router_discount, setup_fee_waived, PromoCodeOutcome,
    PromoCodeRejection, PromotionService,
};
