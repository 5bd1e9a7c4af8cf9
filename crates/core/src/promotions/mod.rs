//! Promotion fetching, applicability matching, and discount resolution
//!
//! The pipeline runs in three steps, each independently testable:
//! 1. [`PromotionService`] fetches active promotions and assembles them
//!    (validity-window filter, discount/building lookups, slug resolution).
//! 2. [`applicable_promotions`] decides which promotions match the current
//!    tariff/building selection.
//! 3. [`router_discount`] / [`setup_fee_waived`] aggregate the price effects
//!    of the matching promotions.

pub mod matcher;
pub mod ports;
pub mod resolver;
pub mod service;

pub use matcher::applicable_promotions;
pub use resolver::{router_discount, setup_fee_waived};
pub use service::{PromoCodeOutcome, PromoCodeRejection, PromotionService};
