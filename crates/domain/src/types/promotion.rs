//! Promotion and discount types
//!
//! Promotions are created and edited by an external admin surface; the
//! ordering flow only ever reads them. The assembled [`Promotion`] carries
//! its discounts, building associations, and the target slugs resolved from
//! the raw references at fetch time.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// What part of the order a discount applies to.
///
/// Serialized values match the store's vocabulary (`option`, `setup_fee`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiscountTarget {
    /// The rentable router add-on
    Option,
    /// The one-time setup fee
    SetupFee,
}

/// How a discount changes the price.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiscountKind {
    /// A fixed amount off; the amount field carries the value
    Fixed,
    /// The target is waived entirely; the amount field is ignored
    Waive,
}

/// A single price effect attached to a promotion.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Discount {
    pub id: Uuid,
    pub promotion_id: Uuid,
    pub applies_to: DiscountTarget,
    pub kind: DiscountKind,
    /// Meaningful only for [`DiscountKind::Fixed`]; `None` contributes zero
    pub amount: Option<Decimal>,
    /// Raw tariff reference, resolved to a slug at fetch time
    pub tariff_ref: Option<String>,
    /// Raw router reference, resolved to a slug at fetch time
    pub router_ref: Option<String>,
}

impl Discount {
    /// The fixed amount this discount contributes, treating `None` as zero.
    /// Waive-type discounts contribute nothing here.
    pub fn fixed_amount(&self) -> Decimal {
        match self.kind {
            DiscountKind::Fixed => self.amount.unwrap_or_default(),
            DiscountKind::Waive => Decimal::ZERO,
        }
    }
}

/// A time-bounded marketing rule granting discounts, optionally restricted
/// to buildings and/or tariffs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Promotion {
    pub id: Uuid,
    pub name: String,
    /// Redemption code for the manual promo-code entry path
    pub code: Option<String>,
    pub description: Option<String>,
    /// Applies everywhere when no tariff/building targets are set
    pub is_global: bool,
    pub is_active: bool,
    /// Start of the validity window, inclusive
    pub starts_at: Option<DateTime<Utc>>,
    /// End of the validity window, inclusive
    pub ends_at: Option<DateTime<Utc>>,
    /// Redemption requires an existing customer number
    pub requires_customer_number: bool,
    /// Display text shown when the promotion is available
    pub available_text: Option<String>,
    /// Display text shown when the promotion is not available
    pub unavailable_text: Option<String>,
    /// Price effects owned by this promotion
    pub discounts: Vec<Discount>,
    /// Buildings this promotion is restricted to; empty means unrestricted
    pub building_ids: Vec<String>,
    /// Tariff slugs resolved from the discounts' tariff references
    pub target_tariff_slugs: Vec<String>,
    /// Router slugs resolved from the discounts' router references
    pub target_router_slugs: Vec<String>,
}

impl Promotion {
    /// Whether `now` falls inside the validity window. Both bounds are
    /// inclusive; a missing bound is open.
    pub fn is_within_window(&self, now: DateTime<Utc>) -> bool {
        if self.starts_at.is_some_and(|starts| now < starts) {
            return false;
        }
        if self.ends_at.is_some_and(|ends| now > ends) {
            return false;
        }
        true
    }

    /// Whether the promotion targets specific tariffs.
    pub fn has_tariff_target(&self) -> bool {
        !self.target_tariff_slugs.is_empty()
    }

    /// Whether the promotion is restricted to specific buildings.
    pub fn has_building_target(&self) -> bool {
        !self.building_ids.is_empty()
    }
}

/// An immutable snapshot of the active promotions at fetch time.
///
/// Re-fetching produces a fresh snapshot; the latest completed fetch wins.
/// The snapshot is never mutated in place.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PromotionSnapshot {
    pub promotions: Vec<Promotion>,
    pub fetched_at: DateTime<Utc>,
}

impl PromotionSnapshot {
    /// An empty snapshot; the safe steady state after a failed fetch.
    pub fn empty(fetched_at: DateTime<Utc>) -> Self {
        Self { promotions: Vec::new(), fetched_at }
    }
}

/// The price effects of a manually entered promo code, already resolved.
///
/// Compared against the automatic promotion discount by the quote pricing;
/// the two sources never stack.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppliedPromoCode {
    pub code: String,
    pub router_discount: Decimal,
    pub waives_setup_fee: bool,
}
