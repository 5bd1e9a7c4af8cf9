//! Promotion fetching and promo-code redemption
//!
//! Wraps a [`PromotionStore`] and assembles full [`Promotion`] values:
//! validity-window filtering, per-promotion discount and building lookups,
//! and best-effort slug resolution for discount target references.
//!
//! Fetch failures are never surfaced to callers: the safe steady state is
//! "no promotions, no discount", so any store error yields an empty snapshot
//! with a logged warning.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use glasline_domain::types::promotion::{
    AppliedPromoCode, Promotion, PromotionSnapshot,
};
use glasline_domain::Result;
use tracing::warn;

use super::ports::{PromotionRecord, PromotionStore};
use super::resolver::{router_discount, setup_fee_waived};

/// Why a promo code cannot currently be redeemed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromoCodeRejection {
    /// The promotion is switched off
    Inactive,
    /// Evaluation time is outside the validity window
    OutsideWindow,
    /// The promotion requires an existing customer number
    CustomerNumberRequired,
}

/// Outcome of a promo-code redemption attempt.
#[derive(Debug, Clone)]
pub enum PromoCodeOutcome {
    /// The code is redeemable; carries the resolved price effects
    Available {
        promo: AppliedPromoCode,
        /// Promotion-provided display text, where configured
        message: Option<String>,
    },
    /// The code exists but cannot be redeemed right now
    Unavailable {
        reason: PromoCodeRejection,
        /// Promotion-provided display text, where configured
        message: Option<String>,
    },
    /// No promotion carries this code (or the store could not be read)
    Unknown,
}

/// Read-side service for promotions.
pub struct PromotionService {
    store: Arc<dyn PromotionStore>,
}

impl PromotionService {
    /// Create a new service over the given store.
    pub fn new(store: Arc<dyn PromotionStore>) -> Self {
        Self { store }
    }

    /// Fetch the currently valid promotions as a fresh immutable snapshot.
    ///
    /// Never fails: any store error is logged and an empty snapshot is
    /// returned, so callers fall back to undiscounted prices. Re-fetching is
    /// idempotent; the latest completed fetch wins.
    pub async fn fetch_active(&self, now: DateTime<Utc>) -> PromotionSnapshot {
        match self.try_fetch_active(now).await {
            Ok(promotions) => PromotionSnapshot { promotions, fetched_at: now },
            Err(err) => {
                warn!(error = %err, "promotion fetch failed; continuing without promotions");
                PromotionSnapshot::empty(now)
            }
        }
    }

    async fn try_fetch_active(&self, now: DateTime<Utc>) -> Result<Vec<Promotion>> {
        let records = self.store.list_active().await?;

        let mut promotions = Vec::with_capacity(records.len());
        for record in records {
            let promotion = self.assemble(record).await?;
            if promotion.is_within_window(now) {
                promotions.push(promotion);
            }
        }
        Ok(promotions)
    }

    /// Attempt to redeem a manually entered promo code.
    ///
    /// Looks the promotion up by its redemption code and evaluates active
    /// flag, validity window, and the customer-number requirement. Store
    /// errors degrade to [`PromoCodeOutcome::Unknown`], the no-discount
    /// default.
    pub async fn redeem_code(
        &self,
        code: &str,
        customer_number: Option<&str>,
        now: DateTime<Utc>,
    ) -> PromoCodeOutcome {
        match self.try_redeem_code(code, customer_number, now).await {
            Ok(outcome) => outcome,
            Err(err) => {
                warn!(error = %err, "promo code lookup failed; treating code as unknown");
                PromoCodeOutcome::Unknown
            }
        }
    }

    async fn try_redeem_code(
        &self,
        code: &str,
        customer_number: Option<&str>,
        now: DateTime<Utc>,
    ) -> Result<PromoCodeOutcome> {
        let Some(record) = self.store.find_by_code(code).await? else {
            return Ok(PromoCodeOutcome::Unknown);
        };

        let promotion = self.assemble(record).await?;
        let unavailable_message = promotion.unavailable_text.clone();

        let reason = if !promotion.is_active {
            Some(PromoCodeRejection::Inactive)
        } else if !promotion.is_within_window(now) {
            Some(PromoCodeRejection::OutsideWindow)
        } else if promotion.requires_customer_number
            && customer_number.map_or(true, |n| n.trim().is_empty())
        {
            Some(PromoCodeRejection::CustomerNumberRequired)
        } else {
            None
        };

        if let Some(reason) = reason {
            return Ok(PromoCodeOutcome::Unavailable { reason, message: unavailable_message });
        }

        let applicable = std::slice::from_ref(&promotion);
        let promo = AppliedPromoCode {
            code: code.to_string(),
            router_discount: router_discount(applicable),
            waives_setup_fee: setup_fee_waived(applicable),
        };
        Ok(PromoCodeOutcome::Available { promo, message: promotion.available_text.clone() })
    }

    /// Attach discounts, building associations, and resolved target slugs to
    /// a promotion record.
    ///
    /// Slug resolution is best-effort: an unresolvable reference is dropped
    /// from the slug lists without error. A failing lookup, by contrast,
    /// propagates and aborts the fetch.
    async fn assemble(&self, record: PromotionRecord) -> Result<Promotion> {
        let discounts = self.store.discounts_for(record.id).await?;
        let building_ids = self.store.buildings_for(record.id).await?;

        let mut target_tariff_slugs = Vec::new();
        let mut target_router_slugs = Vec::new();
        for discount in &discounts {
            if let Some(tariff_ref) = &discount.tariff_ref {
                if let Some(slug) = self.store.tariff_slug(tariff_ref).await? {
                    if !target_tariff_slugs.contains(&slug) {
                        target_tariff_slugs.push(slug);
                    }
                }
            }
            if let Some(router_ref) = &discount.router_ref {
                if let Some(slug) = self.store.router_slug(router_ref).await? {
                    if !target_router_slugs.contains(&slug) {
                        target_router_slugs.push(slug);
                    }
                }
            }
        }

        Ok(Promotion {
            id: record.id,
            name: record.name,
            code: record.code,
            description: record.description,
            is_global: record.is_global,
            is_active: record.is_active,
            starts_at: record.starts_at,
            ends_at: record.ends_at,
            requires_customer_number: record.requires_customer_number,
            available_text: record.available_text,
            unavailable_text: record.unavailable_text,
            discounts,
            building_ids,
            target_tariff_slugs,
            target_router_slugs,
        })
    }
}
