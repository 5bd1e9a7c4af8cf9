//! Discount aggregation over applicable promotions

use glasline_domain::types::promotion::{DiscountKind, DiscountTarget, Promotion};
use rust_decimal::Decimal;

/// Total router discount across all applicable promotions.
///
/// Plain additive sum of the fixed amounts on router-targeted discounts; a
/// missing amount counts as zero. The sum is not clamped to the router's own
/// price here; the quote pricing floors the final price at zero.
pub fn router_discount(applicable: &[Promotion]) -> Decimal {
    applicable
        .iter()
        .flat_map(|p| &p.discounts)
        .filter(|d| d.applies_to == DiscountTarget::Option && d.kind == DiscountKind::Fixed)
        .map(|d| d.amount.unwrap_or_default())
        .sum()
}

/// Whether any applicable promotion waives the setup fee.
///
/// A boolean OR, not cumulative: one waiver is as good as many.
pub fn setup_fee_waived(applicable: &[Promotion]) -> bool {
    applicable
        .iter()
        .flat_map(|p| &p.discounts)
        .any(|d| d.applies_to == DiscountTarget::SetupFee && d.kind == DiscountKind::Waive)
}
