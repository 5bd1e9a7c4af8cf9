//! Quote price arithmetic
//!
//! The automatic promotion discount and a manually entered promo code are
//! independent sources; the larger one wins, they never stack. Final prices
//! are floored at zero.

use rust_decimal::Decimal;

/// Effective router discount from the two independent sources.
pub fn effective_router_discount(
    promotion_discount: Decimal,
    promo_code_discount: Decimal,
) -> Decimal {
    promotion_discount.max(promo_code_discount)
}

/// Router price after the discount, never negative.
pub fn promoted_router_price(base_price: Decimal, discount: Decimal) -> Decimal {
    (base_price - discount).max(Decimal::ZERO)
}
