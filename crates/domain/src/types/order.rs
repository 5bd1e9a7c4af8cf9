//! Order flow types: selection context, quote, customer data, orders

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::promotion::AppliedPromoCode;

/// The user's current selection in the ordering flow.
///
/// Created when the user reaches tariff selection, mutated as selections
/// change, discarded when the flow resets. Every field except the tariff is
/// optional while the flow is in progress.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Selection {
    pub tariff_slug: Option<String>,
    pub building_id: Option<String>,
    pub router_slug: Option<String>,
    /// Manually entered promo code, already validated and resolved
    pub promo_code: Option<AppliedPromoCode>,
}

impl Selection {
    /// An empty selection, as the flow starts with.
    pub fn empty() -> Self {
        Self { tariff_slug: None, building_id: None, router_slug: None, promo_code: None }
    }
}

/// The computed price breakdown for a selection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Quote {
    pub tariff_slug: String,
    pub tariff_monthly_price: Decimal,
    pub router_slug: Option<String>,
    /// Router rental before discounts; zero when no router is selected
    pub router_base_price: Decimal,
    /// Effective router discount (larger of promotion and promo code)
    pub router_discount: Decimal,
    /// Router rental after the discount, floored at zero
    pub router_price: Decimal,
    /// Setup fee before any waiver
    pub setup_fee: Decimal,
    pub setup_fee_waived: bool,
    /// Setup fee actually due
    pub setup_fee_due: Decimal,
    /// Tariff plus discounted router rental
    pub monthly_total: Decimal,
    /// Names of the promotions that produced the discount
    pub applied_promotions: Vec<String>,
}

/// Customer master data captured with the order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CustomerDetails {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub street: String,
    pub house_number: String,
    pub postal_code: String,
    pub city: String,
    /// Existing customer number, required by some promotions
    pub customer_number: Option<String>,
}

/// Consent flags captured at order submission.
///
/// Terms and privacy are mandatory; marketing is optional.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConsentRecord {
    pub accepted_terms: bool,
    pub accepted_privacy: bool,
    pub marketing_opt_in: bool,
    pub recorded_at: DateTime<Utc>,
}

/// A submitted order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    pub id: Uuid,
    pub selection: Selection,
    /// Server-side recomputed quote; client prices are never trusted
    pub quote: Quote,
    pub customer: CustomerDetails,
    pub consents: ConsentRecord,
    pub created_at: DateTime<Utc>,
}
