//! Catalog types: tariffs and router add-ons

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::building::Infrastructure;

/// A bookable internet tariff.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tariff {
    pub id: String,
    /// Stable slug used for promotion targeting, e.g. `einfach-100`
    pub slug: String,
    pub name: String,
    pub monthly_price: Decimal,
    /// One-time setup fee; promotions may waive it
    pub setup_fee: Decimal,
    pub downstream_mbps: u32,
    pub upstream_mbps: u32,
    /// Infrastructure type the tariff requires at the building
    pub infrastructure: Infrastructure,
    /// Display ordering in the tariff selection
    pub sort_order: i64,
}

/// A rentable router add-on.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RouterOption {
    pub id: String,
    pub slug: String,
    pub name: String,
    /// Monthly rental price before promotion discounts
    pub monthly_price: Decimal,
}
