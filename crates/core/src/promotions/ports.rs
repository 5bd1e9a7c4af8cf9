//! Port interfaces for promotion data access

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use glasline_domain::types::promotion::Discount;
use glasline_domain::Result;
use uuid::Uuid;

/// A promotion row as the store returns it, before its discounts, building
/// associations, and target slugs have been attached.
#[derive(Debug, Clone)]
pub struct PromotionRecord {
    pub id: Uuid,
    pub name: String,
    pub code: Option<String>,
    pub description: Option<String>,
    pub is_global: bool,
    pub is_active: bool,
    pub starts_at: Option<DateTime<Utc>>,
    pub ends_at: Option<DateTime<Utc>>,
    pub requires_customer_number: bool,
    pub available_text: Option<String>,
    pub unavailable_text: Option<String>,
}

/// Repository for promotion reads.
///
/// Discounts and building associations are separate lookups with no join
/// guarantee; target references carried by discounts are resolved to slugs
/// through the two slug lookups. A slug lookup returning `None` means the
/// reference is unresolvable and the caller drops it silently; an `Err` from
/// any method aborts the whole fetch.
#[async_trait]
pub trait PromotionStore: Send + Sync {
    /// All promotions flagged active, without validity-window filtering.
    async fn list_active(&self) -> Result<Vec<PromotionRecord>>;

    /// Find a promotion by its redemption code, active or not.
    async fn find_by_code(&self, code: &str) -> Result<Option<PromotionRecord>>;

    /// Discounts owned by a promotion.
    async fn discounts_for(&self, promotion_id: Uuid) -> Result<Vec<Discount>>;

    /// Building ids a promotion is restricted to.
    async fn buildings_for(&self, promotion_id: Uuid) -> Result<Vec<String>>;

    /// Resolve a raw tariff reference to its slug.
    async fn tariff_slug(&self, tariff_ref: &str) -> Result<Option<String>>;

    /// Resolve a raw router reference to its slug.
    async fn router_slug(&self, router_ref: &str) -> Result<Option<String>>;
}
