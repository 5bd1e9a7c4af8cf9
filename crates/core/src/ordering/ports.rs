//! Port interfaces for the ordering flow

use async_trait::async_trait;
use glasline_domain::types::catalog::{RouterOption, Tariff};
use glasline_domain::types::order::Order;
use glasline_domain::Result;
use uuid::Uuid;

/// Repository for tariff and router catalog reads.
#[async_trait]
pub trait CatalogStore: Send + Sync {
    /// All tariffs in display order.
    async fn list_tariffs(&self) -> Result<Vec<Tariff>>;

    /// Find a tariff by its slug.
    async fn tariff_by_slug(&self, slug: &str) -> Result<Option<Tariff>>;

    /// All router add-ons.
    async fn list_routers(&self) -> Result<Vec<RouterOption>>;

    /// Find a router add-on by its slug.
    async fn router_by_slug(&self, slug: &str) -> Result<Option<RouterOption>>;
}

/// Repository for submitted orders.
#[async_trait]
pub trait OrderStore: Send + Sync {
    /// Persist a new order.
    async fn insert_order(&self, order: &Order) -> Result<()>;

    /// Load an order by id.
    async fn order_by_id(&self, id: Uuid) -> Result<Option<Order>>;
}

/// Decision returned by the rate-limit collaborator.
#[derive(Debug, Clone)]
pub struct RateLimitDecision {
    pub allowed: bool,
    /// Attempts remaining in the current window, where reported
    pub remaining: Option<u32>,
    /// Seconds until the window resets, where reported
    pub retry_after_seconds: Option<u64>,
}

impl RateLimitDecision {
    /// The fail-open decision: allowed, with no window information.
    pub fn allow() -> Self {
        Self { allowed: true, remaining: None, retry_after_seconds: None }
    }
}

/// Gate in front of the login and order-submission flows.
///
/// Implemented by the external rate-limit collaborator's client. The core
/// services never call this themselves; the API layer consults it before
/// invoking them. Implementations fail open: a transport error is reported
/// as allowed.
#[async_trait]
pub trait RateLimitGate: Send + Sync {
    /// Ask the collaborator whether the tagged action may proceed.
    async fn check(&self, action: &str) -> RateLimitDecision;
}
