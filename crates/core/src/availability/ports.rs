//! Port interfaces for the address store

use async_trait::async_trait;
use glasline_domain::types::building::{AddressQuery, Building};
use glasline_domain::Result;

/// Repository for building/address reads.
#[async_trait]
pub trait BuildingStore: Send + Sync {
    /// Find the building at the given address, if known.
    async fn find_by_address(&self, query: &AddressQuery) -> Result<Option<Building>>;

    /// Load a building by its id.
    async fn building_by_id(&self, id: &str) -> Result<Option<Building>>;
}
