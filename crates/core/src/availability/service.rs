//! Availability check over the address store

use std::sync::Arc;

use glasline_domain::types::building::{AddressQuery, Building};
use glasline_domain::types::catalog::Tariff;
use glasline_domain::Result;
use tracing::debug;

use super::ports::BuildingStore;
use crate::ordering::ports::CatalogStore;

/// Result of an availability check.
///
/// An unknown or non-serviceable address is a regular negative answer, not
/// an error.
#[derive(Debug, Clone)]
pub struct AvailabilityResult {
    pub available: bool,
    pub building: Option<Building>,
    /// Tariffs bookable at the building's infrastructure
    pub tariffs: Vec<Tariff>,
}

impl AvailabilityResult {
    fn unavailable() -> Self {
        Self { available: false, building: None, tariffs: Vec::new() }
    }
}

/// Answers "can I get fiber at this address, and which tariffs?".
pub struct AvailabilityService {
    buildings: Arc<dyn BuildingStore>,
    catalog: Arc<dyn CatalogStore>,
}

impl AvailabilityService {
    /// Create a new availability service.
    pub fn new(buildings: Arc<dyn BuildingStore>, catalog: Arc<dyn CatalogStore>) -> Self {
        Self { buildings, catalog }
    }

    /// Check availability for an address.
    pub async fn check(&self, query: &AddressQuery) -> Result<AvailabilityResult> {
        let Some(building) = self.buildings.find_by_address(query).await? else {
            debug!(
                postal_code = %query.postal_code,
                street = %query.street,
                "address not found in building store"
            );
            return Ok(AvailabilityResult::unavailable());
        };

        if !building.serviceable {
            return Ok(AvailabilityResult {
                available: false,
                building: Some(building),
                tariffs: Vec::new(),
            });
        }

        let tariffs: Vec<Tariff> = self
            .catalog
            .list_tariffs()
            .await?
            .into_iter()
            .filter(|t| t.infrastructure == building.infrastructure)
            .collect();

        Ok(AvailabilityResult { available: true, building: Some(building), tariffs })
    }
}
