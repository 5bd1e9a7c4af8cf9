//! Address availability check

use std::sync::Arc;

use axum::extract::State;
use axum::Json;
use glasline_domain::types::building::{AddressQuery, Infrastructure};
use glasline_domain::types::catalog::Tariff;
use serde::{Deserialize, Serialize};

use crate::error::ApiError;
use crate::AppContext;

#[derive(Debug, Deserialize)]
pub struct AvailabilityRequest {
    pub street: String,
    pub house_number: String,
    pub postal_code: String,
    pub city: String,
}

#[derive(Debug, Serialize)]
pub struct AvailabilityResponse {
    pub available: bool,
    pub building_id: Option<String>,
    pub infrastructure: Option<Infrastructure>,
    /// Tariffs bookable at this address; empty when not available
    pub tariffs: Vec<Tariff>,
}

/// Check whether fiber is available at an address.
///
/// An unknown address is a regular `available: false` answer, never an
/// error.
pub async fn check(
    State(ctx): State<Arc<AppContext>>,
    Json(request): Json<AvailabilityRequest>,
) -> Result<Json<AvailabilityResponse>, ApiError> {
    let query = AddressQuery {
        street: request.street,
        house_number: request.house_number,
        postal_code: request.postal_code,
        city: request.city,
    };

    let result = ctx.availability.check(&query).await?;

    Ok(Json(AvailabilityResponse {
        available: result.available,
        building_id: result.building.as_ref().map(|b| b.id.clone()),
        infrastructure: result.building.as_ref().map(|b| b.infrastructure),
        tariffs: result.tariffs,
    }))
}
