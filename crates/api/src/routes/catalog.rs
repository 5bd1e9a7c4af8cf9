//! Catalog endpoints

use std::sync::Arc;

use axum::extract::State;
use axum::Json;
use glasline_domain::types::catalog::{RouterOption, Tariff};

use crate::error::ApiError;
use crate::AppContext;

/// All tariffs in display order.
pub async fn list_tariffs(
    State(ctx): State<Arc<AppContext>>,
) -> Result<Json<Vec<Tariff>>, ApiError> {
    let tariffs = ctx.catalog.list_tariffs().await?;
    Ok(Json(tariffs))
}

/// All router add-ons.
pub async fn list_routers(
    State(ctx): State<Arc<AppContext>>,
) -> Result<Json<Vec<RouterOption>>, ApiError> {
    let routers = ctx.catalog.list_routers().await?;
    Ok(Json(routers))
}
