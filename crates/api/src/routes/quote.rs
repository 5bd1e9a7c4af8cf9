//! Quote endpoint

use std::sync::Arc;

use axum::extract::State;
use axum::Json;
use chrono::Utc;
use glasline_domain::types::order::{Quote, Selection};
use serde::Deserialize;

use super::resolve_promo_code;
use crate::error::ApiError;
use crate::AppContext;

#[derive(Debug, Deserialize)]
pub struct QuoteRequest {
    pub tariff_slug: String,
    pub building_id: Option<String>,
    pub router_slug: Option<String>,
    /// Raw promo code as typed by the user
    pub promo_code: Option<String>,
    /// Customer number, needed by some promo codes
    pub customer_number: Option<String>,
}

/// Compute the price breakdown for the current selection.
///
/// A promo code that is unknown or not currently redeemable simply does not
/// contribute a discount; clients surface that through the promo-code
/// endpoint, not here.
pub async fn build(
    State(ctx): State<Arc<AppContext>>,
    Json(request): Json<QuoteRequest>,
) -> Result<Json<Quote>, ApiError> {
    let now = Utc::now();

    let promo_code = resolve_promo_code(
        &ctx,
        request.promo_code.as_deref(),
        request.customer_number.as_deref(),
        now,
    )
    .await;

    let selection = Selection {
        tariff_slug: Some(request.tariff_slug),
        building_id: request.building_id,
        router_slug: request.router_slug,
        promo_code,
    };

    let quote = ctx.quotes.build_quote(&selection, now).await?;
    Ok(Json(quote))
}
