//! HTTP routes
//!
//! One module per resource; handlers stay thin and delegate to the core
//! services held by [`AppContext`](crate::AppContext).

use std::sync::Arc;

use axum::routing::{get, post};
use axum::Router;
use chrono::{DateTime, Utc};
use glasline_core::promotions::PromoCodeOutcome;
use glasline_domain::types::promotion::AppliedPromoCode;

use crate::AppContext;

pub mod availability;
pub mod catalog;
pub mod health;
pub mod orders;
pub mod promo_code;
pub mod quote;
pub mod session;

/// Build the API router over the application context.
pub fn router(ctx: Arc<AppContext>) -> Router {
    Router::new()
        .route("/api/health", get(health::health))
        .route("/api/availability", post(availability::check))
        .route("/api/tariffs", get(catalog::list_tariffs))
        .route("/api/routers", get(catalog::list_routers))
        .route("/api/quote", post(quote::build))
        .route("/api/promo-code", post(promo_code::redeem))
        .route("/api/session", post(session::login))
        .route("/api/orders", post(orders::submit))
        .with_state(ctx)
}

/// Resolve a raw promo code into its price effects, if redeemable.
///
/// Anything other than an available code (unknown, inactive, expired,
/// customer number missing) contributes no discount.
pub(crate) async fn resolve_promo_code(
    ctx: &AppContext,
    code: Option<&str>,
    customer_number: Option<&str>,
    now: DateTime<Utc>,
) -> Option<AppliedPromoCode> {
    let code = code?;
    match ctx.promotions.redeem_code(code, customer_number, now).await {
        PromoCodeOutcome::Available { promo, .. } => Some(promo),
        _ => None,
    }
}
