//! Order submission endpoint

use std::sync::Arc;

use axum::extract::State;
use axum::http::header::AUTHORIZATION;
use axum::http::HeaderMap;
use axum::Json;
use chrono::Utc;
use glasline_core::ordering::OrderRequest;
use glasline_domain::constants::RATE_LIMIT_ACTION_ORDER;
use glasline_domain::types::order::{CustomerDetails, Selection};
use serde::{Deserialize, Serialize};
use tracing::warn;
use uuid::Uuid;

use super::resolve_promo_code;
use crate::error::ApiError;
use crate::AppContext;

#[derive(Debug, Deserialize)]
pub struct OrderSubmission {
    pub tariff_slug: String,
    pub building_id: Option<String>,
    pub router_slug: Option<String>,
    /// Raw promo code as typed by the user
    pub promo_code: Option<String>,
    pub customer: CustomerDetails,
    pub accepted_terms: bool,
    pub accepted_privacy: bool,
    #[serde(default)]
    pub marketing_opt_in: bool,
}

#[derive(Debug, Serialize)]
pub struct OrderResponse {
    pub order_id: Uuid,
}

/// Submit an order.
///
/// Requires a valid session token from the password gate and clearance from
/// the rate-limit collaborator. The quote is recomputed server-side from the
/// selection; the request body carries no prices.
pub async fn submit(
    State(ctx): State<Arc<AppContext>>,
    headers: HeaderMap,
    Json(submission): Json<OrderSubmission>,
) -> Result<Json<OrderResponse>, ApiError> {
    let now = Utc::now();

    let token = bearer_token(&headers)
        .ok_or_else(|| ApiError::Unauthorized("missing session token".into()))?;
    ctx.sessions
        .verify(token, now)
        .map_err(|e| ApiError::Unauthorized(e.to_string()))?;

    let decision = ctx.rate_limiter.check(RATE_LIMIT_ACTION_ORDER).await;
    if !decision.allowed {
        warn!("order submission rate limited");
        return Err(ApiError::RateLimited {
            retry_after_seconds: decision.retry_after_seconds,
        });
    }

    let promo_code = resolve_promo_code(
        &ctx,
        submission.promo_code.as_deref(),
        submission.customer.customer_number.as_deref(),
        now,
    )
    .await;

    let request = OrderRequest {
        selection: Selection {
            tariff_slug: Some(submission.tariff_slug),
            building_id: submission.building_id,
            router_slug: submission.router_slug,
            promo_code,
        },
        customer: submission.customer,
        accepted_terms: submission.accepted_terms,
        accepted_privacy: submission.accepted_privacy,
        marketing_opt_in: submission.marketing_opt_in,
    };

    let order = ctx.orders.submit(request, now).await?;
    Ok(Json(OrderResponse { order_id: order.id }))
}

fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
}
