//! Promo code validation endpoint

use std::sync::Arc;

use axum::extract::State;
use axum::Json;
use chrono::Utc;
use glasline_core::promotions::{PromoCodeOutcome, PromoCodeRejection};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::ApiError;
use crate::AppContext;

#[derive(Debug, Deserialize)]
pub struct PromoCodeRequest {
    pub code: String,
    pub customer_number: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "snake_case", tag = "status")]
pub enum PromoCodeResponse {
    /// The code is redeemable right now
    Available {
        router_discount: Decimal,
        waives_setup_fee: bool,
        message: Option<String>,
    },
    /// The code exists but cannot currently be redeemed
    Unavailable { reason: String, message: Option<String> },
    /// No promotion carries this code
    Unknown,
}

/// Validate a manually entered promo code.
pub async fn redeem(
    State(ctx): State<Arc<AppContext>>,
    Json(request): Json<PromoCodeRequest>,
) -> Result<Json<PromoCodeResponse>, ApiError> {
    let outcome = ctx
        .promotions
        .redeem_code(&request.code, request.customer_number.as_deref(), Utc::now())
        .await;

    let response = match outcome {
        PromoCodeOutcome::Available { promo, message } => PromoCodeResponse::Available {
            router_discount: promo.router_discount,
            waives_setup_fee: promo.waives_setup_fee,
            message,
        },
        PromoCodeOutcome::Unavailable { reason, message } => PromoCodeResponse::Unavailable {
            reason: rejection_label(reason).to_string(),
            message,
        },
        PromoCodeOutcome::Unknown => PromoCodeResponse::Unknown,
    };

    Ok(Json(response))
}

fn rejection_label(reason: PromoCodeRejection) -> &'static str {
    match reason {
        PromoCodeRejection::Inactive => "inactive",
        PromoCodeRejection::OutsideWindow => "outside_window",
        PromoCodeRejection::CustomerNumberRequired => "customer_number_required",
    }
}
