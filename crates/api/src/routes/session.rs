//! Password gate endpoint

use std::sync::Arc;

use axum::extract::State;
use axum::Json;
use chrono::Utc;
use glasline_common::auth::password_matches;
use glasline_domain::constants::RATE_LIMIT_ACTION_LOGIN;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::error::ApiError;
use crate::AppContext;

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub token: String,
    /// Unix timestamp (seconds) the token expires at
    pub expires_at: i64,
}

/// Exchange the gate password for a signed session token.
///
/// Login attempts go through the rate-limit gate before the password is
/// even looked at.
pub async fn login(
    State(ctx): State<Arc<AppContext>>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, ApiError> {
    let decision = ctx.rate_limiter.check(RATE_LIMIT_ACTION_LOGIN).await;
    if !decision.allowed {
        warn!("login attempt rate limited");
        return Err(ApiError::RateLimited {
            retry_after_seconds: decision.retry_after_seconds,
        });
    }

    if !password_matches(&request.password, &ctx.config.session.password) {
        return Err(ApiError::Unauthorized("wrong password".into()));
    }

    let now = Utc::now();
    let token = ctx.sessions.issue(now);
    let expires_at = now.timestamp() + ctx.config.session.ttl_seconds;

    info!("order flow unlocked");
    Ok(Json(LoginResponse { token, expires_at }))
}
