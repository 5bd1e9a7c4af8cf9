//! HTTP client for the rate-limit endpoint
//!
//! The collaborator answers `{allowed, remaining?, remaining_seconds?}` for
//! an action tag. The gate fails open: any transport error, non-success
//! status, or unparsable body is reported as allowed, with a warning logged.

use std::time::Duration;

use async_trait::async_trait;
use glasline_core::ordering::ports::{RateLimitDecision, RateLimitGate};
use serde::Deserialize;
use tracing::{debug, warn};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(5);

/// Wire format of the collaborator's answer.
#[derive(Debug, Deserialize)]
struct RateLimitResponse {
    allowed: bool,
    remaining: Option<u32>,
    remaining_seconds: Option<u64>,
}

/// HTTP client for the external rate-limit endpoint.
///
/// Constructed with `None` the gate is disabled and every check allows.
pub struct RateLimitClient {
    http: reqwest::Client,
    endpoint: Option<String>,
}

impl RateLimitClient {
    /// Create a new client for the given endpoint.
    pub fn new(endpoint: Option<String>) -> Self {
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .unwrap_or_default();
        Self { http, endpoint }
    }

    async fn ask(&self, endpoint: &str, action: &str) -> Result<RateLimitDecision, reqwest::Error> {
        let response = self
            .http
            .post(endpoint)
            .json(&serde_json::json!({ "action": action }))
            .send()
            .await?
            .error_for_status()?;

        let body: RateLimitResponse = response.json().await?;
        debug!(
            action,
            allowed = body.allowed,
            remaining = ?body.remaining,
            "rate limit decision received"
        );
        Ok(RateLimitDecision {
            allowed: body.allowed,
            remaining: body.remaining,
            retry_after_seconds: body.remaining_seconds,
        })
    }
}

#[async_trait]
impl RateLimitGate for RateLimitClient {
    async fn check(&self, action: &str) -> RateLimitDecision {
        let Some(endpoint) = self.endpoint.as_deref() else {
            return RateLimitDecision::allow();
        };

        match self.ask(endpoint, action).await {
            Ok(decision) => decision,
            Err(err) => {
                warn!(action, error = %err, "rate limit check failed; failing open");
                RateLimitDecision::allow()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use wiremock::matchers::{body_partial_json, method};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    #[tokio::test]
    async fn disabled_gate_always_allows() {
        let client = RateLimitClient::new(None);

        let decision = client.check("login").await;
        assert!(decision.allowed);
    }

    #[tokio::test]
    async fn denied_response_is_passed_through() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(body_partial_json(serde_json::json!({ "action": "login" })))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "allowed": false,
                "remaining": 0,
                "remaining_seconds": 42
            })))
            .mount(&server)
            .await;

        let client = RateLimitClient::new(Some(server.uri()));
        let decision = client.check("login").await;

        assert!(!decision.allowed);
        assert_eq!(decision.remaining, Some(0));
        assert_eq!(decision.retry_after_seconds, Some(42));
    }

    #[tokio::test]
    async fn allowed_response_is_passed_through() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "allowed": true,
                "remaining": 4
            })))
            .mount(&server)
            .await;

        let client = RateLimitClient::new(Some(server.uri()));
        let decision = client.check("order_submit").await;

        assert!(decision.allowed);
        assert_eq!(decision.remaining, Some(4));
        assert!(decision.retry_after_seconds.is_none());
    }

    #[tokio::test]
    async fn server_error_fails_open() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let client = RateLimitClient::new(Some(server.uri()));
        let decision = client.check("login").await;

        assert!(decision.allowed);
    }

    #[tokio::test]
    async fn malformed_body_fails_open() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
            .mount(&server)
            .await;

        let client = RateLimitClient::new(Some(server.uri()));
        let decision = client.check("login").await;

        assert!(decision.allowed);
    }
}
