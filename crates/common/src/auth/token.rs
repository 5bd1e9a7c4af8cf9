//! Signed session token issuing and verification
//!
//! Token layout: `v1.<generation>.<expires_at>.<nonce>.<mac>` where the MAC
//! is a blake3 keyed hash over everything before it. The MAC key is derived
//! from the configured secret, so a secret rotation rejects old tokens with
//! a signature failure, and a generation bump rejects them explicitly.

use chrono::{DateTime, Utc};
use thiserror::Error;

/// Domain-separation context for the token MAC key derivation.
const KEY_CONTEXT: &str = "glasline 2025-06-01 session token mac key";

/// Token format version.
const TOKEN_VERSION: &str = "v1";

/// Error type for session token verification
#[derive(Error, Debug, PartialEq, Eq)]
pub enum SessionError {
    /// Token does not have the expected shape
    #[error("session token is malformed")]
    Malformed,

    /// MAC verification failed (wrong or rotated secret, or tampering)
    #[error("session token signature is invalid")]
    BadSignature,

    /// Token was issued under an older generation
    #[error("session token generation has been revoked")]
    Revoked,

    /// Token expiry timestamp is in the past
    #[error("session token has expired")]
    Expired,
}

/// Claims carried by a verified session token
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionClaims {
    /// Generation the token was issued under
    pub generation: u32,
    /// Unix timestamp (seconds) after which the token is rejected
    pub expires_at: i64,
}

/// Issues and verifies password-gate session tokens.
pub struct SessionSigner {
    key: [u8; 32],
    generation: u32,
    ttl_seconds: i64,
}

impl SessionSigner {
    /// Create a signer from the configured secret, generation, and lifetime.
    pub fn new(secret: &str, generation: u32, ttl_seconds: i64) -> Self {
        let key = blake3::derive_key(KEY_CONTEXT, secret.as_bytes());
        Self { key, generation, ttl_seconds }
    }

    /// Issue a fresh token valid for the configured lifetime from `now`.
    pub fn issue(&self, now: DateTime<Utc>) -> String {
        let expires_at = now.timestamp() + self.ttl_seconds;
        let nonce: [u8; 8] = rand::random();
        let payload = format!(
            "{TOKEN_VERSION}.{}.{expires_at}.{}",
            self.generation,
            hex::encode(nonce)
        );
        let mac = blake3::keyed_hash(&self.key, payload.as_bytes());
        format!("{payload}.{}", mac.to_hex())
    }

    /// Verify a token against the signer's key, generation, and `now`.
    ///
    /// The MAC is checked before anything in the payload is trusted; the
    /// comparison is constant-time.
    pub fn verify(&self, token: &str, now: DateTime<Utc>) -> Result<SessionClaims, SessionError> {
        let (payload, mac_hex) = token.rsplit_once('.').ok_or(SessionError::Malformed)?;

        let presented =
            blake3::Hash::from_hex(mac_hex).map_err(|_| SessionError::Malformed)?;
        let expected = blake3::keyed_hash(&self.key, payload.as_bytes());
        // blake3::Hash equality is constant-time
        if presented != expected {
            return Err(SessionError::BadSignature);
        }

        let mut parts = payload.split('.');
        let version = parts.next().ok_or(SessionError::Malformed)?;
        let generation: u32 = parts
            .next()
            .and_then(|p| p.parse().ok())
            .ok_or(SessionError::Malformed)?;
        let expires_at: i64 = parts
            .next()
            .and_then(|p| p.parse().ok())
            .ok_or(SessionError::Malformed)?;

        if version != TOKEN_VERSION {
            return Err(SessionError::Malformed);
        }
        if generation != self.generation {
            return Err(SessionError::Revoked);
        }
        if now.timestamp() > expires_at {
            return Err(SessionError::Expired);
        }

        Ok(SessionClaims { generation, expires_at })
    }
}

/// Constant-time equality check for the gate password itself.
///
/// Both sides are hashed first so the comparison never leaks length or
/// prefix information about the configured password.
pub fn password_matches(presented: &str, configured: &str) -> bool {
    blake3::hash(presented.as_bytes()) == blake3::hash(configured.as_bytes())
}
