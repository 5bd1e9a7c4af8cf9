//! Password-gate session tokens
//!
//! Stateless, MAC-signed tokens with an explicit expiry timestamp and a
//! numeric generation. There is no server-side session store: rotating the
//! signing secret or bumping the generation invalidates every outstanding
//! token at once.

mod token;

pub use token::{password_matches, SessionClaims, SessionError, SessionSigner};
