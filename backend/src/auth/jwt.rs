//! JWT token generation and validation
//!
//! Issues and decodes HS256-signed bearer tokens with pre-computed keys.
//! Decoding deliberately collapses every failure mode (bad signature,
//! malformed structure, expired) into a single opaque error so callers
//! cannot tell which check rejected a token.

use anyhow::Result;
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use thiserror::Error;

/// JWT claims
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (user ID, stringified)
    pub sub: String,
    /// Expiration time (Unix timestamp)
    pub exp: i64,
    /// Issued at (Unix timestamp)
    pub iat: i64,
}

/// Opaque token validation failure
#[derive(Debug, Error)]
pub enum TokenError {
    #[error("invalid token")]
    Invalid,
}

/// Pre-computed JWT keys for efficient token operations
/// These are expensive to create, so we cache them in AppState
#[derive(Clone)]
pub struct TokenKeys {
    encoding: Arc<EncodingKey>,
    decoding: Arc<DecodingKey>,
}

impl TokenKeys {
    /// Create new JWT keys from secret
    /// This should be called once at startup
    pub fn new(secret: &str) -> Self {
        Self {
            encoding: Arc::new(EncodingKey::from_secret(secret.as_bytes())),
            decoding: Arc::new(DecodingKey::from_secret(secret.as_bytes())),
        }
    }
}

/// Token service for issuing and validating bearer tokens
///
/// Uses pre-computed keys to avoid key derivation on every request.
/// Keys are wrapped in Arc for cheap cloning. Call `new` once at
/// application startup and store in AppState; do not create per-request.
#[derive(Clone)]
pub struct TokenService {
    keys: TokenKeys,
    ttl_secs: i64,
}

impl TokenService {
    /// Create a new token service with pre-computed keys
    pub fn new(secret: &str, ttl_secs: i64) -> Self {
        Self {
            keys: TokenKeys::new(secret),
            ttl_secs,
        }
    }

    /// Issue a bearer token for a user, expiring after the configured TTL
    #[inline]
    pub fn issue(&self, user_id: i64) -> Result<String> {
        self.issue_with_ttl(user_id, self.ttl_secs)
    }

    fn issue_with_ttl(&self, user_id: i64, ttl_secs: i64) -> Result<String> {
        let now = Utc::now();
        let exp = now + Duration::seconds(ttl_secs);

        let claims = Claims {
            sub: user_id.to_string(),
            exp: exp.timestamp(),
            iat: now.timestamp(),
        };

        encode(&Header::default(), &claims, &self.keys.encoding)
            .map_err(|e| anyhow::anyhow!("Failed to issue token: {}", e))
    }

    /// Decode and validate a token, returning its claims
    ///
    /// The signature is verified before any embedded field is trusted;
    /// expiry is checked with zero leeway.
    #[inline]
    pub fn decode(&self, token: &str) -> Result<Claims, TokenError> {
        let mut validation = Validation::default();
        validation.leeway = 0;

        decode::<Claims>(token, &self.keys.decoding, &validation)
            .map(|data| data.claims)
            .map_err(|_| TokenError::Invalid)
    }

    /// Configured token lifetime in seconds
    #[inline]
    pub fn ttl_secs(&self) -> i64 {
        self.ttl_secs
    }
}
