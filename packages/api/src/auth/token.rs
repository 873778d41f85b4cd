//! # Signed session credentials
//!
//! A credential is `base64url(claims) "." base64url(HMAC-SHA256(secret, claims))`,
//! where `claims` is the JSON `{"sub": <account id>, "exp": <unix seconds>}`.
//! Nothing is stored server-side; a token is valid exactly when its signature checks
//! out and `exp` is still in the future. There is no revocation list, so a leaked
//! token stays usable until it expires.

use std::fmt;

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine as _;
use chrono::{DateTime, Duration, Utc};
use hmac::{Hmac, Mac};
use serde::{Deserialize, Serialize};
use sha2::Sha256;
use thiserror::Error;
use uuid::Uuid;

type HmacSha256 = Hmac<Sha256>;

/// Lifetime of an issued credential.
pub const SESSION_TTL_DAYS: i64 = 7;

#[derive(Debug, Error)]
pub enum TokenError {
    #[error("signing secret must not be empty")]
    EmptySecret,

    #[error("malformed token")]
    Malformed,

    #[error("token signature mismatch")]
    BadSignature,

    #[error("token expired")]
    Expired,

    #[error("failed to encode claims: {0}")]
    Encode(#[from] serde_json::Error),
}

/// What a credential asserts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Claims {
    /// Account id.
    pub sub: Uuid,
    /// Expiry, Unix seconds.
    pub exp: i64,
}

/// Issues and verifies credentials with a single HMAC key.
#[derive(Clone)]
pub struct TokenSigner {
    mac: HmacSha256,
    ttl: Duration,
}

impl fmt::Debug for TokenSigner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenSigner")
            .field("ttl", &self.ttl)
            .finish_non_exhaustive()
    }
}

impl TokenSigner {
    /// Signer with the default seven-day lifetime.
    pub fn new(secret: &str) -> Result<Self, TokenError> {
        Self::with_ttl(secret, Duration::days(SESSION_TTL_DAYS))
    }

    pub fn with_ttl(secret: &str, ttl: Duration) -> Result<Self, TokenError> {
        if secret.is_empty() {
            return Err(TokenError::EmptySecret);
        }
        let mac = HmacSha256::new_from_slice(secret.as_bytes())
            .map_err(|_| TokenError::EmptySecret)?;
        Ok(Self { mac, ttl })
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    pub fn issue(&self, account_id: Uuid) -> Result<String, TokenError> {
        self.issue_at(account_id, Utc::now())
    }

    pub fn issue_at(&self, account_id: Uuid, now: DateTime<Utc>) -> Result<String, TokenError> {
        let claims = Claims {
            sub: account_id,
            exp: (now + self.ttl).timestamp(),
        };
        let payload = URL_SAFE_NO_PAD.encode(serde_json::to_vec(&claims)?);
        let signature = URL_SAFE_NO_PAD.encode(self.sign(payload.as_bytes()));
        Ok(format!("{payload}.{signature}"))
    }

    pub fn verify(&self, token: &str) -> Result<Claims, TokenError> {
        self.verify_at(token, Utc::now())
    }

    pub fn verify_at(&self, token: &str, now: DateTime<Utc>) -> Result<Claims, TokenError> {
        let (payload, signature) = token.split_once('.').ok_or(TokenError::Malformed)?;
        let signature = URL_SAFE_NO_PAD
            .decode(signature)
            .map_err(|_| TokenError::Malformed)?;

        let mut mac = self.mac.clone();
        mac.update(payload.as_bytes());
        mac.verify_slice(&signature)
            .map_err(|_| TokenError::BadSignature)?;

        let raw = URL_SAFE_NO_PAD
            .decode(payload)
            .map_err(|_| TokenError::Malformed)?;
        let claims: Claims = serde_json::from_slice(&raw).map_err(|_| TokenError::Malformed)?;

        if claims.exp <= now.timestamp() {
            return Err(TokenError::Expired);
        }
        Ok(claims)
    }

    fn sign(&self, payload: &[u8]) -> Vec<u8> {
        let mut mac = self.mac.clone();
        mac.update(payload);
        mac.finalize().into_bytes().to_vec()
    }
}
