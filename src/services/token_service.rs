//! Token service - Issues and verifies signed, time-limited identity tokens.
//!
//! Tokens are HMAC-signed JWTs carrying the user id as `sub`. Nothing is stored
//! server-side, so a token stays valid until it expires.

use chrono::{Duration, Utc};
use jsonwebtoken::{
    decode, encode, errors::ErrorKind, DecodingKey, EncodingKey, Header, Validation,
};
use serde::{Deserialize, Serialize};

use crate::config::{Config, SECONDS_PER_MINUTE};
use crate::errors::{AppError, AppResult, AuthError};

/// JWT claims payload
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub exp: i64,
    pub iat: i64,
}

/// Signs and checks access tokens with the process-wide key.
///
/// Built once at startup from [`Config`] and shared read-only afterwards.
#[derive(Clone)]
pub struct TokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    header: Header,
    validation: Validation,
    ttl_minutes: i64,
}

impl TokenService {
    pub fn new(config: &Config) -> Self {
        let mut validation = Validation::new(config.algorithm);
        validation.leeway = 0;

        Self {
            encoding_key: EncodingKey::from_secret(config.secret_key_bytes()),
            decoding_key: DecodingKey::from_secret(config.secret_key_bytes()),
            header: Header::new(config.algorithm),
            validation,
            ttl_minutes: config.access_token_expire_minutes,
        }
    }

    /// Token lifetime in seconds
    pub fn ttl_seconds(&self) -> i64 {
        self.ttl_minutes.saturating_mul(SECONDS_PER_MINUTE)
    }

    /// Issue a token for `subject` expiring one TTL from now.
    pub fn issue(&self, subject: i32) -> AppResult<String> {
        let now = Utc::now();
        let expires_at = Duration::try_minutes(self.ttl_minutes)
            .and_then(|ttl| now.checked_add_signed(ttl))
            .ok_or_else(|| {
                AppError::internal(format!("Token lifetime out of range: {} minutes", self.ttl_minutes))
            })?;

        let claims = Claims {
            sub: subject.to_string(),
            exp: expires_at.timestamp(),
            iat: now.timestamp(),
        };

        encode(&self.header, &claims, &self.encoding_key)
            .map_err(|e| AppError::internal(format!("Token signing failed: {}", e)))
    }

    /// Check signature and expiry, returning the subject.
    pub fn verify(&self, token: &str) -> Result<i32, AuthError> {
        let data = decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map_err(|e| classify(e.kind()))?;

        data.claims.sub.parse().map_err(|_| AuthError::Malformed)
    }
}

fn classify(kind: &ErrorKind) -> AuthError {
    match kind {
        ErrorKind::ExpiredSignature => AuthError::Expired,
        ErrorKind::InvalidSignature | ErrorKind::InvalidAlgorithm => AuthError::InvalidSignature,
        _ => AuthError::Malformed,
    }
}
