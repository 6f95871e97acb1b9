//! Password value object - Domain layer password handling.
//!
//! Wraps Argon2id digests in PHC string format. Each hash uses a fresh random
//! salt, and verification runs in constant time inside the argon2 crate.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};

use crate::errors::{AppError, AppResult};

/// Password value object that handles hashing and verification.
#[derive(Clone)]
pub struct Password {
    hash: String,
}

// Don't expose hash in debug output
impl std::fmt::Debug for Password {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Password")
            .field("hash", &"[REDACTED]")
            .finish()
    }
}

impl Password {
    /// Create a new password by hashing the plain text.
    ///
    /// Any input is accepted, including empty and very long strings; length
    /// policy belongs to request validation.
    pub fn new(plain_text: &str) -> AppResult<Self> {
        let salt = SaltString::generate(&mut OsRng);
        let hash = Argon2::default()
            .hash_password(plain_text.as_bytes(), &salt)
            .map_err(|e| AppError::internal(format!("Password hash failed: {}", e)))?;

        Ok(Self {
            hash: hash.to_string(),
        })
    }

    /// Create a Password from an existing digest (from database).
    pub fn from_hash(hash: String) -> Self {
        Self { hash }
    }

    /// Get the digest string for storage.
    pub fn as_str(&self) -> &str {
        &self.hash
    }

    /// Consume and return the digest string.
    pub fn into_string(self) -> String {
        self.hash
    }

    /// Verify a plain text password against this digest.
    ///
    /// A digest that cannot be parsed (other scheme, truncated, empty) never
    /// matches.
    pub fn verify(&self, plain_text: &str) -> bool {
        match PasswordHash::new(&self.hash) {
            Ok(parsed) => Argon2::default()
                .verify_password(plain_text.as_bytes(), &parsed)
                .is_ok(),
            Err(e) => {
                tracing::warn!("Stored password digest is malformed: {}", e);
                false
            }
        }
    }
}

impl From<Password> for String {
    fn from(password: Password) -> Self {
        password.hash
    }
}
