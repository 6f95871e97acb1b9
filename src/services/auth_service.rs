//! Authentication service - Registration and login.
//!
//! Password hashing lives in the domain `Password` value object and token
//! signing in `TokenService`; this service only orchestrates them.

use async_trait::async_trait;
use once_cell::sync::Lazy;
use serde::Serialize;
use std::sync::Arc;
use utoipa::ToSchema;

use super::TokenService;
use crate::config::TOKEN_TYPE_BEARER;
use crate::domain::{Password, User};
use crate::errors::{AppResult, AuthError};
use crate::infra::UnitOfWork;

/// Real Argon2 digest checked when the email is unknown, so a miss costs as
/// much as a wrong password.
static DUMMY_DIGEST: Lazy<Password> = Lazy::new(|| {
    Password::new("dummy-password-for-timing-equalization").unwrap_or_else(|e| {
        tracing::error!("Failed to prepare dummy digest: {}", e);
        Password::from_hash(String::new())
    })
});

/// Token response returned after successful authentication
#[derive(Debug, Serialize, ToSchema)]
pub struct TokenResponse {
    /// Signed access token
    #[schema(example = "eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9...")]
    pub access_token: String,
    /// Token type (always "bearer")
    #[schema(example = "bearer")]
    pub token_type: String,
    /// Token lifetime in seconds
    #[schema(example = 3600)]
    pub expires_in: i64,
}

/// Authentication service trait for dependency injection.
#[async_trait]
pub trait AuthService: Send + Sync {
    /// Register a new user
    async fn register(&self, email: String, password: String) -> AppResult<User>;

    /// Login and return an access token
    async fn login(&self, email: String, password: String) -> AppResult<TokenResponse>;
}

/// Concrete implementation of AuthService using Unit of Work.
pub struct Authenticator<U: UnitOfWork> {
    uow: Arc<U>,
    tokens: Arc<TokenService>,
}

impl<U: UnitOfWork> Authenticator<U> {
    /// Create new auth service instance with Unit of Work
    pub fn new(uow: Arc<U>, tokens: Arc<TokenService>) -> Self {
        Self { uow, tokens }
    }
}

#[async_trait]
impl<U: UnitOfWork> AuthService for Authenticator<U> {
    async fn register(&self, email: String, password: String) -> AppResult<User> {
        if self.uow.users().find_by_email(&email).await?.is_some() {
            return Err(AuthError::DuplicateEmail.into());
        }

        let hashed_password = Password::new(&password)?.into_string();
        let user = self.uow.users().insert(email, hashed_password).await?;

        tracing::info!(user_id = user.id, "User registered");
        Ok(user)
    }

    async fn login(&self, email: String, password: String) -> AppResult<TokenResponse> {
        let user = self.uow.users().find_by_email(&email).await?;

        let stored = match &user {
            Some(user) => Password::from_hash(user.hashed_password.clone()),
            None => DUMMY_DIGEST.clone(),
        };
        let password_valid = stored.verify(&password);

        // Unknown email and wrong password are deliberately the same error
        let user = match user {
            Some(user) if password_valid => user,
            _ => return Err(AuthError::InvalidCredentials.into()),
        };

        let access_token = self.tokens.issue(user.id)?;
        tracing::info!(user_id = user.id, "User logged in");

        Ok(TokenResponse {
            access_token,
            token_type: TOKEN_TYPE_BEARER.to_string(),
            expires_in: self.tokens.ttl_seconds(),
        })
    }
}
