//! Identity resolver - Turns a request's authorization header into a user.
//!
//! `NoCredential -> CredentialExtracted -> {Authenticated | Rejected}`.
//! Read-only: nothing about the user or the token changes here.

use async_trait::async_trait;
use std::sync::Arc;

use super::TokenService;
use crate::config::BEARER_SCHEME;
use crate::domain::User;
use crate::errors::{AppResult, AuthError};
use crate::infra::UnitOfWork;

/// Resolves the acting user of a request.
#[async_trait]
pub trait IdentityResolver: Send + Sync {
    /// Resolve the raw `Authorization` header value (if any) to a user.
    async fn resolve(&self, authorization: Option<&str>) -> AppResult<User>;
}

/// Extract the token from a `Bearer <token>` header value.
///
/// The scheme is matched case-insensitively; any other scheme counts as no
/// credential at all.
pub fn extract_bearer(authorization: Option<&str>) -> Result<&str, AuthError> {
    let (scheme, token) = authorization
        .and_then(|value| value.trim().split_once(' '))
        .ok_or(AuthError::Missing)?;

    let token = token.trim();
    if !scheme.eq_ignore_ascii_case(BEARER_SCHEME) || token.is_empty() {
        return Err(AuthError::Missing);
    }

    Ok(token)
}

/// Bearer-token implementation backed by the account directory.
pub struct BearerIdentity<U: UnitOfWork> {
    uow: Arc<U>,
    tokens: Arc<TokenService>,
}

impl<U: UnitOfWork> BearerIdentity<U> {
    pub fn new(uow: Arc<U>, tokens: Arc<TokenService>) -> Self {
        Self { uow, tokens }
    }
}

#[async_trait]
impl<U: UnitOfWork> IdentityResolver for BearerIdentity<U> {
    async fn resolve(&self, authorization: Option<&str>) -> AppResult<User> {
        let token = extract_bearer(authorization)?;
        let subject = self.tokens.verify(token)?;

        // The account may have vanished after the token was issued
        let user = self
            .uow
            .users()
            .find_by_id(subject)
            .await?
            .ok_or(AuthError::UnknownSubject)?;

        tracing::debug!(user_id = user.id, "Request authenticated");
        Ok(user)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::errors::AppError;
    use crate::infra::repositories::MockUserRepository;
    use crate::infra::MockPersistence;
    use mockall::predicate::eq;

    fn token_service() -> Arc<TokenService> {
        let config = Config::from_lookup(|key| {
            (key == "SECRET_KEY").then(|| "identity-test-secret-key-0123456789".to_string())
        })
        .unwrap();
        Arc::new(TokenService::new(&config))
    }

    fn user(id: i32) -> User {
        User {
            id,
            email: format!("user{}@example.com", id),
            hashed_password: "digest".to_string(),
        }
    }

    fn resolver(repo: MockUserRepository, tokens: Arc<TokenService>) -> BearerIdentity<MockPersistence> {
        BearerIdentity::new(Arc::new(MockPersistence::with_users(repo)), tokens)
    }

    fn auth_error(result: AppResult<User>) -> AuthError {
        match result {
            Err(AppError::Auth(e)) => e,
            other => panic!("expected auth error, got {:?}", other),
        }
    }

    #[test]
    fn test_extract_bearer() {
        assert_eq!(extract_bearer(Some("Bearer abc.def.ghi")), Ok("abc.def.ghi"));
        assert_eq!(extract_bearer(Some("bearer abc")), Ok("abc"));
        assert_eq!(extract_bearer(Some("BEARER   abc ")), Ok("abc"));
    }

    #[test]
    fn test_extract_bearer_missing() {
        for header in [None, Some(""), Some("Bearer"), Some("Bearer "), Some("Basic dXNlcjpwdw==")] {
            assert_eq!(extract_bearer(header), Err(AuthError::Missing), "{header:?}");
        }
    }

    #[tokio::test]
    async fn test_resolve_without_header_is_missing() {
        let repo = MockUserRepository::new();
        let identity = resolver(repo, token_service());

        assert_eq!(auth_error(identity.resolve(None).await), AuthError::Missing);
    }

    #[tokio::test]
    async fn test_resolve_propagates_token_errors() {
        let repo = MockUserRepository::new();
        let identity = resolver(repo, token_service());

        let err = auth_error(identity.resolve(Some("Bearer garbage")).await);
        assert_eq!(err, AuthError::Malformed);
    }

    #[tokio::test]
    async fn test_resolve_unknown_subject() {
        let tokens = token_service();
        let token = tokens.issue(99).unwrap();

        let mut repo = MockUserRepository::new();
        repo.expect_find_by_id()
            .with(eq(99))
            .times(1)
            .returning(|_| Ok(None));

        let identity = resolver(repo, tokens);
        let header = format!("Bearer {}", token);

        assert_eq!(
            auth_error(identity.resolve(Some(&header)).await),
            AuthError::UnknownSubject
        );
    }

    #[tokio::test]
    async fn test_resolve_success() {
        let tokens = token_service();
        let token = tokens.issue(3).unwrap();

        let mut repo = MockUserRepository::new();
        repo.expect_find_by_id()
            .with(eq(3))
            .times(1)
            .returning(|id| Ok(Some(user(id))));

        let identity = resolver(repo, tokens);
        let header = format!("Bearer {}", token);
        let resolved = identity.resolve(Some(&header)).await.unwrap();

        assert_eq!(resolved.id, 3);
        assert_eq!(resolved.email, "user3@example.com");
    }
}
