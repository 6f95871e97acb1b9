//! Service Container - Centralized service access.
//!
//! Wires the token service, repositories and use cases together once at
//! startup; handlers only see the service traits.

use std::sync::Arc;

use super::{
    AuthService, Authenticator, BearerIdentity, IdentityResolver, TodoManager, TodoService,
    TokenService,
};
use crate::config::Config;
use crate::infra::Persistence;

/// Service container trait for dependency injection.
pub trait ServiceContainer: Send + Sync {
    /// Get authentication service
    fn auth(&self) -> Arc<dyn AuthService>;

    /// Get todo service
    fn todos(&self) -> Arc<dyn TodoService>;

    /// Get identity resolver
    fn identity(&self) -> Arc<dyn IdentityResolver>;
}

/// Concrete implementation of ServiceContainer
pub struct Services {
    auth_service: Arc<dyn AuthService>,
    todo_service: Arc<dyn TodoService>,
    identity: Arc<dyn IdentityResolver>,
}

impl Services {
    /// Create a new service container from already built services
    pub fn new(
        auth_service: Arc<dyn AuthService>,
        todo_service: Arc<dyn TodoService>,
        identity: Arc<dyn IdentityResolver>,
    ) -> Self {
        Self {
            auth_service,
            todo_service,
            identity,
        }
    }

    /// Create service container from database connection and config
    pub fn from_connection(db: sea_orm::DatabaseConnection, config: &Config) -> Self {
        let uow = Arc::new(Persistence::new(db));
        let tokens = Arc::new(TokenService::new(config));

        Self::new(
            Arc::new(Authenticator::new(uow.clone(), tokens.clone())),
            Arc::new(TodoManager::new(uow.clone())),
            Arc::new(BearerIdentity::new(uow, tokens)),
        )
    }
}

impl ServiceContainer for Services {
    fn auth(&self) -> Arc<dyn AuthService> {
        self.auth_service.clone()
    }

    fn todos(&self) -> Arc<dyn TodoService> {
        self.todo_service.clone()
    }

    fn identity(&self) -> Arc<dyn IdentityResolver> {
        self.identity.clone()
    }
}
