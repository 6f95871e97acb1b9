//! Application state - Dependency injection container.

use std::sync::Arc;

use crate::config::Config;
use crate::infra::Database;
use crate::services::{AuthService, IdentityResolver, ServiceContainer, Services, TodoService};

/// Application state shared by all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Registration and login
    pub auth_service: Arc<dyn AuthService>,
    /// Per-owner todo CRUD
    pub todo_service: Arc<dyn TodoService>,
    /// Bearer token to user resolution
    pub identity: Arc<dyn IdentityResolver>,
    /// Database connection
    pub database: Arc<Database>,
}

impl AppState {
    /// Create application state from a connected database and config.
    pub fn from_config(database: Arc<Database>, config: &Config) -> Self {
        let container = Services::from_connection(database.get_connection(), config);
        Self::from_container(&container, database)
    }

    /// Create application state from any service container.
    pub fn from_container(container: &dyn ServiceContainer, database: Arc<Database>) -> Self {
        Self {
            auth_service: container.auth(),
            todo_service: container.todos(),
            identity: container.identity(),
            database,
        }
    }
}
