//! Unit of Work pattern implementation.
//!
//! Centralizes access to all repositories over one shared connection pool.
//! Services depend on the trait, never on concrete stores, so tests can swap
//! in mocked repositories.

use sea_orm::DatabaseConnection;
use std::sync::Arc;

use super::repositories::{TodoRepository, TodoStore, UserRepository, UserStore};

/// Unit of Work trait for dependency injection.
pub trait UnitOfWork: Send + Sync {
    /// Get user repository (account directory)
    fn users(&self) -> Arc<dyn UserRepository>;

    /// Get todo repository (item store)
    fn todos(&self) -> Arc<dyn TodoRepository>;
}

/// Concrete implementation of UnitOfWork
pub struct Persistence {
    user_repo: Arc<UserStore>,
    todo_repo: Arc<TodoStore>,
}

impl Persistence {
    /// Create new UnitOfWork instance
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            user_repo: Arc::new(UserStore::new(db.clone())),
            todo_repo: Arc::new(TodoStore::new(db)),
        }
    }
}

impl UnitOfWork for Persistence {
    fn users(&self) -> Arc<dyn UserRepository> {
        self.user_repo.clone()
    }

    fn todos(&self) -> Arc<dyn TodoRepository> {
        self.todo_repo.clone()
    }
}

/// Unit of work over mocked repositories, for service unit tests.
#[cfg(test)]
pub(crate) struct MockPersistence {
    user_repo: Arc<super::repositories::MockUserRepository>,
    todo_repo: Arc<super::repositories::MockTodoRepository>,
}

#[cfg(test)]
impl MockPersistence {
    pub(crate) fn new(
        users: super::repositories::MockUserRepository,
        todos: super::repositories::MockTodoRepository,
    ) -> Self {
        Self {
            user_repo: Arc::new(users),
            todo_repo: Arc::new(todos),
        }
    }

    pub(crate) fn with_users(users: super::repositories::MockUserRepository) -> Self {
        Self::new(users, super::repositories::MockTodoRepository::new())
    }

    pub(crate) fn with_todos(todos: super::repositories::MockTodoRepository) -> Self {
        Self::new(super::repositories::MockUserRepository::new(), todos)
    }
}

#[cfg(test)]
impl UnitOfWork for MockPersistence {
    fn users(&self) -> Arc<dyn UserRepository> {
        self.user_repo.clone()
    }

    fn todos(&self) -> Arc<dyn TodoRepository> {
        self.todo_repo.clone()
    }
}
