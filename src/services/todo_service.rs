//! Todo service - Per-owner CRUD over the item store.

use async_trait::async_trait;
use std::sync::Arc;

use crate::domain::{Todo, TodoDraft};
use crate::errors::{AppResult, OptionExt};
use crate::infra::UnitOfWork;

/// Todo service trait for dependency injection.
///
/// Every operation takes the authenticated owner's id; todos of other users
/// behave exactly like todos that do not exist.
#[async_trait]
pub trait TodoService: Send + Sync {
    async fn create_todo(&self, owner_id: i32, draft: TodoDraft) -> AppResult<Todo>;

    async fn list_todos(&self, owner_id: i32) -> AppResult<Vec<Todo>>;

    async fn get_todo(&self, owner_id: i32, id: i32) -> AppResult<Todo>;

    async fn update_todo(&self, owner_id: i32, id: i32, draft: TodoDraft) -> AppResult<Todo>;

    /// Delete and return the removed todo
    async fn delete_todo(&self, owner_id: i32, id: i32) -> AppResult<Todo>;
}

/// Concrete implementation of TodoService using Unit of Work.
pub struct TodoManager<U: UnitOfWork> {
    uow: Arc<U>,
}

impl<U: UnitOfWork> TodoManager<U> {
    pub fn new(uow: Arc<U>) -> Self {
        Self { uow }
    }
}

#[async_trait]
impl<U: UnitOfWork> TodoService for TodoManager<U> {
    async fn create_todo(&self, owner_id: i32, draft: TodoDraft) -> AppResult<Todo> {
        let todo = self.uow.todos().create(owner_id, draft).await?;
        tracing::debug!(todo_id = todo.id, owner_id, "Todo created");
        Ok(todo)
    }

    async fn list_todos(&self, owner_id: i32) -> AppResult<Vec<Todo>> {
        self.uow.todos().list_by_owner(owner_id).await
    }

    async fn get_todo(&self, owner_id: i32, id: i32) -> AppResult<Todo> {
        self.uow
            .todos()
            .find_by_id_and_owner(id, owner_id)
            .await?
            .filter(|todo| todo.is_owned_by(owner_id))
            .ok_or_not_found()
    }

    async fn update_todo(&self, owner_id: i32, id: i32, draft: TodoDraft) -> AppResult<Todo> {
        self.uow.todos().update(id, owner_id, draft).await
    }

    async fn delete_todo(&self, owner_id: i32, id: i32) -> AppResult<Todo> {
        let todo = self.uow.todos().delete(id, owner_id).await?;
        tracing::debug!(todo_id = todo.id, owner_id, "Todo deleted");
        Ok(todo)
    }
}
