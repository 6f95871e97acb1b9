//! Todo repository - the item store.
//!
//! Every query is scoped by owner. Lookups combine the id and owner
//! predicates as two separate filters.

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};

use super::entities::todo::{self, ActiveModel, Entity as TodoEntity, Model};
use crate::domain::{Todo, TodoDraft};
use crate::errors::{AppResult, OptionExt};

#[cfg(test)]
use mockall::automock;

/// Todo repository trait for dependency injection.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait TodoRepository: Send + Sync {
    /// Create a todo owned by `owner_id`
    async fn create(&self, owner_id: i32, draft: TodoDraft) -> AppResult<Todo>;

    /// List all todos of one owner, ordered by id
    async fn list_by_owner(&self, owner_id: i32) -> AppResult<Vec<Todo>>;

    /// Find a todo only if it belongs to `owner_id`
    async fn find_by_id_and_owner(&self, id: i32, owner_id: i32) -> AppResult<Option<Todo>>;

    /// Replace the writable fields of an owned todo (NotFound otherwise)
    async fn update(&self, id: i32, owner_id: i32, draft: TodoDraft) -> AppResult<Todo>;

    /// Delete an owned todo and return it (NotFound otherwise)
    async fn delete(&self, id: i32, owner_id: i32) -> AppResult<Todo>;
}

/// SeaORM-backed implementation of TodoRepository
pub struct TodoStore {
    db: DatabaseConnection,
}

impl TodoStore {
    /// Create new repository instance
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    async fn find_owned(&self, id: i32, owner_id: i32) -> AppResult<Option<Model>> {
        let model = TodoEntity::find()
            .filter(todo::Column::Id.eq(id))
            .filter(todo::Column::OwnerId.eq(owner_id))
            .one(&self.db)
            .await?;

        Ok(model)
    }
}

#[async_trait]
impl TodoRepository for TodoStore {
    async fn create(&self, owner_id: i32, draft: TodoDraft) -> AppResult<Todo> {
        let active_model = ActiveModel {
            title: Set(draft.title),
            description: Set(draft.description),
            completed: Set(draft.completed),
            owner_id: Set(owner_id),
            ..Default::default()
        };

        let model = active_model.insert(&self.db).await?;
        Ok(Todo::from(model))
    }

    async fn list_by_owner(&self, owner_id: i32) -> AppResult<Vec<Todo>> {
        let models = TodoEntity::find()
            .filter(todo::Column::OwnerId.eq(owner_id))
            .order_by_asc(todo::Column::Id)
            .all(&self.db)
            .await?;

        Ok(models.into_iter().map(Todo::from).collect())
    }

    async fn find_by_id_and_owner(&self, id: i32, owner_id: i32) -> AppResult<Option<Todo>> {
        Ok(self.find_owned(id, owner_id).await?.map(Todo::from))
    }

    async fn update(&self, id: i32, owner_id: i32, draft: TodoDraft) -> AppResult<Todo> {
        let model = self.find_owned(id, owner_id).await?.ok_or_not_found()?;

        let mut active: ActiveModel = model.into();
        active.title = Set(draft.title);
        active.description = Set(draft.description);
        active.completed = Set(draft.completed);

        let model = active.update(&self.db).await?;
        Ok(Todo::from(model))
    }

    async fn delete(&self, id: i32, owner_id: i32) -> AppResult<Todo> {
        let model = self.find_owned(id, owner_id).await?.ok_or_not_found()?;

        TodoEntity::delete_many()
            .filter(todo::Column::Id.eq(model.id))
            .filter(todo::Column::OwnerId.eq(owner_id))
            .exec(&self.db)
            .await?;

        Ok(Todo::from(model))
    }
}
