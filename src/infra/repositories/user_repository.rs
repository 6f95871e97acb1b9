//! User repository - the account directory.

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter, Set,
    SqlErr,
};

use super::entities::user::{self, ActiveModel, Entity as UserEntity};
use crate::domain::User;
use crate::errors::{AppError, AppResult, AuthError};

#[cfg(test)]
use mockall::automock;

/// User repository trait for dependency injection.
///
/// Email matching is exact (case-sensitive), as stored.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find user by ID
    async fn find_by_id(&self, id: i32) -> AppResult<Option<User>>;

    /// Find user by email address
    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>>;

    /// Insert a new user with an already hashed password.
    ///
    /// Fails with `AuthError::DuplicateEmail` if the email is taken.
    async fn insert(&self, email: String, hashed_password: String) -> AppResult<User>;
}

/// SeaORM-backed implementation of UserRepository
pub struct UserStore {
    db: DatabaseConnection,
}

impl UserStore {
    /// Create new repository instance
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl UserRepository for UserStore {
    async fn find_by_id(&self, id: i32) -> AppResult<Option<User>> {
        let result = UserEntity::find_by_id(id).one(&self.db).await?;
        Ok(result.map(User::from))
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        let result = UserEntity::find()
            .filter(user::Column::Email.eq(email))
            .one(&self.db)
            .await?;

        Ok(result.map(User::from))
    }

    async fn insert(&self, email: String, hashed_password: String) -> AppResult<User> {
        let active_model = ActiveModel {
            email: Set(email),
            hashed_password: Set(hashed_password),
            ..Default::default()
        };

        let model = active_model.insert(&self.db).await.map_err(insert_error)?;
        Ok(User::from(model))
    }
}

/// A concurrent registration can slip past the existence check; the unique
/// index on email still catches it.
fn insert_error(err: DbErr) -> AppError {
    match err.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(_)) => AuthError::DuplicateEmail.into(),
        _ => AppError::from(err),
    }
}
