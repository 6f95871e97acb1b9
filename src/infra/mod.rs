//! Infrastructure layer - External systems integration
//!
//! This module handles all external system concerns:
//! - Database connections and migrations
//! - Repositories (account directory, item store)
//! - Unit of Work for repository access

pub mod db;
pub mod repositories;
pub mod unit_of_work;

pub use db::{Database, Migrator};
pub use repositories::{TodoRepository, TodoStore, UserRepository, UserStore};
pub use unit_of_work::{Persistence, UnitOfWork};

#[cfg(test)]
pub(crate) use unit_of_work::MockPersistence;
