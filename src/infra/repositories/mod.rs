//! Repository layer - Data access abstraction
//!
//! Repositories provide an abstraction over data persistence,
//! following the Repository pattern for clean separation of concerns.

pub(crate) mod entities;
mod todo_repository;
mod user_repository;

pub use todo_repository::{TodoRepository, TodoStore};
pub use user_repository::{UserRepository, UserStore};

#[cfg(test)]
pub use todo_repository::MockTodoRepository;
#[cfg(test)]
pub use user_repository::MockUserRepository;
