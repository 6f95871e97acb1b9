//! Domain layer - Core business entities and logic
//!
//! Entities and value objects, independent of HTTP and persistence.

pub mod password;
pub mod todo;
pub mod user;

pub use password::Password;
pub use todo::{Todo, TodoDraft, TodoResponse};
pub use user::{User, UserResponse};
