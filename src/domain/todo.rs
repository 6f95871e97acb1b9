//! Todo domain entity and related types.

use serde::Serialize;
use utoipa::ToSchema;

/// Todo item, always owned by exactly one user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Todo {
    pub id: i32,
    pub title: String,
    pub description: Option<String>,
    pub completed: bool,
    pub owner_id: i32,
}

impl Todo {
    pub fn is_owned_by(&self, user_id: i32) -> bool {
        self.owner_id == user_id
    }
}

/// Writable fields of a todo, used for both creation and full replacement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TodoDraft {
    pub title: String,
    pub description: Option<String>,
    pub completed: bool,
}

/// Todo response (owner is implied by the authenticated caller)
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct TodoResponse {
    /// Todo identifier
    #[schema(example = 1)]
    pub id: i32,
    /// Short title
    #[schema(example = "Buy milk")]
    pub title: String,
    /// Optional longer description
    #[schema(example = "Two litres, semi-skimmed")]
    pub description: Option<String>,
    /// Completion flag
    #[schema(example = false)]
    pub completed: bool,
}

impl From<Todo> for TodoResponse {
    fn from(todo: Todo) -> Self {
        Self {
            id: todo.id,
            title: todo.title,
            description: todo.description,
            completed: todo.completed,
        }
    }
}
