//! Todo handlers. All routes here sit behind the auth middleware.

use axum::{
    extract::{Path, State},
    response::Json,
    routing::get,
    Extension, Router,
};
use serde::Deserialize;
use utoipa::ToSchema;
use validator::Validate;

use crate::api::extractors::ValidatedJson;
use crate::api::middleware::CurrentUser;
use crate::api::AppState;
use crate::domain::{TodoDraft, TodoResponse};
use crate::errors::AppResult;

/// Todo create/replace request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct TodoRequest {
    /// Short title
    #[validate(length(min = 1, message = "Title is required"))]
    #[schema(example = "Buy milk")]
    pub title: String,
    /// Optional longer description
    #[schema(example = "Two litres, semi-skimmed")]
    pub description: Option<String>,
    /// Completion flag
    #[serde(default)]
    #[schema(example = false)]
    pub completed: bool,
}

impl From<TodoRequest> for TodoDraft {
    fn from(request: TodoRequest) -> Self {
        Self {
            title: request.title,
            description: request.description,
            completed: request.completed,
        }
    }
}

/// Create todo routes
pub fn todo_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_todos).post(create_todo))
        .route(
            "/:todo_id",
            get(get_todo).put(update_todo).delete(delete_todo),
        )
}

/// Create a todo owned by the caller
#[utoipa::path(
    post,
    path = "/api/v1/todos",
    tag = "Todos",
    request_body = TodoRequest,
    responses(
        (status = 200, description = "Todo created", body = TodoResponse),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Not authenticated")
    ),
    security(("bearer_auth" = []))
)]
pub async fn create_todo(
    State(state): State<AppState>,
    Extension(current_user): Extension<CurrentUser>,
    ValidatedJson(payload): ValidatedJson<TodoRequest>,
) -> AppResult<Json<TodoResponse>> {
    let todo = state
        .todo_service
        .create_todo(current_user.id(), payload.into())
        .await?;

    Ok(Json(TodoResponse::from(todo)))
}

/// List the caller's todos
#[utoipa::path(
    get,
    path = "/api/v1/todos",
    tag = "Todos",
    responses(
        (status = 200, description = "Todos of the caller", body = [TodoResponse]),
        (status = 401, description = "Not authenticated")
    ),
    security(("bearer_auth" = []))
)]
pub async fn list_todos(
    State(state): State<AppState>,
    Extension(current_user): Extension<CurrentUser>,
) -> AppResult<Json<Vec<TodoResponse>>> {
    let todos = state.todo_service.list_todos(current_user.id()).await?;

    Ok(Json(todos.into_iter().map(TodoResponse::from).collect()))
}

/// Get one of the caller's todos
#[utoipa::path(
    get,
    path = "/api/v1/todos/{todo_id}",
    tag = "Todos",
    params(("todo_id" = i32, Path, description = "Todo identifier")),
    responses(
        (status = 200, description = "Todo found", body = TodoResponse),
        (status = 401, description = "Not authenticated"),
        (status = 404, description = "Todo not found")
    ),
    security(("bearer_auth" = []))
)]
pub async fn get_todo(
    State(state): State<AppState>,
    Extension(current_user): Extension<CurrentUser>,
    Path(todo_id): Path<i32>,
) -> AppResult<Json<TodoResponse>> {
    let todo = state
        .todo_service
        .get_todo(current_user.id(), todo_id)
        .await?;

    Ok(Json(TodoResponse::from(todo)))
}

/// Replace one of the caller's todos
#[utoipa::path(
    put,
    path = "/api/v1/todos/{todo_id}",
    tag = "Todos",
    params(("todo_id" = i32, Path, description = "Todo identifier")),
    request_body = TodoRequest,
    responses(
        (status = 200, description = "Todo updated", body = TodoResponse),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Not authenticated"),
        (status = 404, description = "Todo not found")
    ),
    security(("bearer_auth" = []))
)]
pub async fn update_todo(
    State(state): State<AppState>,
    Extension(current_user): Extension<CurrentUser>,
    Path(todo_id): Path<i32>,
    ValidatedJson(payload): ValidatedJson<TodoRequest>,
) -> AppResult<Json<TodoResponse>> {
    let todo = state
        .todo_service
        .update_todo(current_user.id(), todo_id, payload.into())
        .await?;

    Ok(Json(TodoResponse::from(todo)))
}

/// Delete one of the caller's todos, returning it
#[utoipa::path(
    delete,
    path = "/api/v1/todos/{todo_id}",
    tag = "Todos",
    params(("todo_id" = i32, Path, description = "Todo identifier")),
    responses(
        (status = 200, description = "Todo deleted", body = TodoResponse),
        (status = 401, description = "Not authenticated"),
        (status = 404, description = "Todo not found")
    ),
    security(("bearer_auth" = []))
)]
pub async fn delete_todo(
    State(state): State<AppState>,
    Extension(current_user): Extension<CurrentUser>,
    Path(todo_id): Path<i32>,
) -> AppResult<Json<TodoResponse>> {
    let todo = state
        .todo_service
        .delete_todo(current_user.id(), todo_id)
        .await?;

    Ok(Json(TodoResponse::from(todo)))
}
