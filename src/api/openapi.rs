//! OpenAPI documentation configuration.
//!
//! Provides Swagger UI for API exploration and testing.

use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::api::handlers::{auth_handler, todo_handler};
use crate::domain::{TodoResponse, UserResponse};
use crate::services::TokenResponse;

/// OpenAPI documentation for the Todo API
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Todo API",
        version = "0.1.0",
        description = "Multi-user to-do lists with bearer token authentication",
        license(name = "MIT", url = "https://opensource.org/licenses/MIT")
    ),
    paths(
        auth_handler::register,
        auth_handler::login,
        todo_handler::create_todo,
        todo_handler::list_todos,
        todo_handler::get_todo,
        todo_handler::update_todo,
        todo_handler::delete_todo,
    ),
    components(
        schemas(
            UserResponse,
            TodoResponse,
            TokenResponse,
            auth_handler::RegisterRequest,
            auth_handler::LoginRequest,
            todo_handler::TodoRequest,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Authentication", description = "User registration and login"),
        (name = "Todos", description = "Per-user todo management")
    )
)]
pub struct ApiDoc;

/// Security scheme modifier for bearer authentication
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .description(Some("Access token obtained from /api/v1/auth/login"))
                        .build(),
                ),
            );
        }
    }
}
