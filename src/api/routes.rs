//! Application route configuration.

use axum::{extract::State, http::StatusCode, middleware, response::Json, routing::get, Router};
use serde::Serialize;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use super::handlers::{auth_routes, todo_routes};
use super::middleware::auth_middleware;
use super::openapi::ApiDoc;
use super::AppState;
use crate::config::API_V1_PREFIX;

/// Create the application router with all routes configured
pub fn create_router(state: AppState) -> Router {
    let api = Router::new()
        // Public authentication routes
        .nest("/auth", auth_routes())
        // Protected todo routes (require a valid bearer token)
        .nest(
            "/todos",
            todo_routes().route_layer(middleware::from_fn_with_state(
                state.clone(),
                auth_middleware,
            )),
        );

    Router::new()
        .route("/", get(root))
        .route("/health", get(health))
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .nest(API_V1_PREFIX, api)
        // Global middleware
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::very_permissive())
        .with_state(state)
}

/// Liveness response
#[derive(Serialize)]
struct RootResponse {
    status: &'static str,
}

/// Root endpoint
async fn root() -> Json<RootResponse> {
    Json(RootResponse { status: "ok" })
}

/// Health check response
#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    database: ServiceStatus,
}

/// Service status
#[derive(Serialize)]
struct ServiceStatus {
    status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

/// Health check endpoint with database connectivity check
async fn health(State(state): State<AppState>) -> (StatusCode, Json<HealthResponse>) {
    match state.database.ping().await {
        Ok(()) => (
            StatusCode::OK,
            Json(HealthResponse {
                status: "healthy",
                database: ServiceStatus {
                    status: "healthy",
                    error: None,
                },
            }),
        ),
        Err(e) => {
            tracing::warn!("Health check failed: {}", e);
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(HealthResponse {
                    status: "degraded",
                    database: ServiceStatus {
                        status: "unhealthy",
                        error: Some(e.to_string()),
                    },
                }),
            )
        }
    }
}
