//! Integration tests for API endpoints.
//!
//! Each test builds the real router over a fresh in-memory SQLite database and
//! drives it with `tower::ServiceExt::oneshot`.

use std::sync::Arc;

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use chrono::Utc;
use jsonwebtoken::{encode, EncodingKey, Header};
use serde_json::{json, Value};
use tower::ServiceExt;

use todo_api::infra::Database;
use todo_api::services::{Claims, TokenService};
use todo_api::{create_router, AppState, Config};

const SECRET: &str = "integration-test-secret-key-0123456789";

// =============================================================================
// Test Helpers
// =============================================================================

fn test_config() -> Config {
    Config::from_lookup(|key| match key {
        "SECRET_KEY" => Some(SECRET.to_string()),
        "DATABASE_URL" => Some("sqlite::memory:".to_string()),
        _ => None,
    })
    .expect("test config should load")
}

async fn test_app() -> Router {
    let config = test_config();
    let db = Database::connect(&config)
        .await
        .expect("in-memory database should connect");
    create_router(AppState::from_config(Arc::new(db), &config))
}

async fn send(
    app: &Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }

    let request = match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };

    (status, json)
}

async fn register(app: &Router, email: &str, password: &str) -> (StatusCode, Value) {
    send(
        app,
        Method::POST,
        "/api/v1/auth/register",
        None,
        Some(json!({ "email": email, "password": password })),
    )
    .await
}

async fn login(app: &Router, email: &str, password: &str) -> (StatusCode, Value) {
    send(
        app,
        Method::POST,
        "/api/v1/auth/login",
        None,
        Some(json!({ "email": email, "password": password })),
    )
    .await
}

/// Register and log in, returning the access token.
async fn sign_up(app: &Router, email: &str, password: &str) -> String {
    let (status, _) = register(app, email, password).await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = login(app, email, password).await;
    assert_eq!(status, StatusCode::OK);
    body["access_token"].as_str().unwrap().to_string()
}

fn sign(claims: &Claims) -> String {
    encode(
        &Header::default(),
        claims,
        &EncodingKey::from_secret(SECRET.as_bytes()),
    )
    .unwrap()
}

// =============================================================================
// Public Endpoints
// =============================================================================

#[tokio::test]
async fn test_root_endpoint() {
    let app = test_app().await;
    let (status, body) = send(&app, Method::GET, "/", None, None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "status": "ok" }));
}

#[tokio::test]
async fn test_health_endpoint() {
    let app = test_app().await;
    let (status, body) = send(&app, Method::GET, "/health", None, None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["database"]["status"], "healthy");
}

// =============================================================================
// Registration & Login
// =============================================================================

#[tokio::test]
async fn test_register_returns_public_fields_only() {
    let app = test_app().await;
    let (status, body) = register(&app, "a@x.com", "pw1").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["email"], "a@x.com");
    assert!(body["id"].is_i64());
    assert!(body.get("hashed_password").is_none());
    assert!(body.get("password").is_none());
}

#[tokio::test]
async fn test_register_same_email_twice() {
    let app = test_app().await;

    let (first, _) = register(&app, "a@x.com", "pw1").await;
    let (second, body) = register(&app, "a@x.com", "pw2").await;

    assert_eq!(first, StatusCode::OK);
    assert_eq!(second, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "DUPLICATE_EMAIL");
}

#[tokio::test]
async fn test_email_match_is_case_sensitive() {
    let app = test_app().await;

    let (first, _) = register(&app, "a@x.com", "pw1").await;
    let (second, _) = register(&app, "A@x.com", "pw1").await;

    assert_eq!(first, StatusCode::OK);
    assert_eq!(second, StatusCode::OK);
}

#[tokio::test]
async fn test_register_rejects_invalid_email() {
    let app = test_app().await;
    let (status, body) = register(&app, "not-an-email", "pw1").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_login_returns_bearer_token() {
    let app = test_app().await;
    register(&app, "a@x.com", "pw1").await;

    let (status, body) = login(&app, "a@x.com", "pw1").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["token_type"], "bearer");
    assert_eq!(body["expires_in"], 3600);
    assert!(!body["access_token"].as_str().unwrap().is_empty());
}

#[tokio::test]
async fn test_login_failures_are_indistinguishable() {
    let app = test_app().await;
    register(&app, "a@x.com", "pw1").await;

    let wrong_password = login(&app, "a@x.com", "wrong").await;
    let unknown_email = login(&app, "nobody@x.com", "pw1").await;

    assert_eq!(wrong_password.0, StatusCode::UNAUTHORIZED);
    assert_eq!(wrong_password, unknown_email);
    assert_eq!(wrong_password.1["error"]["code"], "INVALID_CREDENTIALS");
}

#[tokio::test]
async fn test_login_rejects_malformed_body() {
    let app = test_app().await;

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/v1/auth/login",
        None,
        Some(json!({ "email": "a@x.com" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "VALIDATION_ERROR");

    let request = Request::builder()
        .method(Method::POST)
        .uri("/api/v1/auth/login")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{not json"))
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
}

// =============================================================================
// Identity Resolution
// =============================================================================

#[tokio::test]
async fn test_protected_route_without_token() {
    let app = test_app().await;
    let request = Request::builder()
        .uri("/api/v1/todos")
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(
        response.headers().get(header::WWW_AUTHENTICATE).unwrap(),
        "Bearer"
    );
}

#[tokio::test]
async fn test_protected_route_with_garbage_token() {
    let app = test_app().await;
    let (status, body) = send(&app, Method::GET, "/api/v1/todos", Some("garbage"), None).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"]["code"], "INVALID_TOKEN");
}

#[tokio::test]
async fn test_expired_token_rejected() {
    let app = test_app().await;
    sign_up(&app, "a@x.com", "pw1").await;

    let now = Utc::now().timestamp();
    let token = sign(&Claims {
        sub: "1".to_string(),
        exp: now - 10,
        iat: now - 3610,
    });
    let (status, body) = send(&app, Method::GET, "/api/v1/todos", Some(&token), None).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"]["code"], "INVALID_TOKEN");
}

#[tokio::test]
async fn test_token_for_unknown_subject_rejected() {
    let app = test_app().await;
    let token = TokenService::new(&test_config()).issue(999).unwrap();

    let (status, body) = send(&app, Method::GET, "/api/v1/todos", Some(&token), None).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"]["code"], "INVALID_TOKEN");
}

// =============================================================================
// Todo CRUD
// =============================================================================

#[tokio::test]
async fn test_full_flow_scenario() {
    let app = test_app().await;

    let (status, _) = register(&app, "a@x.com", "pw1").await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = login(&app, "a@x.com", "pw1").await;
    assert_eq!(status, StatusCode::OK);
    let token = body["access_token"].as_str().unwrap().to_string();

    let (status, body) = send(&app, Method::GET, "/api/v1/todos", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));

    let (status, created) = send(
        &app,
        Method::POST,
        "/api/v1/todos",
        Some(&token),
        Some(json!({ "title": "t", "description": "d", "completed": false })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(created["title"], "t");
    assert_eq!(created["description"], "d");
    assert_eq!(created["completed"], false);
    let todo_id = created["id"].as_i64().unwrap();

    let other_token = sign_up(&app, "b@x.com", "pw2").await;
    let uri = format!("/api/v1/todos/{}", todo_id);
    let (status, body) = send(&app, Method::GET, &uri, Some(&other_token), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"]["code"], "NOT_FOUND");

    let (status, body) = send(&app, Method::GET, &uri, Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, created);
}

#[tokio::test]
async fn test_create_defaults_and_validation() {
    let app = test_app().await;
    let token = sign_up(&app, "a@x.com", "pw1").await;

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/v1/todos",
        Some(&token),
        Some(json!({ "title": "just a title" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["completed"], false);
    assert!(body["description"].is_null());

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/v1/todos",
        Some(&token),
        Some(json!({ "title": "" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_list_only_shows_own_todos() {
    let app = test_app().await;
    let alice = sign_up(&app, "a@x.com", "pw1").await;
    let bob = sign_up(&app, "b@x.com", "pw2").await;

    for title in ["one", "two"] {
        send(&app, Method::POST, "/api/v1/todos", Some(&alice), Some(json!({ "title": title }))).await;
    }
    send(&app, Method::POST, "/api/v1/todos", Some(&bob), Some(json!({ "title": "bob's" }))).await;

    let (_, alice_list) = send(&app, Method::GET, "/api/v1/todos", Some(&alice), None).await;
    let (_, bob_list) = send(&app, Method::GET, "/api/v1/todos", Some(&bob), None).await;

    let titles: Vec<&str> = alice_list
        .as_array()
        .unwrap()
        .iter()
        .map(|t| t["title"].as_str().unwrap())
        .collect();
    assert_eq!(titles, vec!["one", "two"]);
    assert_eq!(bob_list.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_update_replaces_fields() {
    let app = test_app().await;
    let token = sign_up(&app, "a@x.com", "pw1").await;

    let (_, created) = send(
        &app,
        Method::POST,
        "/api/v1/todos",
        Some(&token),
        Some(json!({ "title": "t", "description": "d" })),
    )
    .await;
    let uri = format!("/api/v1/todos/{}", created["id"]);

    let (status, updated) = send(
        &app,
        Method::PUT,
        &uri,
        Some(&token),
        Some(json!({ "title": "t2", "description": null, "completed": true })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["id"], created["id"]);
    assert_eq!(updated["title"], "t2");
    assert!(updated["description"].is_null());
    assert_eq!(updated["completed"], true);
}

#[tokio::test]
async fn test_foreign_update_and_delete_are_not_found() {
    let app = test_app().await;
    let alice = sign_up(&app, "a@x.com", "pw1").await;
    let bob = sign_up(&app, "b@x.com", "pw2").await;

    let (_, created) = send(
        &app,
        Method::POST,
        "/api/v1/todos",
        Some(&alice),
        Some(json!({ "title": "mine" })),
    )
    .await;
    let uri = format!("/api/v1/todos/{}", created["id"]);

    let (status, _) = send(&app, Method::PUT, &uri, Some(&bob), Some(json!({ "title": "stolen" }))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(&app, Method::DELETE, &uri, Some(&bob), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, body) = send(&app, Method::GET, &uri, Some(&alice), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["title"], "mine");
}

#[tokio::test]
async fn test_delete_returns_removed_todo() {
    let app = test_app().await;
    let token = sign_up(&app, "a@x.com", "pw1").await;

    let (_, created) = send(
        &app,
        Method::POST,
        "/api/v1/todos",
        Some(&token),
        Some(json!({ "title": "t" })),
    )
    .await;
    let uri = format!("/api/v1/todos/{}", created["id"]);

    let (status, deleted) = send(&app, Method::DELETE, &uri, Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(deleted, created);

    let (status, _) = send(&app, Method::GET, &uri, Some(&token), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(&app, Method::DELETE, &uri, Some(&token), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_openapi_document_served() {
    let app = test_app().await;
    let (status, body) = send(&app, Method::GET, "/api-docs/openapi.json", None, None).await;

    assert_eq!(status, StatusCode::OK);
    assert!(body["paths"].get("/api/v1/todos/{todo_id}").is_some());
    assert!(body["components"]["securitySchemes"].get("bearer_auth").is_some());
}
