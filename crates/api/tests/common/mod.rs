//! Shared helpers for HTTP-level integration tests.
//!
//! Requests go straight to the router via `tower::ServiceExt::oneshot`, no
//! TCP listener involved. Most endpoints identify the caller through the
//! `X-Sharer-User-Id` header, so the request helpers take a user id.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Method, Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use sqlx::PgPool;
use tower::ServiceExt;

use lendit_api::config::ServerConfig;
use lendit_api::identity::SHARER_HEADER;
use lendit_api::router::build_app_router;
use lendit_api::state::AppState;

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
    }
}

/// Build the full application router with all middleware layers, using the
/// given database pool.
///
/// Delegates to the same [`build_app_router`] as `main.rs`, so tests
/// exercise the exact middleware stack production runs.
pub fn build_test_app(pool: PgPool) -> Router {
    let config = test_config();
    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
    };
    build_app_router(state, &config)
}

/// Send one request through the router.
async fn send(
    app: Router,
    method: Method,
    uri: &str,
    user_id: Option<i64>,
    body: Option<serde_json::Value>,
) -> Response<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(id) = user_id {
        builder = builder.header(SHARER_HEADER, id.to_string());
    }
    let request = match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    app.oneshot(request).await.unwrap()
}

/// GET as the given user.
pub async fn get(app: Router, uri: &str, user_id: i64) -> Response<Body> {
    send(app, Method::GET, uri, Some(user_id), None).await
}

/// GET without the identity header.
pub async fn get_anon(app: Router, uri: &str) -> Response<Body> {
    send(app, Method::GET, uri, None, None).await
}

/// POST a JSON body as the given user.
pub async fn post_json(
    app: Router,
    uri: &str,
    user_id: i64,
    json: serde_json::Value,
) -> Response<Body> {
    send(app, Method::POST, uri, Some(user_id), Some(json)).await
}

/// POST a JSON body without the identity header (user creation).
pub async fn post_json_anon(app: Router, uri: &str, json: serde_json::Value) -> Response<Body> {
    send(app, Method::POST, uri, None, Some(json)).await
}

/// PATCH a JSON body as the given user.
pub async fn patch_json(
    app: Router,
    uri: &str,
    user_id: i64,
    json: serde_json::Value,
) -> Response<Body> {
    send(app, Method::PATCH, uri, Some(user_id), Some(json)).await
}

/// PATCH a JSON body without the identity header (user update).
pub async fn patch_json_anon(app: Router, uri: &str, json: serde_json::Value) -> Response<Body> {
    send(app, Method::PATCH, uri, None, Some(json)).await
}

/// PATCH with no body (booking decisions carry their input in the query
/// string).
pub async fn patch(app: Router, uri: &str, user_id: i64) -> Response<Body> {
    send(app, Method::PATCH, uri, Some(user_id), None).await
}

/// DELETE without the identity header.
pub async fn delete(app: Router, uri: &str) -> Response<Body> {
    send(app, Method::DELETE, uri, None, None).await
}

/// Collect a response body and parse it as JSON.
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

/// Create a user through the API and return its id.
pub async fn seed_user(pool: &PgPool, name: &str, email: &str) -> i64 {
    let app = build_test_app(pool.clone());
    let response = post_json_anon(
        app,
        "/api/v1/users",
        serde_json::json!({"name": name, "email": email}),
    )
    .await;
    assert_eq!(response.status(), axum::http::StatusCode::CREATED);
    body_json(response).await["data"]["id"].as_i64().unwrap()
}

/// Create an item through the API and return its id.
pub async fn seed_item(pool: &PgPool, owner_id: i64, name: &str, available: bool) -> i64 {
    let app = build_test_app(pool.clone());
    let response = post_json(
        app,
        "/api/v1/items",
        owner_id,
        serde_json::json!({
            "name": name,
            "description": format!("{name} description"),
            "available": available,
        }),
    )
    .await;
    assert_eq!(response.status(), axum::http::StatusCode::CREATED);
    body_json(response).await["data"]["id"].as_i64().unwrap()
}
