//! Shared helpers for HTTP-level integration tests.
//!
//! Mirrors the router construction in `main.rs` so tests exercise the same
//! middleware stack (CORS, request ID, timeout, tracing, panic recovery)
//! that production uses, and sends requests via `tower::ServiceExt::oneshot`
//! without a TCP listener.

#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::header::{AUTHORIZATION, CONTENT_TYPE};
use axum::http::{HeaderName, Method, Request, StatusCode};
use axum::response::Response;
use axum::Router;
use http_body_util::BodyExt;
use sqlx::PgPool;
use tower::ServiceExt;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::CorsLayer;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

use siteguard_api::auth::jwt::JwtConfig;
use siteguard_api::config::ServerConfig;
use siteguard_api::routes;
use siteguard_api::state::AppState;

/// Build a test `ServerConfig` with safe defaults and a fixed JWT secret.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        jwt: JwtConfig {
            secret: "integration-test-secret-long-enough-for-hmac".to_string(),
            token_expiry_hours: 24,
        },
    }
}

/// Build the full application router with all middleware layers, using the
/// given database pool.
pub fn build_test_app(pool: PgPool) -> Router {
    let config = test_config();

    let state = AppState {
        pool,
        config: Arc::new(config),
    };

    let cors = CorsLayer::new()
        .allow_origin(["http://localhost:5173".parse().unwrap()])
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::PATCH,
        ])
        .allow_headers([CONTENT_TYPE, AUTHORIZATION])
        .allow_credentials(true)
        .max_age(Duration::from_secs(3600));

    let request_id_header = HeaderName::from_static("x-request-id");

    Router::new()
        .merge(routes::health::router())
        .merge(routes::api_routes())
        .layer(CatchPanicLayer::new())
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            Duration::from_secs(30),
        ))
        .layer(PropagateRequestIdLayer::new(request_id_header.clone()))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(SetRequestIdLayer::new(request_id_header, MakeRequestUuid))
        .layer(cors)
        .with_state(state)
}

/// Send a single request through the router.
async fn send(
    app: &Router,
    method: Method,
    path: &str,
    token: Option<&str>,
    body: Option<serde_json::Value>,
) -> Response {
    let mut builder = Request::builder().method(method).uri(path);
    if let Some(token) = token {
        builder = builder.header(AUTHORIZATION, format!("Bearer {token}"));
    }
    let request = match body {
        Some(json) => builder
            .header(CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    app.clone().oneshot(request).await.unwrap()
}

pub async fn get(app: &Router, path: &str) -> Response {
    send(app, Method::GET, path, None, None).await
}

pub async fn get_auth(app: &Router, path: &str, token: &str) -> Response {
    send(app, Method::GET, path, Some(token), None).await
}

pub async fn post_json(app: &Router, path: &str, body: serde_json::Value) -> Response {
    send(app, Method::POST, path, None, Some(body)).await
}

pub async fn post_json_auth(
    app: &Router,
    path: &str,
    token: &str,
    body: serde_json::Value,
) -> Response {
    send(app, Method::POST, path, Some(token), Some(body)).await
}

pub async fn put_json_auth(
    app: &Router,
    path: &str,
    token: &str,
    body: serde_json::Value,
) -> Response {
    send(app, Method::PUT, path, Some(token), Some(body)).await
}

pub async fn patch_json_auth(
    app: &Router,
    path: &str,
    token: &str,
    body: serde_json::Value,
) -> Response {
    send(app, Method::PATCH, path, Some(token), Some(body)).await
}

pub async fn patch_auth(app: &Router, path: &str, token: &str) -> Response {
    send(app, Method::PATCH, path, Some(token), None).await
}

pub async fn delete_auth(app: &Router, path: &str, token: &str) -> Response {
    send(app, Method::DELETE, path, Some(token), None).await
}

/// Collect and parse a response body as JSON.
pub async fn body_json(response: Response) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

/// Collect a response body as raw bytes (for asserting empty 204 bodies).
pub async fn body_bytes(response: Response) -> Vec<u8> {
    response
        .into_body()
        .collect()
        .await
        .unwrap()
        .to_bytes()
        .to_vec()
}

/// Register a user via the API and return `(token, user_id)`.
pub async fn signup_user(app: &Router, name: &str, email: &str, password: &str) -> (String, i64) {
    let response = post_json(
        app,
        "/auth/signup",
        serde_json::json!({ "name": name, "email": email, "password": password }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    let token = json["data"]["token"].as_str().unwrap().to_string();
    let user_id = json["data"]["user"]["id"].as_i64().unwrap();
    (token, user_id)
}

/// Create a workspace via the API and return its JSON representation.
pub async fn create_workspace(app: &Router, token: &str, name: &str) -> serde_json::Value {
    let response = post_json_auth(
        app,
        "/workspaces",
        token,
        serde_json::json!({
            "name": name,
            "location": "Rotterdam",
            "stage": "planning",
            "type": "commercial",
            "budget": "2.4M EUR",
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await["data"].clone()
}
