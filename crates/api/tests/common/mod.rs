#![allow(dead_code)]

use axum::body::Body;
use axum::http::header::{AUTHORIZATION, CONTENT_TYPE};
use axum::http::{Method, Request, StatusCode};
use axum::response::Response;
use axum::Router;
use chrono::Duration;
use http_body_util::BodyExt;
use tower::ServiceExt;

use inka_api::config::{LogFormat, ServerConfig, StoreBackend};
use inka_api::router::build_app_router;
use inka_api::state::AppState;
use inka_core::auth::token::{Algorithm, TokenConfig};

pub const TEST_SECRET: &str = "integration-test-secret-that-is-long-enough";

/// Build a test `ServerConfig` with safe defaults and the in-memory store.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        min_password_length: 8,
        store: StoreBackend::Memory,
        log_format: LogFormat::Text,
        jwt: TokenConfig {
            secret: TEST_SECRET.to_string(),
            algorithm: Algorithm::HS256,
            default_ttl: Duration::minutes(10),
        },
    }
}

/// Fresh state over an empty in-memory store.
pub fn test_state() -> AppState {
    AppState::in_memory(test_config()).expect("test config should be valid")
}

/// Build the full application router with all middleware layers.
///
/// Clone the state and call this again to issue several requests against the
/// same store.
pub fn build_test_app(state: AppState) -> Router {
    build_app_router(state)
}

pub async fn send(app: Router, request: Request<Body>) -> Response {
    app.oneshot(request).await.expect("router is infallible")
}

pub async fn get(app: Router, uri: &str) -> Response {
    let request = Request::builder()
        .method(Method::GET)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    send(app, request).await
}

pub async fn get_auth(app: Router, uri: &str, token: &str) -> Response {
    let request = Request::builder()
        .method(Method::GET)
        .uri(uri)
        .header(AUTHORIZATION, format!("Bearer {token}"))
        .body(Body::empty())
        .unwrap();
    send(app, request).await
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response {
    json_request(app, Method::POST, uri, body, None).await
}

pub async fn post_json_auth(
    app: Router,
    uri: &str,
    body: serde_json::Value,
    token: &str,
) -> Response {
    json_request(app, Method::POST, uri, body, Some(token)).await
}

pub async fn put_json_auth(
    app: Router,
    uri: &str,
    body: serde_json::Value,
    token: &str,
) -> Response {
    json_request(app, Method::PUT, uri, body, Some(token)).await
}

pub async fn delete_auth(app: Router, uri: &str, token: &str) -> Response {
    let request = Request::builder()
        .method(Method::DELETE)
        .uri(uri)
        .header(AUTHORIZATION, format!("Bearer {token}"))
        .body(Body::empty())
        .unwrap();
    send(app, request).await
}

/// POST an `application/x-www-form-urlencoded` body.
pub async fn post_form(app: Router, uri: &str, form: &str) -> Response {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(form.to_string()))
        .unwrap();
    send(app, request).await
}

async fn json_request(
    app: Router,
    method: Method,
    uri: &str,
    body: serde_json::Value,
    token: Option<&str>,
) -> Response {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(CONTENT_TYPE, "application/json");
    if let Some(token) = token {
        builder = builder.header(AUTHORIZATION, format!("Bearer {token}"));
    }
    send(app, builder.body(Body::from(body.to_string())).unwrap()).await
}

/// Collect a response body and parse it as JSON.
pub async fn body_json(response: Response) -> serde_json::Value {
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("body should be readable")
        .to_bytes();
    serde_json::from_slice(&bytes).expect("body should be JSON")
}

/// Register a user through the API, asserting 201.
pub async fn register(state: &AppState, username: &str, password: &str) -> serde_json::Value {
    let body = serde_json::json!({
        "first_name": "Juana",
        "last_name": "Falcon",
        "city": "Trujillo",
        "username": username,
        "password": password,
    });
    let response = post_json(build_test_app(state.clone()), "/api/v1/users", body).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await
}

/// Log in through the token endpoint and return the access token.
pub async fn login(state: &AppState, username: &str, password: &str) -> String {
    let form = format!("username={username}&password={password}");
    let response = post_form(build_test_app(state.clone()), "/api/v1/token", &form).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    json["access_token"]
        .as_str()
        .expect("response must contain access_token")
        .to_string()
}
