#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Method, Request, Response, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::{json, Value};
use sqlx::PgPool;
use tower::ServiceExt;

use routewise_api::auth::jwt::JwtConfig;
use routewise_api::config::{ServerConfig, StorageBackend, StorageConfig};
use routewise_api::router::build_app_router;
use routewise_api::state::AppState;
use routewise_storage::{MemoryObjectStore, ObjectStore};

pub const TEST_BUCKET: &str = "routewise-test";
pub const TEST_PASSWORD: &str = "correct-horse-battery";
pub const MULTIPART_BOUNDARY: &str = "routewise-test-boundary";

/// Build a test `ServerConfig` with safe defaults and the memory store.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        shutdown_timeout_secs: 30,
        database_url: String::new(),
        db_max_connections: 5,
        jwt: JwtConfig {
            secret: "test-secret-that-is-long-enough-for-hmac".to_string(),
            expiry_hours: 1,
        },
        storage: StorageConfig {
            backend: StorageBackend::Memory,
            bucket: TEST_BUCKET.to_string(),
            region: None,
            endpoint_url: None,
            timeout_secs: 5,
        },
    }
}

/// Build the full application router over a fresh in-memory object store.
pub fn build_test_app(pool: PgPool) -> Router {
    build_test_app_with_store(pool, Arc::new(MemoryObjectStore::new(TEST_BUCKET)))
}

/// Like [`build_test_app`] over a caller-held store, so tests can inspect
/// stored objects or inject failures.
pub fn build_test_app_with_store(pool: PgPool, store: Arc<dyn ObjectStore>) -> Router {
    let config = test_config();
    let state = AppState::new(pool, config.clone(), store);
    build_app_router(state, &config)
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

pub async fn body_json(response: Response<Body>) -> Value {
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("body should be readable")
        .to_bytes();
    serde_json::from_slice(&bytes).expect("body should be JSON")
}

async fn send(app: Router, request: Request<Body>) -> Response<Body> {
    app.oneshot(request).await.expect("request should not fail")
}

fn json_request(method: Method, uri: &str, token: Option<&str>, body: Option<Value>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {token}"));
    }
    match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    send(app, json_request(Method::GET, uri, None, None)).await
}

pub async fn get_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    send(app, json_request(Method::GET, uri, Some(token), None)).await
}

pub async fn post_json(app: Router, uri: &str, body: Value) -> Response<Body> {
    send(app, json_request(Method::POST, uri, None, Some(body))).await
}

pub async fn post_json_auth(app: Router, uri: &str, body: Value, token: &str) -> Response<Body> {
    send(app, json_request(Method::POST, uri, Some(token), Some(body))).await
}

pub async fn post_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    send(app, json_request(Method::POST, uri, Some(token), None)).await
}

pub async fn put_json_auth(app: Router, uri: &str, body: Value, token: &str) -> Response<Body> {
    send(app, json_request(Method::PUT, uri, Some(token), Some(body))).await
}

pub async fn patch_json_auth(app: Router, uri: &str, body: Value, token: &str) -> Response<Body> {
    send(app, json_request(Method::PATCH, uri, Some(token), Some(body))).await
}

pub async fn delete_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    send(app, json_request(Method::DELETE, uri, Some(token), None)).await
}

/// POST a single-file multipart form with optional `category`.
pub async fn upload_file(
    app: Router,
    uri: &str,
    token: &str,
    file_name: &str,
    content_type: &str,
    bytes: &[u8],
    category: Option<&str>,
) -> Response<Body> {
    let mut body = Vec::new();
    body.extend_from_slice(format!("--{MULTIPART_BOUNDARY}\r\n").as_bytes());
    body.extend_from_slice(
        format!(
            "Content-Disposition: form-data; name=\"file\"; filename=\"{file_name}\"\r\n\
             Content-Type: {content_type}\r\n\r\n"
        )
        .as_bytes(),
    );
    body.extend_from_slice(bytes);
    body.extend_from_slice(b"\r\n");
    if let Some(category) = category {
        body.extend_from_slice(
            format!(
                "--{MULTIPART_BOUNDARY}\r\nContent-Disposition: form-data; name=\"category\"\r\n\r\n{category}\r\n"
            )
            .as_bytes(),
        );
    }
    body.extend_from_slice(format!("--{MULTIPART_BOUNDARY}--\r\n").as_bytes());
    post_multipart(app, uri, token, body).await
}

/// POST a pre-built multipart body delimited by [`MULTIPART_BOUNDARY`].
pub async fn post_multipart(app: Router, uri: &str, token: &str, body: Vec<u8>) -> Response<Body> {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header("authorization", format!("Bearer {token}"))
        .header(
            "content-type",
            format!("multipart/form-data; boundary={MULTIPART_BOUNDARY}"),
        )
        .body(Body::from(body))
        .unwrap();
    send(app, request).await
}

// ---------------------------------------------------------------------------
// Fixtures
// ---------------------------------------------------------------------------

/// Register an organization via the API and return the owner's token.
pub async fn register(app: Router, company: &str, email: &str) -> String {
    let response = post_json(
        app,
        "/api/v1/auth/register",
        json!({
            "email": email,
            "password": TEST_PASSWORD,
            "company_name": company,
            "name": "Owner",
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await["token"]
        .as_str()
        .expect("register returns a token")
        .to_string()
}

/// Create a customer and return its id.
pub async fn create_customer(app: Router, token: &str, name: &str) -> i64 {
    let response = post_json_auth(
        app,
        "/api/v1/customers",
        json!({ "name": name, "phone": "555-0100", "address": "1 Main St" }),
        token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await["data"]["id"].as_i64().unwrap()
}

/// Create a job for a customer and return its id.
pub async fn create_job(app: Router, token: &str, customer_id: i64, title: &str) -> i64 {
    let response = post_json_auth(
        app,
        "/api/v1/jobs",
        json!({
            "customer_id": customer_id,
            "title": title,
            "scheduled_at": "2024-06-01T09:00:00Z",
        }),
        token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await["data"]["id"].as_i64().unwrap()
}
