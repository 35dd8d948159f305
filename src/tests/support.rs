//! Shared scaffolding for the API tests: an in-memory database, a test
//! configuration with a known token secret, and small request helpers.

use axum::{
    body::Body,
    http::{header, Request},
    Router,
};
use http_body_util::BodyExt;
use jsonwebtoken::{encode, EncodingKey, Header};
use serde_json::Value;
use sqlx::sqlite::SqlitePoolOptions;
use tower::ServiceExt;
use uuid::Uuid;

use crate::config::{AppConfig, AuthConfig, DatabaseConfig, ServerConfig};
use crate::routes;
use crate::state::AppState;
use crate::types::TokenClaims;

pub const TEST_SECRET: &str = "test-secret";

pub fn test_config() -> AppConfig {
    AppConfig {
        server: ServerConfig { host: "127.0.0.1".to_string(), port: 8080 },
        database: DatabaseConfig { url: "sqlite::memory:".to_string() },
        auth: AuthConfig {
            token_secret: TEST_SECRET.to_string(),
            token_ttl_minutes: 60,
            secure_cookies: false,
        },
    }
}

/// An app wired exactly like production (same router builder), backed by a
/// single-connection in-memory SQLite database.
pub async fn setup_test_app() -> (Router, AppState) {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .unwrap();

    crate::db::init_db(&pool).await.unwrap();

    let state = AppState::new(pool, test_config());
    let app = routes::router(state.clone());
    (app, state)
}

pub fn json_request(method: &str, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub fn get_request(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

pub async fn body_json(response: axum::response::Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

/// Mints a token the same way `POST /jwt` does, for driving the guard in
/// tests without going through the endpoint first.
pub fn mint_token(secret: &str, email: &str, ttl_seconds: i64) -> String {
    let now = chrono::Utc::now().timestamp();
    let claims = TokenClaims { email: email.to_string(), iat: now, exp: now + ttl_seconds };
    encode(&Header::default(), &claims, &EncodingKey::from_secret(secret.as_bytes())).unwrap()
}

/// Creates a book through the API and returns its id.
pub async fn create_book(app: &Router, body: Value) -> Uuid {
    let response = app.clone().oneshot(json_request("POST", "/books", body)).await.unwrap();
    assert_eq!(response.status(), axum::http::StatusCode::OK);
    let json = body_json(response).await;
    json["id"].as_str().unwrap().parse().unwrap()
}

/// Fetches a book through the API.
pub async fn get_book(app: &Router, id: Uuid) -> Value {
    let response = app.clone().oneshot(get_request(&format!("/books/{}", id))).await.unwrap();
    assert_eq!(response.status(), axum::http::StatusCode::OK);
    body_json(response).await
}
