//! Shared fixtures for module tests

use axum::{
    body::{to_bytes, Body},
    http::{
        header::{AUTHORIZATION, CONTENT_TYPE},
        Method, Request, StatusCode,
    },
    Router,
};
use serde_json::Value;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePool};
use std::str::FromStr;
use std::sync::Arc;
use tempfile::TempDir;
use tower::ServiceExt;

use super::config::GitHubConfig;
use super::migrations::run_migrations;
use super::AppState;
use crate::auth::tokens::SessionKeys;
use crate::services::GitHubService;

pub const TEST_JWT_SECRET: &str = "test_secret_key";

/// File-backed SQLite database in a temp dir, migrated. Keep the `TempDir`
/// alive for as long as the pool is used.
pub async fn setup_test_db() -> (SqlitePool, TempDir) {
    let temp_dir = TempDir::new().unwrap();
    let db_path = temp_dir.path().join("test.db");

    let options =
        SqliteConnectOptions::from_str(&format!("sqlite://{}", db_path.to_string_lossy()))
            .unwrap()
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal);

    let pool = SqlitePool::connect_with(options).await.unwrap();
    run_migrations(&pool, false).await.unwrap();

    (pool, temp_dir)
}

pub fn test_github_config(base_url: &str) -> GitHubConfig {
    GitHubConfig {
        client_id: "test_client_id".to_string(),
        client_secret: "test_client_secret".to_string(),
        oauth_url: base_url.to_string(),
        api_url: base_url.to_string(),
    }
}

/// Application state wired to a fresh database and a GitHub stub at
/// `github_base`. The pool is returned for direct assertions.
pub async fn test_state(github_base: &str) -> (Arc<AppState>, SqlitePool, TempDir) {
    let (pool, dir) = setup_test_db().await;
    let github = Arc::new(GitHubService::new(test_github_config(github_base)));
    let state = AppState::new(pool.clone(), SessionKeys::new(TEST_JWT_SECRET), github);
    (Arc::new(state), pool, dir)
}

/// Sends one request through `router` and returns the status with the JSON
/// body (`Value::Null` when empty).
pub async fn send(
    router: Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(AUTHORIZATION, format!("Bearer {}", token));
    }

    let request = match body {
        Some(json) => builder
            .header(CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = router.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };

    (status, json)
}
