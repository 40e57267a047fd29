//! Shared test helpers for integration tests.
//!
//! Tests run against the PostgreSQL database named by
//! `COMMENTS_TEST_DATABASE_URL` and are skipped when it is unset.

#![allow(dead_code)]

use axum::Router;
use axum::body::Body;
use http::{Request, StatusCode};
use serde_json::Value;
use tower::ServiceExt;
use uuid::Uuid;

use comments_api::{AppState, build_app};
use comments_core::config::AppConfig;
use comments_database::DatabasePool;

/// Environment variable naming the test database.
pub const DATABASE_URL_VAR: &str = "COMMENTS_TEST_DATABASE_URL";

/// Test application context
pub struct TestApp {
    /// The Axum router for making test requests
    pub router: Router,
    /// Database pool for direct queries
    pub db_pool: DatabasePool,
    /// Application config
    pub config: AppConfig,
}

/// Response captured from the router
pub struct TestResponse {
    pub status: StatusCode,
    pub body: Value,
}

impl TestApp {
    /// Create a new test application, or `None` when no database is configured.
    pub async fn new() -> Option<Self> {
        let Ok(url) = std::env::var(DATABASE_URL_VAR) else {
            eprintln!("{DATABASE_URL_VAR} is not set, skipping");
            return None;
        };

        let config = AppConfig::from_toml(&format!(
            r#"
            [database]
            url = "{url}"
            max_connections = 4
            min_connections = 0

            [comments]
            number_template = "!{{0:000}}"
            "#
        ))
        .expect("Failed to parse test config");

        let db_pool = DatabasePool::connect(&config.database)
            .await
            .expect("Failed to connect to test database");

        comments_database::migration::run_migrations(db_pool.pool())
            .await
            .expect("Failed to run migrations");

        let router = build_app(AppState::new(config.clone(), db_pool.clone()));

        Some(Self {
            router,
            db_pool,
            config,
        })
    }

    /// Insert a comment that has not been numbered yet.
    pub async fn insert_unnumbered_comment(&self, message: &str) -> Uuid {
        sqlx::query_scalar("INSERT INTO comments (message, number) VALUES ($1, '') RETURNING id")
            .bind(message)
            .fetch_one(self.db_pool.pool())
            .await
            .expect("Failed to insert comment")
    }

    /// Add a comment through the API and return its ID.
    pub async fn add_comment(&self, message: &str) -> Uuid {
        let response = self
            .request(
                "POST",
                "/api/comments/add",
                Some(serde_json::json!({ "message": message })),
            )
            .await;
        assert_eq!(response.status, StatusCode::OK, "{}", response.body);

        response.body["data"]
            .as_str()
            .and_then(|id| id.parse().ok())
            .expect("add returns the new id")
    }

    /// Make an HTTP request to the test app
    pub async fn request(&self, method: &str, uri: &str, body: Option<Value>) -> TestResponse {
        let body = match body {
            Some(b) => Body::from(serde_json::to_vec(&b).expect("Failed to encode body")),
            None => Body::empty(),
        };
        let req = Request::builder()
            .method(method)
            .uri(uri)
            .header("Content-Type", "application/json")
            .body(body)
            .expect("Failed to build request");

        let response = self
            .router
            .clone()
            .oneshot(req)
            .await
            .expect("Failed to execute request");

        let status = response.status();
        let body_bytes = axum::body::to_bytes(response.into_body(), 1024 * 1024)
            .await
            .expect("Failed to read body");
        let body = serde_json::from_slice(&body_bytes).unwrap_or(Value::Null);

        TestResponse { status, body }
    }
}

/// A message no other test run uses.
pub fn unique_message(prefix: &str) -> String {
    format!("{prefix} {}", Uuid::new_v4())
}
