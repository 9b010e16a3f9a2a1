//! Test helpers for web API integration tests.

#![allow(dead_code)]

use axum::http::StatusCode;
use axum_test::TestServer;
use serde_json::{json, Value};

use modboard::web::middleware::TokenKeys;
use modboard::{seed, Config, Database, Role, UserRepository, WebServer};

/// JWT secret shared by the test server and hand-made tokens.
pub const TEST_SECRET: &str = "test-secret-key-for-testing-only";

/// Default password for test users.
pub const TEST_PASSWORD: &str = "password123";

/// A running test application.
pub struct TestApp {
    pub server: TestServer,
    pub db: Database,
}

/// Create a test configuration.
pub fn create_test_config() -> Config {
    let mut config = Config::default();
    config.server.host = "127.0.0.1".to_string();
    config.server.port = 0;
    config.auth.jwt_secret = TEST_SECRET.to_string();
    config
}

/// Keys matching the test server's signing secret.
pub fn test_keys() -> TokenKeys {
    TokenKeys::new(TEST_SECRET, 7)
}

/// Create a test server with an in-memory database and the default boards.
pub async fn create_test_app() -> TestApp {
    let config = create_test_config();

    let db = Database::open_in_memory()
        .await
        .expect("Failed to create test database");
    seed::seed_defaults(&db, &config.seed)
        .await
        .expect("Failed to seed test database");

    let router = WebServer::new(&config, db.clone())
        .expect("Failed to create web server")
        .router();
    let server = TestServer::new(router).expect("Failed to create test server");

    TestApp { server, db }
}

/// `Cookie` header value carrying a session token.
pub fn cookie_header(token: &str) -> String {
    format!("token={token}")
}

impl TestApp {
    /// Register a user and return the response body.
    pub async fn register(&self, username: &str, password: &str) -> Value {
        let response = self
            .server
            .post("/api/auth/register")
            .json(&json!({ "username": username, "password": password }))
            .await;
        response.assert_status(StatusCode::CREATED);
        response.json::<Value>()
    }

    /// Log in and return the `Cookie` header value for the session.
    pub async fn login(&self, username: &str, password: &str) -> String {
        let response = self
            .server
            .post("/api/auth/login")
            .json(&json!({ "username": username, "password": password }))
            .await;
        response.assert_status_ok();
        cookie_header(response.cookie("token").value())
    }

    /// Register and log in a user with the given role.
    pub async fn user_with_role(&self, username: &str, role: Role) -> (i64, String) {
        let body = self.register(username, TEST_PASSWORD).await;
        let id = body["user"]["id"].as_i64().expect("user id");
        if role != Role::Member {
            UserRepository::new(self.db.pool())
                .set_role(id, role)
                .await
                .expect("Failed to set role");
        }
        let cookie = self.login(username, TEST_PASSWORD).await;
        (id, cookie)
    }

    /// Create a post as the user behind `cookie` and return its ID.
    pub async fn create_post(&self, cookie: &str, board_id: i64, title: &str) -> i64 {
        let response = self
            .server
            .post("/api/posts")
            .add_header(axum::http::header::COOKIE, cookie.to_string())
            .json(&json!({
                "boardId": board_id,
                "title": title,
                "content": format!("{title} content"),
            }))
            .await;
        response.assert_status(StatusCode::CREATED);
        response.json::<Value>()["postId"]
            .as_i64()
            .expect("post id")
    }

    /// Set a post's status as the reviewer behind `cookie`.
    pub async fn set_status(&self, cookie: &str, post_id: i64, status: Value) -> StatusCode {
        self.server
            .put(&format!("/api/posts/{post_id}"))
            .add_header(axum::http::header::COOKIE, cookie.to_string())
            .json(&json!({ "status": status }))
            .await
            .status_code()
    }

    /// Fetch a post, optionally with a session cookie.
    pub async fn get_post(&self, cookie: Option<&str>, post_id: i64) -> (StatusCode, Value) {
        let mut request = self.server.get(&format!("/api/posts/{post_id}"));
        if let Some(cookie) = cookie {
            request = request.add_header(axum::http::header::COOKIE, cookie.to_string());
        }
        let response = request.await;
        (response.status_code(), response.json::<Value>())
    }
}
