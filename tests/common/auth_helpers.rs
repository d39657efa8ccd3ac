//! Authentication test helpers
//!
//! Users are created through `POST /auth/sign-up` so the tests exercise
//! the same path real clients take.

use std::sync::Arc;

use axum::http::StatusCode;
use axum_test::{TestRequest, TestServer};
use kanban_board::backend::server::create_app_with_store;
use kanban_board::backend::store::MemoryStore;
use kanban_board::shared::AppConfig;
use serde_json::{json, Value};
use uuid::Uuid;

pub const TEST_PASSWORD: &str = "password123";

/// A signed-up user and their token
#[derive(Debug, Clone)]
pub struct TestUser {
    pub id: Uuid,
    pub username: String,
    pub token: String,
}

/// Test configuration: fixed secret, cheapest bcrypt cost
pub fn test_config() -> AppConfig {
    AppConfig::builder()
        .jwt_secret("integration-test-secret")
        .bcrypt_cost(4)
        .build()
        .expect("valid test config")
}

/// A server over a fresh in-memory store
pub fn test_server() -> TestServer {
    test_server_with_store(test_config()).0
}

/// A server plus a handle on its store, for tests that inspect or tamper
/// with stored documents directly
pub fn test_server_with_store(config: AppConfig) -> (TestServer, Arc<MemoryStore>) {
    let store = Arc::new(MemoryStore::new());
    let app = create_app_with_store(config, store.clone());
    (TestServer::new(app).expect("test server"), store)
}

/// Sign up `username` and fetch its id from `/auth/me`
pub async fn sign_up(server: &TestServer, username: &str) -> TestUser {
    let response = server
        .post("/auth/sign-up")
        .json(&json!({
            "name": format!("{} test", username),
            "username": username,
            "password": TEST_PASSWORD,
        }))
        .await;
    assert_eq!(response.status_code(), StatusCode::CREATED, "{}", response.text());
    let token = response.json::<Value>()["token"]
        .as_str()
        .expect("token in sign-up response")
        .to_string();

    let me: Value = server.get("/auth/me").authorization_bearer(&token).await.json();
    let id = me["id"]
        .as_str()
        .and_then(|id| Uuid::parse_str(id).ok())
        .expect("id in /auth/me response");

    TestUser {
        id,
        username: username.to_string(),
        token,
    }
}

impl TestUser {
    pub fn get(&self, server: &TestServer, path: &str) -> TestRequest {
        server.get(path).authorization_bearer(&self.token)
    }

    pub fn post(&self, server: &TestServer, path: &str) -> TestRequest {
        server.post(path).authorization_bearer(&self.token)
    }

    pub fn put(&self, server: &TestServer, path: &str) -> TestRequest {
        server.put(path).authorization_bearer(&self.token)
    }

    pub fn patch(&self, server: &TestServer, path: &str) -> TestRequest {
        server.patch(path).authorization_bearer(&self.token)
    }

    pub fn delete(&self, server: &TestServer, path: &str) -> TestRequest {
        server.delete(path).authorization_bearer(&self.token)
    }
}

/// Create authorization header value
pub fn auth_header(token: &str) -> String {
    format!("Bearer {}", token)
}
