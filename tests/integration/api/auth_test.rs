//! Authentication API integration tests

use axum::http::{header::AUTHORIZATION, HeaderValue, StatusCode};
use serde_json::{json, Value};

use crate::common::{auth_header, sign_up, test_server, TEST_PASSWORD};

#[tokio::test]
async fn test_sign_up_and_me() {
    let server = test_server();
    let user = sign_up(&server, "ada").await;

    let response = user.get(&server, "/auth/me").await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["username"], "ada");
    assert_eq!(body["name"], "ada test");
    assert!(body.get("passwordHash").is_none());
    assert!(body.get("password_hash").is_none());
}

#[tokio::test]
async fn test_sign_up_duplicate_username() {
    let server = test_server();
    sign_up(&server, "ada").await;

    let response = server
        .post("/auth/sign-up")
        .json(&json!({ "username": "ada", "password": TEST_PASSWORD }))
        .await;

    crate::assert_error_kind!(response, StatusCode::CONFLICT, "ConflictError");
}

#[tokio::test]
async fn test_sign_up_validation() {
    let server = test_server();

    let short = server
        .post("/auth/sign-up")
        .json(&json!({ "username": "ada", "password": "short" }))
        .await;
    crate::assert_error_kind!(short, StatusCode::BAD_REQUEST, "ValidationError");

    let missing = server
        .post("/auth/sign-up")
        .json(&json!({ "password": TEST_PASSWORD }))
        .await;
    crate::assert_error_kind!(missing, StatusCode::BAD_REQUEST, "ValidationError");
}

#[tokio::test]
async fn test_sign_in() {
    let server = test_server();
    sign_up(&server, "ada").await;

    let response = server
        .post("/auth/sign-in")
        .json(&json!({ "username": "ada", "password": TEST_PASSWORD }))
        .await;
    response.assert_status_ok();
    let token = response.json::<Value>()["token"].as_str().unwrap().to_string();

    let me = server
        .get("/auth/me")
        .add_header(AUTHORIZATION, HeaderValue::from_str(&auth_header(&token)).unwrap())
        .await;
    me.assert_status_ok();
}

#[tokio::test]
async fn test_sign_in_invalid_credentials() {
    let server = test_server();
    sign_up(&server, "ada").await;

    for body in [
        json!({ "username": "ada", "password": "wrong-password" }),
        json!({ "username": "nobody", "password": TEST_PASSWORD }),
    ] {
        let response = server.post("/auth/sign-in").json(&body).await;
        response.assert_status_unauthorized();
        assert_eq!(response.json::<Value>()["error"], "Invalid credentials");
    }
}

#[tokio::test]
async fn test_protected_routes_require_token() {
    let server = test_server();

    for path in ["/auth/me", "/boards", "/boards/users"] {
        let response = server.get(path).await;
        response.assert_status_unauthorized();
        assert_eq!(response.json::<Value>()["error"], "invalid token");
    }

    let garbage = server
        .get("/boards")
        .authorization_bearer("not-a-jwt")
        .await;
    garbage.assert_status_unauthorized();
}

#[tokio::test]
async fn test_health_is_public() {
    let server = test_server();

    let response = server.get("/health").await;

    response.assert_status_ok();
    response.assert_json(&json!({ "status": "ok", "store": "memory" }));
}

#[tokio::test]
async fn test_unknown_route_is_json_404() {
    let server = test_server();
    let response = server.get("/nowhere").await;
    crate::assert_error_kind!(response, StatusCode::NOT_FOUND, "NotFoundError");
}
