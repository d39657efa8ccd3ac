//! Board and column API integration tests

use axum::http::StatusCode;
use axum_test::TestServer;
use pretty_assertions::assert_eq;
use serde_json::{json, Value};

use crate::common::{sign_up, test_server, TestUser};

async fn create_board(server: &TestServer, user: &TestUser, title: &str) -> Value {
    let response = user
        .post(server, "/boards")
        .json(&json!({ "title": title }))
        .await;
    response.assert_status(StatusCode::CREATED);
    response.json()
}

async fn add_column(server: &TestServer, user: &TestUser, board_id: &str, title: &str) -> Value {
    let response = user
        .post(server, &format!("/boards/{}/columns", board_id))
        .json(&json!({ "title": title }))
        .await;
    response.assert_status(StatusCode::CREATED);
    response.json()
}

async fn column_titles(server: &TestServer, user: &TestUser, board_id: &str) -> Vec<(String, i64)> {
    let board: Value = user.get(server, &format!("/boards/{}", board_id)).await.json();
    board["columns"]
        .as_array()
        .unwrap()
        .iter()
        .map(|c| {
            (
                c["title"].as_str().unwrap().to_string(),
                c["position"].as_i64().unwrap(),
            )
        })
        .collect()
}

#[tokio::test]
async fn test_board_lifecycle() {
    let server = test_server();
    let owner = sign_up(&server, "owner").await;

    let board = create_board(&server, &owner, "Roadmap").await;
    let board_id = board["id"].as_str().unwrap();
    assert_eq!(board["ownerId"], owner.id.to_string());
    assert!(board["startDate"].is_string());

    let listed: Value = owner.get(&server, "/boards").await.json();
    assert_eq!(listed["boards"].as_array().unwrap().len(), 1);

    let renamed = owner
        .put(&server, &format!("/boards/{}", board_id))
        .json(&json!({ "title": "Renamed" }))
        .await;
    renamed.assert_status_ok();
    assert_eq!(renamed.json::<Value>()["title"], "Renamed");

    owner
        .delete(&server, &format!("/boards/{}", board_id))
        .await
        .assert_status(StatusCode::NO_CONTENT);
    owner
        .get(&server, &format!("/boards/{}", board_id))
        .await
        .assert_status_not_found();
}

#[tokio::test]
async fn test_create_board_requires_title() {
    let server = test_server();
    let owner = sign_up(&server, "owner").await;

    let response = owner.post(&server, "/boards").json(&json!({})).await;
    crate::assert_error_kind!(response, StatusCode::BAD_REQUEST, "ValidationError");
}

#[tokio::test]
async fn test_membership() {
    let server = test_server();
    let owner = sign_up(&server, "owner").await;
    let member = sign_up(&server, "member").await;
    let outsider = sign_up(&server, "outsider").await;
    let board = create_board(&server, &owner, "Roadmap").await;
    let path = format!("/boards/{}", board["id"].as_str().unwrap());

    member.get(&server, &path).await.assert_status_forbidden();

    let added = owner
        .put(&server, &path)
        .json(&json!({ "username": "member" }))
        .await;
    added.assert_status_ok();
    assert_eq!(added.json::<Value>()["memberIds"], json!([member.id]));

    member.get(&server, &path).await.assert_status_ok();
    outsider.get(&server, &path).await.assert_status_forbidden();

    let by_member = member
        .put(&server, &path)
        .json(&json!({ "username": "outsider" }))
        .await;
    crate::assert_error_kind!(by_member, StatusCode::FORBIDDEN, "AuthorizationError");

    let unknown = owner
        .put(&server, &path)
        .json(&json!({ "username": "ghost" }))
        .await;
    unknown.assert_status_not_found();

    member
        .delete(&server, &path)
        .await
        .assert_status_forbidden();

    let removed = owner
        .put(&server, &path)
        .json(&json!({ "removeUsername": "member" }))
        .await;
    assert_eq!(removed.json::<Value>()["memberIds"], json!([]));
    member.get(&server, &path).await.assert_status_forbidden();
}

#[tokio::test]
async fn test_list_users_for_member_picker() {
    let server = test_server();
    let owner = sign_up(&server, "owner").await;
    sign_up(&server, "member").await;

    let users: Value = owner.get(&server, "/boards/users").await.json();
    let names: Vec<&str> = users
        .as_array()
        .unwrap()
        .iter()
        .map(|u| u["username"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["member", "owner"]);
}

#[tokio::test]
async fn test_columns_add_rename_reorder_delete() {
    let server = test_server();
    let owner = sign_up(&server, "owner").await;
    let board = create_board(&server, &owner, "Roadmap").await;
    let board_id = board["id"].as_str().unwrap();

    let todo = add_column(&server, &owner, board_id, "Todo").await;
    let doing = add_column(&server, &owner, board_id, "Doing").await;
    let done = add_column(&server, &owner, board_id, "Done").await;
    assert_eq!(done["position"], 2);

    let renamed = owner
        .put(&server, &format!("/boards/{}/columns/{}", board_id, doing["id"].as_str().unwrap()))
        .json(&json!({ "title": "In progress" }))
        .await;
    renamed.assert_status_ok();

    let reordered = owner
        .put(&server, &format!("/boards/{}/columns/reorder", board_id))
        .json(&json!({ "orderedColumnIds": [done["id"], todo["id"], doing["id"]] }))
        .await;
    reordered.assert_status_ok();
    assert_eq!(
        column_titles(&server, &owner, board_id).await,
        vec![
            ("Done".to_string(), 0),
            ("Todo".to_string(), 1),
            ("In progress".to_string(), 2)
        ]
    );

    owner
        .delete(&server, &format!("/boards/{}/columns/{}", board_id, todo["id"].as_str().unwrap()))
        .await
        .assert_status(StatusCode::NO_CONTENT);
    assert_eq!(
        column_titles(&server, &owner, board_id).await,
        vec![("Done".to_string(), 0), ("In progress".to_string(), 1)]
    );
}

#[tokio::test]
async fn test_reorder_columns_missing_id_changes_nothing() {
    let server = test_server();
    let owner = sign_up(&server, "owner").await;
    let board = create_board(&server, &owner, "Roadmap").await;
    let board_id = board["id"].as_str().unwrap();
    let a = add_column(&server, &owner, board_id, "A").await;
    let b = add_column(&server, &owner, board_id, "B").await;
    add_column(&server, &owner, board_id, "C").await;

    let response = owner
        .put(&server, &format!("/boards/{}/columns/reorder", board_id))
        .json(&json!({ "orderedColumnIds": [b["id"], a["id"]] }))
        .await;

    crate::assert_error_kind!(response, StatusCode::BAD_REQUEST, "InvalidReorderError");
    assert_eq!(
        column_titles(&server, &owner, board_id).await,
        vec![("A".to_string(), 0), ("B".to_string(), 1), ("C".to_string(), 2)]
    );
}

#[tokio::test]
async fn test_rename_unknown_column_is_not_found() {
    let server = test_server();
    let owner = sign_up(&server, "owner").await;
    let board = create_board(&server, &owner, "Roadmap").await;

    let response = owner
        .put(
            &server,
            &format!("/boards/{}/columns/{}", board["id"].as_str().unwrap(), uuid::Uuid::new_v4()),
        )
        .json(&json!({ "title": "x" }))
        .await;
    crate::assert_error_kind!(response, StatusCode::NOT_FOUND, "NotFoundError");
}
