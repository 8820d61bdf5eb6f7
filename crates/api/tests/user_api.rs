//! HTTP tests for the `/users` resource.

mod common;

use axum::http::StatusCode;
use common::{body_json, create_user, delete, get, post_json, put_json};
use serde_json::json;

#[tokio::test]
async fn create_user_returns_201_without_password_hash() {
    let t = common::build_test_app();
    let response = post_json(
        t.app(),
        "/api/v1/users",
        json!({"username": "alice", "email": "alice@x.com", "password": "s3cret-pass"}),
    )
    .await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(json["username"], "alice");
    assert_eq!(json["email"], "alice@x.com");
    assert!(json["id"].is_string());
    assert!(json.get("password_hash").is_none());
    assert!(json.get("password").is_none());
}

#[tokio::test]
async fn duplicate_username_returns_409() {
    let t = common::build_test_app();
    create_user(&t, "alice", "alice@x.com").await;

    let response = post_json(
        t.app(),
        "/api/v1/users",
        json!({"username": "alice", "email": "other@x.com", "password": "s3cret-pass"}),
    )
    .await;

    assert_eq!(response.status(), StatusCode::CONFLICT);
    assert_eq!(body_json(response).await["code"], "CONFLICT");
}

#[tokio::test]
async fn invalid_email_returns_400() {
    let t = common::build_test_app();
    let response = post_json(
        t.app(),
        "/api/v1/users",
        json!({"username": "bob", "email": "not-an-address", "password": "s3cret-pass"}),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn by_email_resolves_user_id() {
    let t = common::build_test_app();
    let id = create_user(&t, "carol", "carol@x.com").await;

    let response = get(t.app(), "/api/v1/users/by-email?email=carol@x.com").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["user_id"], id.as_str());

    let missing = get(t.app(), "/api/v1/users/by-email?email=nobody@x.com").await;
    assert_eq!(missing.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn blank_by_email_query_is_a_validation_error() {
    let t = common::build_test_app();
    let response = get(t.app(), "/api/v1/users/by-email?email=").await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn missing_by_email_query_is_a_bad_request() {
    let t = common::build_test_app();
    let response = get(t.app(), "/api/v1/users/by-email").await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "BAD_REQUEST");
}

#[tokio::test]
async fn malformed_body_is_a_bad_request() {
    let t = common::build_test_app();
    let response = post_json(t.app(), "/api/v1/users", json!({"username": "gina"})).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["code"], "BAD_REQUEST");
    assert!(json["error"].is_string());
}

#[tokio::test]
async fn update_user_changes_username() {
    let t = common::build_test_app();
    let id = create_user(&t, "dave", "dave@x.com").await;

    let response = put_json(
        t.app(),
        &format!("/api/v1/users/{id}"),
        json!({"username": "david"}),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["username"], "david");
    assert_eq!(json["email"], "dave@x.com");
}

#[tokio::test]
async fn deleted_user_returns_404() {
    let t = common::build_test_app();
    let id = create_user(&t, "erin", "erin@x.com").await;

    let response = delete(t.app(), &format!("/api/v1/users/{id}")).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = get(t.app(), &format!("/api/v1/users/{id}")).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_json(response).await["code"], "NOT_FOUND");

    let response = delete(t.app(), &format!("/api/v1/users/{id}")).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
