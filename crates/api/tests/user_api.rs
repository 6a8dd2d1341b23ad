//! HTTP-level integration tests for the `/users` resource.

mod common;

use axum::http::StatusCode;
use common::{body_json, delete, get, post_json, put_json};
use std::sync::Arc;

use async_trait::async_trait;
use pipesense_api::auth::password::verify_password;
use pipesense_api::router::build_app_router;
use pipesense_api::state::AppState;
use pipesense_core::types::RecordId;
use pipesense_db::models::user::{CreateUser, UpdateUser, User, UserTokens};
use pipesense_db::repositories::UserRepo;
use pipesense_db::{DbResult, MemoryStore};
use serde_json::{json, Value};

/// User store whose token writes never match a record.
struct TokenlessUsers(Arc<MemoryStore>);

#[async_trait]
impl UserRepo for TokenlessUsers {
    async fn create(&self, input: &CreateUser) -> DbResult<User> {
        self.0.create(input).await
    }

    async fn find_by_id(&self, id: RecordId) -> DbResult<Option<User>> {
        UserRepo::find_by_id(self.0.as_ref(), id).await
    }

    async fn find_by_username(&self, username: &str) -> DbResult<Option<User>> {
        self.0.find_by_username(username).await
    }

    async fn list(&self) -> DbResult<Vec<User>> {
        UserRepo::list(self.0.as_ref()).await
    }

    async fn update(&self, id: RecordId, input: &UpdateUser) -> DbResult<bool> {
        UserRepo::update(self.0.as_ref(), id, input).await
    }

    async fn set_tokens(&self, _id: RecordId, _tokens: &UserTokens) -> DbResult<bool> {
        Ok(false)
    }

    async fn delete(&self, id: RecordId) -> DbResult<bool> {
        UserRepo::delete(self.0.as_ref(), id).await
    }
}

fn app_without_token_storage() -> (axum::Router, Arc<MemoryStore>) {
    let store = Arc::new(MemoryStore::new());
    let config = common::test_config();
    let mut state = AppState::new(Arc::clone(&store), config.clone());
    state.users = Arc::new(TokenlessUsers(Arc::clone(&store)));
    (build_app_router(state, &config), store)
}

async fn create_user(app: &axum::Router, username: &str, password: &str) -> Value {
    let response = post_json(
        app.clone(),
        "/users",
        json!({
            "username": username,
            "email": format!("{username}@example.com"),
            "organization": "PTT",
            "password": password,
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await
}

#[tokio::test]
async fn create_hashes_password_and_issues_tokens() {
    let (app, store) = common::build_test_app().await;
    let created = create_user(&app, "alice", "hunter22").await;

    assert_eq!(created["password"], "");
    assert!(created["token"].is_string());
    assert!(created["refresh_token"].is_string());
    assert!(created["token_expiry"].is_string());

    let stored = store.find_by_username("alice").await.unwrap().unwrap();
    assert_ne!(stored.password_hash, "hunter22");
    assert!(verify_password("hunter22", &stored.password_hash).unwrap());
    assert_eq!(stored.token.as_deref(), created["token"].as_str());
}

#[tokio::test]
async fn password_is_blank_in_get_and_list() {
    let (app, _) = common::build_test_app().await;
    let created = create_user(&app, "bob", "pw").await;
    let id = created["id"].as_str().unwrap();

    let fetched = body_json(get(app.clone(), &format!("/users/{id}")).await).await;
    assert_eq!(fetched["id"], created["id"]);
    assert_eq!(fetched["password"], "");

    let listed = body_json(get(app, "/users").await).await;
    let users = listed.as_array().unwrap();
    assert_eq!(users.len(), 1);
    assert_eq!(users[0]["password"], "");
}

#[tokio::test]
async fn update_with_empty_password_keeps_existing_hash() {
    let (app, store) = common::build_test_app().await;
    let created = create_user(&app, "carol", "original").await;
    let id = created["id"].as_str().unwrap();

    let response = put_json(app, &format!("/users/{id}"), json!({ "username": "carol2" })).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["message"], "User updated successfully");

    let stored = store.find_by_username("carol2").await.unwrap().unwrap();
    assert!(verify_password("original", &stored.password_hash).unwrap());
    assert_eq!(stored.email, "carol@example.com");
}

#[tokio::test]
async fn update_with_new_password_rehashes() {
    let (app, store) = common::build_test_app().await;
    let created = create_user(&app, "dave", "old-pass").await;
    let id = created["id"].as_str().unwrap();

    let response = put_json(
        app,
        &format!("/users/{id}"),
        json!({ "username": "dave", "password": "new-pass" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let stored = store.find_by_username("dave").await.unwrap().unwrap();
    assert!(verify_password("new-pass", &stored.password_hash).unwrap());
    assert!(!verify_password("old-pass", &stored.password_hash).unwrap());
}

#[tokio::test]
async fn unknown_user_is_404_for_get_update_delete() {
    let (app, _) = common::build_test_app().await;
    let uri = "/users/65f1a2b3c4d5e6f708192a3b";

    let response = get(app.clone(), uri).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_json(response).await["error"], "User not found");

    let response = put_json(app.clone(), uri, json!({ "username": "x" })).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    assert_eq!(delete(app, uri).await.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn delete_removes_user() {
    let (app, _) = common::build_test_app().await;
    let created = create_user(&app, "erin", "pw").await;
    let uri = format!("/users/{}", created["id"].as_str().unwrap());

    let response = delete(app.clone(), &uri).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["message"], "User deleted successfully");
    assert_eq!(get(app, &uri).await.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn batch_register_creates_each_user_with_blank_password() {
    let (app, store) = common::build_test_app().await;
    let response = post_json(
        app,
        "/users/batch-register",
        json!([
            { "username": "u1", "password": "p1" },
            { "username": "u2", "password": "p2" },
        ]),
    )
    .await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(json["successful_registrations"], 2);
    assert_eq!(json["failed_registrations"], 0);
    for user in json["users"].as_array().unwrap() {
        assert_eq!(user["password"], "");
        assert!(user["token"].is_string());
    }

    let stored = store.find_by_username("u2").await.unwrap().unwrap();
    assert!(verify_password("p2", &stored.password_hash).unwrap());
}

#[tokio::test]
async fn batch_register_rejects_non_array_body() {
    let (app, _) = common::build_test_app().await;
    let response = post_json(app, "/users/batch-register", json!({ "username": "solo" })).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(body_json(response).await["error"].is_string());
}

#[tokio::test]
async fn create_leaves_no_user_when_tokens_cannot_be_stored() {
    let (app, store) = app_without_token_storage();

    let response = post_json(
        app,
        "/users",
        json!({ "username": "frank", "password": "pw" }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert!(UserRepo::list(store.as_ref()).await.unwrap().is_empty());
}

#[tokio::test]
async fn batch_report_matches_store_when_tokens_cannot_be_stored() {
    let (app, store) = app_without_token_storage();

    let response = post_json(
        app,
        "/users/batch-register",
        json!([{ "username": "g1", "password": "p" }, { "username": "g2", "password": "p" }]),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["successful_registrations"], 0);
    assert_eq!(json["failed_registrations"], 2);
    assert_eq!(json["errors"][0], "Error generating tokens for user: g1");
    assert!(UserRepo::list(store.as_ref()).await.unwrap().is_empty());
}
