//! HTTP-level integration tests for the read-only `/warnings` resource.

mod common;

use axum::http::StatusCode;
use common::{body_json, get};

#[tokio::test]
async fn default_levels_are_seeded_in_order() {
    let (app, _) = common::build_test_app().await;

    let response = get(app, "/warnings").await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    let levels: Vec<(i64, &str)> = json
        .as_array()
        .unwrap()
        .iter()
        .map(|w| (w["level"].as_i64().unwrap(), w["name"].as_str().unwrap()))
        .collect();
    assert_eq!(
        levels,
        [(1, "Normal"), (2, "Warning"), (3, "Critical"), (4, "Emergency")]
    );
}

#[tokio::test]
async fn get_warning_by_id() {
    let (app, _) = common::build_test_app().await;
    let listed = body_json(get(app.clone(), "/warnings").await).await;
    let emergency = &listed[3];

    let uri = format!("/warnings/{}", emergency["id"].as_str().unwrap());
    let response = get(app, &uri).await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(&body_json(response).await, emergency);
}

#[tokio::test]
async fn unknown_warning_is_404() {
    let (app, _) = common::build_test_app().await;
    let response = get(app, "/warnings/65f1a2b3c4d5e6f708192a3b").await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_json(response).await["error"], "Warning not found");
}

#[tokio::test]
async fn malformed_warning_id_is_400() {
    let (app, _) = common::build_test_app().await;
    let response = get(app, "/warnings/level-four").await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["error"], "Invalid ID");
}
