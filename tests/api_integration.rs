//! HTTP-level tests of the API router on the built-in dataset.

#![cfg(feature = "api")]

mod common;

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use serde_json::Value;
use tower::util::ServiceExt;

use climate_balance::api::{AppState, router};

async fn get(uri: &str) -> (StatusCode, Value) {
    let state = Arc::new(AppState {
        data: common::builtin(),
    });
    let req = Request::builder()
        .uri(uri)
        .body(Body::empty())
        .expect("request should build");
    let resp = router(state).oneshot(req).await.expect("router should respond");
    let status = resp.status();
    let body = axum::body::to_bytes(resp.into_body(), usize::MAX)
        .await
        .expect("body should be readable");
    let json = serde_json::from_slice(&body).expect("body should be JSON");
    (status, json)
}

#[tokio::test]
async fn balance_matches_the_library_result() {
    let (status, json) = get("/balance/09780139/2040").await;
    assert_eq!(status, StatusCode::OK);

    let expected = serde_json::to_value(common::balance(common::RURAL, 2040))
        .expect("balance should serialize");
    assert_eq!(json, expected);
}

#[tokio::test]
async fn indicators_carry_the_request() {
    let (status, json) = get("/balance/11000000/2035/indicators").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["ags"], common::CITY);
    assert_eq!(json["year"], 2035);
    assert!(json["indicators"].is_object());
}

#[tokio::test]
async fn request_errors_map_to_client_statuses() {
    let (status, json) = get("/balance/12345678/2035").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(json["error"].as_str().is_some_and(|e| e.contains("12345678")));

    let (status, _) = get("/balance/DG000000/2051").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn municipalities_are_listed_with_names() {
    let (status, json) = get("/municipalities").await;
    assert_eq!(status, StatusCode::OK);
    let names: Vec<&str> = json
        .as_array()
        .expect("municipalities should be an array")
        .iter()
        .filter_map(|m| m["name"].as_str())
        .collect();
    assert_eq!(names, vec!["Oberstdorf, M", "Berlin", "Deutschland"]);
}
