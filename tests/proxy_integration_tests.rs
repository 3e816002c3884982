mod common;

use axum::{
    body::Body,
    http::{Request, StatusCode},
    routing::{get, post},
    Json, Router,
};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;

use ore_dashboard_backend::AppState;

use crate::common::{
    api_router, failing_upstream, healthy_upstream, sample_state_json, spawn_upstream, test_config,
};

async fn get_json(app: Router, uri: &str) -> (StatusCode, Value) {
    let response = app
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();

    let status = response.status();
    let body = response.into_body().collect().await.unwrap().to_bytes();
    let json: Value = serde_json::from_slice(&body).unwrap();
    (status, json)
}

#[tokio::test]
async fn buyback_returns_balance_and_health() {
    let upstream = spawn_upstream(healthy_upstream()).await;
    let app = api_router(AppState::new(test_config(&upstream)));

    let (status, json) = get_json(app, "/api/buyback").await;

    assert_eq!(status, StatusCode::OK);
    // 12_345_678_900 lamports = 12.3456789 SOL
    assert!((json["solBalance"].as_f64().unwrap() - 12.3456789).abs() < 1e-9);
    // round(100 * (1000 - 12.3456789) / 1000) = 99
    assert_eq!(json["health"], 99);
    assert!(json["timestamp"].is_i64());
}

#[tokio::test]
async fn buyback_upstream_failure_is_worst_health() {
    let upstream = spawn_upstream(failing_upstream()).await;
    let app = api_router(AppState::new(test_config(&upstream)));

    let (status, json) = get_json(app, "/api/buyback").await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json["error"], "Failed to fetch buyback data");
    assert_eq!(json["solBalance"], 0.0);
    assert_eq!(json["health"], 0);
}

#[tokio::test]
async fn buyback_malformed_upstream_json_is_worst_health() {
    let upstream = spawn_upstream(Router::new().route("/", post(|| async { "not json" }))).await;
    let app = api_router(AppState::new(test_config(&upstream)));

    let (status, json) = get_json(app, "/api/buyback").await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json["health"], 0);
}

#[tokio::test]
async fn buyback_missing_result_value_counts_as_empty_account() {
    let upstream = spawn_upstream(Router::new().route(
        "/",
        post(|| async { Json(json!({ "jsonrpc": "2.0", "id": 1 })) }),
    ))
    .await;
    let app = api_router(AppState::new(test_config(&upstream)));

    let (status, json) = get_json(app, "/api/buyback").await;

    // an empty account is a valid answer: zero balance, full health
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["solBalance"], 0.0);
    assert_eq!(json["health"], 100);
}

#[tokio::test]
async fn motherlode_extracts_treasury_fields() {
    let upstream = spawn_upstream(healthy_upstream()).await;
    let app = api_router(AppState::new(test_config(&upstream)));

    let (status, json) = get_json(app, "/api/motherlode").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["motherlode"], "8123.987654321 ORE");
    assert_eq!(json["motherlodeRaw"], "8123987654321");
    assert_eq!(json["observedAt"], 1722900000000i64);
    assert!(json["timestamp"].is_i64());
}

#[tokio::test]
async fn motherlode_missing_fields_default_to_zero() {
    let upstream =
        spawn_upstream(Router::new().route("/state", get(|| async { Json(json!({})) }))).await;
    let app = api_router(AppState::new(test_config(&upstream)));

    let (status, json) = get_json(app, "/api/motherlode").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["motherlode"], "0.000000000 ORE");
    assert_eq!(json["motherlodeRaw"], "0");
    assert_eq!(json["observedAt"], Value::Null);
}

#[tokio::test]
async fn motherlode_upstream_failure_is_zero_default() {
    let upstream = spawn_upstream(failing_upstream()).await;
    let app = api_router(AppState::new(test_config(&upstream)));

    let (status, json) = get_json(app, "/api/motherlode").await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json["error"], "Failed to fetch motherlode");
    assert_eq!(json["motherlode"], "0.000000000 ORE");
    assert_eq!(json["motherlodeRaw"], "0");
}

#[tokio::test]
async fn round_extracts_round_fields() {
    let upstream = spawn_upstream(healthy_upstream()).await;
    let app = api_router(AppState::new(test_config(&upstream)));

    let (status, json) = get_json(app, "/api/round").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["deployedSol"], "3.500000000");
    assert_eq!(json["roundId"], "417");
    assert_eq!(json["miningStatus"], "active");
    assert_eq!(json["uniqueMiners"], "132");
    assert_eq!(json["observedAt"], 1722900001000i64);
}

#[tokio::test]
async fn round_unknown_status_normalizes_to_idle() {
    let upstream = spawn_upstream(Router::new().route(
        "/state",
        get(|| async {
            let mut state = sample_state_json();
            state["round"]["mining"]["status"] = json!("paused");
            Json(state)
        }),
    ))
    .await;
    let app = api_router(AppState::new(test_config(&upstream)));

    let (status, json) = get_json(app, "/api/round").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["miningStatus"], "idle");
}

#[tokio::test]
async fn round_upstream_failure_is_zero_default() {
    let upstream = spawn_upstream(failing_upstream()).await;
    let app = api_router(AppState::new(test_config(&upstream)));

    let (status, json) = get_json(app, "/api/round").await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json["error"], "Failed to fetch round data");
    assert_eq!(json["deployedSol"], "0.000000000");
    assert_eq!(json["roundId"], "0");
    assert_eq!(json["miningStatus"], "idle");
    assert_eq!(json["uniqueMiners"], "0");
}

#[tokio::test]
async fn prices_returns_both_quotes() {
    let upstream = spawn_upstream(healthy_upstream()).await;
    let app = api_router(AppState::new(test_config(&upstream)));

    let (status, json) = get_json(app, "/api/prices").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["sol"], 168.0);
    assert_eq!(json["ore"], 1.25);
    assert_eq!(json["oreIcon"], "https://ore.supply/assets/icon.png");
    assert!(json["timestamp"].is_i64());
}

#[tokio::test]
async fn prices_primary_source_failure_is_500() {
    // SOL quote down, pair lookup fine
    let upstream = spawn_upstream(
        Router::new()
            .route(
                "/simple/price",
                get(|| async { StatusCode::INTERNAL_SERVER_ERROR }),
            )
            .route(
                "/latest/dex/tokens/{token}",
                get(|| async { Json(json!({ "pairs": [{ "priceUsd": "1.25" }] })) }),
            ),
    )
    .await;
    let app = api_router(AppState::new(test_config(&upstream)));

    let (status, json) = get_json(app, "/api/prices").await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json["error"], "Failed to fetch prices");
    assert_eq!(json["sol"], 0.0);
    assert_eq!(json["ore"], 0.0);
}

#[tokio::test]
async fn prices_secondary_source_failure_degrades_to_zero() {
    // SOL quote fine, pair lookup down
    let upstream = spawn_upstream(
        Router::new()
            .route(
                "/simple/price",
                get(|| async { Json(json!({ "solana": { "usd": 168.0 } })) }),
            )
            .route(
                "/latest/dex/tokens/{token}",
                get(|| async { StatusCode::INTERNAL_SERVER_ERROR }),
            ),
    )
    .await;
    let app = api_router(AppState::new(test_config(&upstream)));

    let (status, json) = get_json(app, "/api/prices").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["sol"], 168.0);
    assert_eq!(json["ore"], 0.0);
}
