mod common;

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;

use ore_dashboard_backend::{
    models::round::MiningStatus,
    services::snapshot_store::{BalanceSnapshot, PriceSnapshot, RoundSnapshot, TreasurySnapshot},
    AppState,
};

use crate::common::{api_router, test_config};

async fn get_dashboard_json(app: Router) -> Value {
    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/dashboard")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let body = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&body).unwrap()
}

fn seeded_state(state: &AppState) {
    state.snapshots.set_prices(PriceSnapshot {
        sol_usd: 150.0,
        ore_usd: 2.0,
        ore_icon: "https://ore.supply/assets/icon.png".to_string(),
        observed_at: 1,
    });
    state.snapshots.set_balance(BalanceSnapshot {
        sol_balance: 400.0,
        health: 60,
        observed_at: 2,
    });
    state.snapshots.set_treasury(TreasurySnapshot {
        motherlode: "500.000000000 ORE".to_string(),
        motherlode_raw: "500000000000".to_string(),
        observed_at: Some(3),
        fetched_at: 3,
    });
    state.snapshots.set_round(RoundSnapshot {
        deployed_sol: "2.000000000".to_string(),
        round_id: "99".to_string(),
        mining_status: MiningStatus::Finished,
        unique_miners: "100".to_string(),
        observed_at: None,
        fetched_at: 4,
    });
}

#[tokio::test]
async fn panels_report_loading_before_first_poll() {
    // upstreams never called: the store is read as-is
    let state = AppState::new(test_config("http://127.0.0.1:9"));
    let json = get_dashboard_json(api_router(state)).await;

    for panel in ["prices", "buyback", "treasury", "round"] {
        assert_eq!(json[panel]["loading"], true, "panel {}", panel);
        assert!(
            json[panel].get("solUsd").is_none() && json[panel].get("health").is_none(),
            "loading panel {} must not carry data",
            panel
        );
    }
    assert!(json.get("productionCost").is_none());
    assert!(json["timestamp"].is_i64());
}

#[tokio::test]
async fn seeded_panels_carry_derived_values() {
    let state = AppState::new(test_config("http://127.0.0.1:9"));
    seeded_state(&state);

    let json = get_dashboard_json(api_router(state)).await;

    assert_eq!(json["prices"]["loading"], false);
    assert_eq!(json["prices"]["solUsd"], 150.0);
    assert_eq!(json["prices"]["solUsdDisplay"], "150.00");
    assert_eq!(json["prices"]["oreUsdDisplay"], "2.00");

    assert_eq!(json["buyback"]["health"], 60);
    assert_eq!(json["buyback"]["statusLabel"], "RAISED APPETITE");

    assert_eq!(json["treasury"]["motherlode"], "500.000000000 ORE");

    assert_eq!(json["round"]["miningStatus"], "finished");
    assert_eq!(json["round"]["statusColor"], "green");
    assert_eq!(json["round"]["observedAt"], Value::Null);
}

#[tokio::test]
async fn disabled_panels_are_omitted() {
    let mut config = test_config("http://127.0.0.1:9");
    config.dashboard.panels.round = false;
    config.dashboard.panels.treasury = false;

    let state = AppState::new(config);
    seeded_state(&state);

    let json = get_dashboard_json(api_router(state)).await;

    assert!(json.get("round").is_none());
    assert!(json.get("treasury").is_none());
    assert_eq!(json["prices"]["loading"], false);
    assert_eq!(json["buyback"]["loading"], false);
}

#[tokio::test]
async fn production_cost_appears_only_when_enabled() {
    let mut config = test_config("http://127.0.0.1:9");
    config.dashboard.production_cost_enabled = true;

    let state = AppState::new(config);
    seeded_state(&state);

    let json = get_dashboard_json(api_router(state)).await;

    // 625 * 2 / 500 = 2.5 SOL per ORE
    let cost = &json["productionCost"];
    assert!((cost["costPerOreSol"].as_f64().unwrap() - 2.5).abs() < 1e-9);
    assert!((cost["costPerOreUsd"].as_f64().unwrap() - 375.0).abs() < 1e-9);
    assert!((cost["minersPerCost"].as_f64().unwrap() - (100.0 / 2.5) * 1.11).abs() < 1e-9);
    assert!((cost["oreMultiplier"].as_f64().unwrap() - 187.5).abs() < 1e-9);
}

#[tokio::test]
async fn production_cost_chain_collapses_to_zero_while_loading() {
    let mut config = test_config("http://127.0.0.1:9");
    config.dashboard.production_cost_enabled = true;

    // nothing seeded: every input reads as zero
    let state = AppState::new(config);
    let json = get_dashboard_json(api_router(state)).await;

    let cost = &json["productionCost"];
    assert_eq!(cost["costPerOreSol"], 0.0);
    assert_eq!(cost["costPerOreUsd"], 0.0);
    assert_eq!(cost["minersPerCost"], 0.0);
    assert_eq!(cost["oreMultiplier"], 0.0);
}
