use axum::{
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use serde_json::{json, Value};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use ore_dashboard_backend::{
    config::{Config, DashboardConfig, PanelSet, PollIntervals},
    handlers, AppState,
};

/// Bind a stub upstream on an ephemeral port and serve it for the rest of
/// the test process. Returns its base URL.
#[allow(dead_code)]
pub async fn spawn_upstream(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind stub upstream");
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });

    format!("http://{}", addr)
}

/// Config with every upstream pointed at `upstream_base` and short cache
/// windows so tests observe fresh fetches.
#[allow(dead_code)]
pub fn test_config(upstream_base: &str) -> Config {
    Config {
        bind_addr: "127.0.0.1:0".to_string(),
        solana_rpc_url: upstream_base.to_string(),
        buyback_address: "TestBuybackAddress1111111111111111111111111".to_string(),
        state_api_base: upstream_base.to_string(),
        coingecko_base_url: upstream_base.to_string(),
        coingecko_api_key: None,
        dexscreener_base_url: upstream_base.to_string(),
        ore_token_address: "TestOreMint11111111111111111111111111111111".to_string(),
        ore_icon_url: "https://ore.supply/assets/icon.png".to_string(),
        min_sol: 0.0,
        max_sol: 1000.0,
        balance_cache_secs: 1,
        treasury_cache_secs: 1,
        round_cache_secs: 1,
        price_cache_secs: 1,
        model_dir: "assets/hawg-3d".to_string(),
        model_file: "base.obj".to_string(),
        dashboard: DashboardConfig {
            panels: PanelSet {
                prices: true,
                buyback: true,
                treasury: true,
                round: true,
            },
            intervals: PollIntervals {
                prices_secs: 1,
                buyback_secs: 1,
                treasury_secs: 1,
                round_secs: 1,
            },
            production_cost_enabled: false,
        },
    }
}

/// Router wired like the production binary's API surface.
#[allow(dead_code)]
pub fn api_router(state: AppState) -> Router {
    Router::new()
        .route("/api/buyback", get(handlers::buyback::get_buyback))
        .route("/api/motherlode", get(handlers::motherlode::get_motherlode))
        .route("/api/round", get(handlers::round::get_round))
        .route("/api/prices", get(handlers::prices::get_prices))
        .route("/api/dashboard", get(handlers::dashboard::get_dashboard))
        .route("/api/model", get(handlers::model::get_model_metadata))
        .with_state(state)
}

#[allow(dead_code)]
pub fn sample_state_json() -> Value {
    json!({
        "treasury": {
            "motherlodeFormatted": "8123.987654321 ORE",
            "motherlodeRaw": "8123987654321",
            "observedAt": 1722900000000i64,
        },
        "round": {
            "roundId": "417",
            "observedAt": 1722900001000i64,
            "uniqueMiners": "132",
            "totals": { "deployedSol": "3.500000000" },
            "mining": { "status": "active" },
        },
    })
}

/// Every upstream behaving: RPC balance, aggregate state, SOL quote, pairs.
#[allow(dead_code)]
pub fn healthy_upstream() -> Router {
    Router::new()
        .route(
            "/",
            post(|| async {
                Json(json!({
                    "jsonrpc": "2.0",
                    "result": { "context": { "slot": 1 }, "value": 12_345_678_900u64 },
                    "id": 1,
                }))
            }),
        )
        .route("/state", get(|| async { Json(sample_state_json()) }))
        .route(
            "/simple/price",
            get(|| async { Json(json!({ "solana": { "usd": 168.0 } })) }),
        )
        .route(
            "/latest/dex/tokens/{token}",
            get(|| async { Json(json!({ "pairs": [{ "priceUsd": "1.25" }] })) }),
        )
}

/// Every upstream down with a 500.
#[allow(dead_code)]
pub fn failing_upstream() -> Router {
    Router::new()
        .route("/", post(|| async { StatusCode::INTERNAL_SERVER_ERROR }))
        .route("/state", get(|| async { StatusCode::INTERNAL_SERVER_ERROR }))
        .route(
            "/simple/price",
            get(|| async { StatusCode::INTERNAL_SERVER_ERROR }),
        )
        .route(
            "/latest/dex/tokens/{token}",
            get(|| async { StatusCode::INTERNAL_SERVER_ERROR }),
        )
}

/// `/state` stub that counts hits; `fail` makes it answer 500.
#[allow(dead_code)]
pub fn counting_state_upstream(hits: Arc<AtomicUsize>, fail: bool) -> Router {
    Router::new().route(
        "/state",
        get(move || {
            let hits = hits.clone();
            async move {
                hits.fetch_add(1, Ordering::SeqCst);
                if fail {
                    StatusCode::INTERNAL_SERVER_ERROR.into_response()
                } else {
                    Json(sample_state_json()).into_response()
                }
            }
        }),
    )
}
