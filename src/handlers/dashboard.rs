use axum::{extract::State, Json};
use chrono::Utc;

use crate::{
    models::dashboard::{
        BuybackPanel, DashboardResponse, PanelState, PricesPanel, RoundPanel, TreasuryPanel,
    },
    services::display,
    AppState,
};

/// Handler for GET /api/dashboard
/// One aggregated view-model assembled from the snapshot store per the
/// configured panel set. Panels still waiting for their first successful
/// poll report `loading: true`; disabled panels are omitted.
pub async fn get_dashboard(State(state): State<AppState>) -> Json<DashboardResponse> {
    let dashboard = &state.config.dashboard;

    let prices_snapshot = state.snapshots.prices();
    let balance_snapshot = state.snapshots.balance();
    let treasury_snapshot = state.snapshots.treasury();
    let round_snapshot = state.snapshots.round();

    let prices = dashboard.panels.prices.then(|| {
        PanelState::from_snapshot(prices_snapshot.clone().map(|p| PricesPanel {
            sol_usd: p.sol_usd,
            ore_usd: p.ore_usd,
            sol_usd_display: display::format_price(p.sol_usd),
            ore_usd_display: display::format_price(p.ore_usd),
            ore_icon: p.ore_icon,
            observed_at: p.observed_at,
        }))
    });

    let buyback = dashboard.panels.buyback.then(|| {
        PanelState::from_snapshot(balance_snapshot.map(|b| BuybackPanel {
            sol_balance: b.sol_balance,
            health: b.health,
            status_label: display::health_status_label(b.health).to_string(),
            observed_at: b.observed_at,
        }))
    });

    let treasury = dashboard.panels.treasury.then(|| {
        PanelState::from_snapshot(treasury_snapshot.clone().map(|t| TreasuryPanel {
            motherlode: t.motherlode,
            motherlode_raw: t.motherlode_raw,
            observed_at: t.observed_at,
        }))
    });

    let round = dashboard.panels.round.then(|| {
        PanelState::from_snapshot(round_snapshot.clone().map(|r| RoundPanel {
            deployed_sol: r.deployed_sol,
            round_id: r.round_id,
            mining_status: r.mining_status,
            status_color: display::mining_status_color(r.mining_status),
            unique_miners: r.unique_miners,
            observed_at: r.observed_at,
        }))
    });

    let production_cost = dashboard.production_cost_enabled.then(|| {
        // streams refresh independently; the estimate may mix snapshot ages
        let deployed_sol = round_snapshot
            .as_ref()
            .map(|r| display::parse_amount(&r.deployed_sol))
            .unwrap_or(0.0);
        let motherlode_ore = treasury_snapshot
            .as_ref()
            .map(|t| display::parse_amount(&t.motherlode))
            .unwrap_or(0.0);
        let unique_miners = round_snapshot
            .as_ref()
            .map(|r| display::parse_amount(&r.unique_miners))
            .unwrap_or(0.0);
        let (sol_usd, ore_usd) = prices_snapshot
            .as_ref()
            .map(|p| (p.sol_usd, p.ore_usd))
            .unwrap_or((0.0, 0.0));

        display::production_cost_estimate(
            deployed_sol,
            motherlode_ore,
            unique_miners,
            sol_usd,
            ore_usd,
        )
    });

    Json(DashboardResponse {
        prices,
        buyback,
        treasury,
        round,
        production_cost,
        timestamp: Utc::now().timestamp_millis(),
    })
}
