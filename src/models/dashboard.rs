use serde::{Deserialize, Serialize};

use super::round::MiningStatus;

/// Display color for the mining status chip.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusColor {
    Amber,
    Green,
    Gray,
    Neutral,
}

/// One dashboard panel: `loading` until the first successful poll, then the
/// last known good data. A failed poll never clears `data`.
#[derive(Debug, Clone, Serialize)]
pub struct PanelState<T: Serialize> {
    pub loading: bool,
    #[serde(flatten)]
    pub data: Option<T>,
}

impl<T: Serialize> PanelState<T> {
    pub fn from_snapshot(snapshot: Option<T>) -> Self {
        Self {
            loading: snapshot.is_none(),
            data: snapshot,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PricesPanel {
    pub sol_usd: f64,
    pub ore_usd: f64,
    pub sol_usd_display: String,
    pub ore_usd_display: String,
    pub ore_icon: String,
    pub observed_at: i64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BuybackPanel {
    pub sol_balance: f64,
    pub health: u8,
    pub status_label: String,
    pub observed_at: i64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TreasuryPanel {
    pub motherlode: String,
    pub motherlode_raw: String,
    pub observed_at: Option<i64>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RoundPanel {
    pub deployed_sol: String,
    pub round_id: String,
    pub mining_status: MiningStatus,
    pub status_color: StatusColor,
    pub unique_miners: String,
    pub observed_at: Option<i64>,
}

/// Experimental per-round production cost figures. The whole chain collapses
/// to zero when any upstream value is zero or still loading.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CostEstimate {
    pub cost_per_ore_sol: f64,
    pub cost_per_ore_usd: f64,
    pub miners_per_cost: f64,
    pub ore_multiplier: f64,
}

/// Aggregated view-model for `GET /api/dashboard`. Disabled panels are
/// omitted entirely.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prices: Option<PanelState<PricesPanel>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub buyback: Option<PanelState<BuybackPanel>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub treasury: Option<PanelState<TreasuryPanel>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub round: Option<PanelState<RoundPanel>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub production_cost: Option<CostEstimate>,
    pub timestamp: i64,
}
