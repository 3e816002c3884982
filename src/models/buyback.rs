use serde::{Deserialize, Serialize};

/// Success payload for `GET /api/buyback`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BuybackResponse {
    pub sol_balance: f64,
    /// 0-100, derived from the balance against the configured thresholds.
    pub health: u8,
    pub timestamp: i64,
}

/// Fail-safe payload: worst health, not a neutral default.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BuybackFallback {
    pub error: String,
    pub sol_balance: f64,
    pub health: u8,
}

impl Default for BuybackFallback {
    fn default() -> Self {
        Self {
            error: "Failed to fetch buyback data".to_string(),
            sol_balance: 0.0,
            health: 0,
        }
    }
}
