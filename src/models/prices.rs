use serde::{Deserialize, Serialize};

/// Success payload for `GET /api/prices`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PricesResponse {
    pub sol: f64,
    pub ore: f64,
    pub ore_icon: String,
    pub timestamp: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PricesFallback {
    pub error: String,
    pub sol: f64,
    pub ore: f64,
}

impl Default for PricesFallback {
    fn default() -> Self {
        Self {
            error: "Failed to fetch prices".to_string(),
            sol: 0.0,
            ore: 0.0,
        }
    }
}
