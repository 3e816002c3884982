use serde::{Deserialize, Serialize};

/// Success payload for `GET /api/motherlode`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MotherlodeResponse {
    /// Display string, e.g. "123.456789000 ORE".
    pub motherlode: String,
    /// Raw integer amount in base units, as reported upstream.
    pub motherlode_raw: String,
    pub observed_at: Option<i64>,
    pub timestamp: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MotherlodeFallback {
    pub error: String,
    pub motherlode: String,
    pub motherlode_raw: String,
}

impl Default for MotherlodeFallback {
    fn default() -> Self {
        Self {
            error: "Failed to fetch motherlode".to_string(),
            motherlode: "0.000000000 ORE".to_string(),
            motherlode_raw: "0".to_string(),
        }
    }
}
