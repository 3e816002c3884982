use serde::{Deserialize, Serialize};

/// Mining phase reported by the state aggregator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MiningStatus {
    Idle,
    Active,
    Finished,
    Expired,
}

impl MiningStatus {
    /// Unknown upstream strings collapse to `Idle` (the neutral display state).
    pub fn parse(raw: &str) -> Self {
        match raw {
            "active" => Self::Active,
            "finished" => Self::Finished,
            "expired" => Self::Expired,
            _ => Self::Idle,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Active => "active",
            Self::Finished => "finished",
            Self::Expired => "expired",
        }
    }
}

/// Success payload for `GET /api/round`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoundResponse {
    /// Total deployed stake for the round, decimal string in SOL.
    pub deployed_sol: String,
    pub round_id: String,
    pub observed_at: Option<i64>,
    pub mining_status: MiningStatus,
    /// Participant count, decimal string.
    pub unique_miners: String,
    pub timestamp: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoundFallback {
    pub error: String,
    pub deployed_sol: String,
    pub round_id: String,
    pub mining_status: MiningStatus,
    pub unique_miners: String,
}

impl Default for RoundFallback {
    fn default() -> Self {
        Self {
            error: "Failed to fetch round data".to_string(),
            deployed_sol: "0.000000000".to_string(),
            round_id: "0".to_string(),
            mining_status: MiningStatus::Idle,
            unique_miners: "0".to_string(),
        }
    }
}
