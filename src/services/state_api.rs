//! Client for the community state aggregator.
//!
//! One upstream document feeds two endpoints with very different freshness
//! needs: the treasury figure revalidates on a 60s window, the round figures
//! near-realtime. Hence two caches over the same fetch.

use moka::future::Cache;
use reqwest::Client;
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;

use crate::models::round::MiningStatus;

#[derive(Debug, Clone)]
pub struct TreasurySummary {
    pub motherlode: String,
    pub motherlode_raw: String,
    pub observed_at: Option<i64>,
}

#[derive(Debug, Clone)]
pub struct RoundSummary {
    pub deployed_sol: String,
    pub round_id: String,
    pub observed_at: Option<i64>,
    pub mining_status: MiningStatus,
    pub unique_miners: String,
}

#[derive(Clone)]
pub struct StateApiService {
    client: Client,
    base_url: String,
    treasury_cache: Arc<Cache<String, TreasurySummary>>,
    round_cache: Arc<Cache<String, RoundSummary>>,
}

impl StateApiService {
    pub fn new(base_url: String, treasury_ttl_secs: u64, round_ttl_secs: u64) -> Self {
        let treasury_cache = Cache::builder()
            .max_capacity(1)
            .time_to_live(Duration::from_secs(treasury_ttl_secs.max(1)))
            .build();
        let round_cache = Cache::builder()
            .max_capacity(1)
            .time_to_live(Duration::from_secs(round_ttl_secs.max(1)))
            .build();

        Self {
            client: Client::builder()
                .timeout(Duration::from_secs(10))
                .build()
                .unwrap(),
            base_url,
            treasury_cache: Arc::new(treasury_cache),
            round_cache: Arc::new(round_cache),
        }
    }

    pub async fn fetch_treasury(
        &self,
    ) -> Result<TreasurySummary, Box<dyn std::error::Error + Send + Sync>> {
        if let Some(cached) = self.treasury_cache.get("treasury").await {
            tracing::debug!("Treasury cache hit");
            return Ok(cached);
        }

        let state = self.fetch_state().await?;
        let summary = extract_treasury(&state);

        self.treasury_cache
            .insert("treasury".to_string(), summary.clone())
            .await;

        Ok(summary)
    }

    pub async fn fetch_round(
        &self,
    ) -> Result<RoundSummary, Box<dyn std::error::Error + Send + Sync>> {
        if let Some(cached) = self.round_cache.get("round").await {
            tracing::debug!("Round cache hit");
            return Ok(cached);
        }

        let state = self.fetch_state().await?;
        let summary = extract_round(&state);

        self.round_cache
            .insert("round".to_string(), summary.clone())
            .await;

        Ok(summary)
    }

    async fn fetch_state(&self) -> Result<Value, Box<dyn std::error::Error + Send + Sync>> {
        let url = format!("{}/state", self.base_url);

        tracing::debug!("Fetching aggregate state from {}", url);

        let response = self
            .client
            .get(&url)
            .header("accept", "application/json")
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(format!("state API returned {}", response.status()).into());
        }

        Ok(response.json().await?)
    }
}

fn extract_treasury(state: &Value) -> TreasurySummary {
    let treasury = state.get("treasury");

    TreasurySummary {
        motherlode: treasury
            .and_then(|t| string_field(t.get("motherlodeFormatted")))
            .unwrap_or_else(|| "0.000000000 ORE".to_string()),
        motherlode_raw: treasury
            .and_then(|t| string_field(t.get("motherlodeRaw")))
            .unwrap_or_else(|| "0".to_string()),
        observed_at: treasury.and_then(|t| t.get("observedAt")).and_then(Value::as_i64),
    }
}

fn extract_round(state: &Value) -> RoundSummary {
    let round = state.get("round");

    RoundSummary {
        deployed_sol: round
            .and_then(|r| r.get("totals"))
            .and_then(|t| string_field(t.get("deployedSol")))
            .unwrap_or_else(|| "0.000000000".to_string()),
        round_id: round
            .and_then(|r| string_field(r.get("roundId")))
            .unwrap_or_else(|| "0".to_string()),
        observed_at: round.and_then(|r| r.get("observedAt")).and_then(Value::as_i64),
        mining_status: round
            .and_then(|r| r.get("mining"))
            .and_then(|m| m.get("status"))
            .and_then(Value::as_str)
            .map(MiningStatus::parse)
            .unwrap_or(MiningStatus::Idle),
        unique_miners: round
            .and_then(|r| string_field(r.get("uniqueMiners")))
            .unwrap_or_else(|| "0".to_string()),
    }
}

/// Upstream is loose about number-vs-string; normalize both to strings.
fn string_field(value: Option<&Value>) -> Option<String> {
    match value {
        Some(Value::String(s)) => Some(s.clone()),
        Some(Value::Number(n)) => Some(n.to_string()),
        _ => None,
    }
}
