use moka::future::Cache;
use reqwest::Client;
use serde_json::{json, Value};
use std::sync::Arc;
use std::time::Duration;

const LAMPORTS_PER_SOL: f64 = 1e9;

/// Minimal JSON-RPC client for account balance queries.
#[derive(Clone)]
pub struct SolanaRpcService {
    client: Client,
    rpc_url: String,
    cache: Arc<Cache<String, f64>>,
}

impl SolanaRpcService {
    pub fn new(rpc_url: String, cache_ttl_secs: u64) -> Self {
        let cache = Cache::builder()
            .max_capacity(8)
            .time_to_live(Duration::from_secs(cache_ttl_secs.max(1)))
            .build();

        Self {
            client: Client::builder()
                .timeout(Duration::from_secs(10))
                .build()
                .unwrap(),
            rpc_url,
            cache: Arc::new(cache),
        }
    }

    /// Account balance in SOL. Cached per address for the revalidation window.
    pub async fn get_balance_sol(
        &self,
        address: &str,
    ) -> Result<f64, Box<dyn std::error::Error + Send + Sync>> {
        if let Some(cached) = self.cache.get(address).await {
            tracing::debug!("Balance cache hit for {}", address);
            return Ok(cached);
        }

        tracing::debug!("Fetching balance for {} from Solana RPC", address);

        let request = json!({
            "jsonrpc": "2.0",
            "id": 1,
            "method": "getBalance",
            "params": [address],
        });

        let response = self
            .client
            .post(&self.rpc_url)
            .header("Content-Type", "application/json")
            .json(&request)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(format!("Solana RPC returned {}", response.status()).into());
        }

        let data: Value = response.json().await?;
        let sol_balance = extract_lamports(&data) as f64 / LAMPORTS_PER_SOL;

        self.cache.insert(address.to_string(), sol_balance).await;

        Ok(sol_balance)
    }
}

/// A missing `result.value` counts as an empty account, not an error.
fn extract_lamports(data: &Value) -> u64 {
    data.get("result")
        .and_then(|r| r.get("value"))
        .and_then(Value::as_u64)
        .unwrap_or(0)
}
