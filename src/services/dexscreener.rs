use moka::future::Cache;
use reqwest::Client;
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;

/// Token price lookup via DexScreener trading pairs.
#[derive(Clone)]
pub struct DexScreenerService {
    client: Client,
    base_url: String,
    cache: Arc<Cache<String, f64>>,
}

impl DexScreenerService {
    pub fn new(base_url: String, cache_ttl_secs: u64) -> Self {
        let cache = Cache::builder()
            .max_capacity(100)
            .time_to_live(Duration::from_secs(cache_ttl_secs.max(1)))
            .build();

        Self {
            client: Client::builder()
                .timeout(Duration::from_secs(10))
                .build()
                .unwrap(),
            base_url,
            cache: Arc::new(cache),
        }
    }

    /// USD price of the first listed trading pair for a token contract.
    /// Tokens with no pairs quote at 0.
    pub async fn fetch_token_price_usd(
        &self,
        token_address: &str,
    ) -> Result<f64, Box<dyn std::error::Error + Send + Sync>> {
        if let Some(cached) = self.cache.get(token_address).await {
            tracing::debug!("Cache hit for {}", token_address);
            return Ok(cached);
        }

        tracing::debug!("Fetching {} pairs from DexScreener", token_address);

        let url = format!("{}/latest/dex/tokens/{}", self.base_url, token_address);

        let response = self
            .client
            .get(&url)
            .header("Accept", "application/json")
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(format!("DexScreener API error {}", response.status()).into());
        }

        let data: Value = response.json().await?;
        let price = extract_first_pair_price(&data);

        self.cache.insert(token_address.to_string(), price).await;

        Ok(price)
    }
}

/// First pair's `priceUsd`, falling back to `priceNative`; both arrive as
/// decimal strings.
fn extract_first_pair_price(data: &Value) -> f64 {
    let Some(pair) = data.get("pairs").and_then(Value::as_array).and_then(|p| p.first())
    else {
        return 0.0;
    };

    pair.get("priceUsd")
        .or_else(|| pair.get("priceNative"))
        .and_then(Value::as_str)
        .and_then(|raw| raw.parse::<f64>().ok())
        .unwrap_or(0.0)
}
