use moka::future::Cache;
use reqwest::Client;
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;

/// Spot price lookup against the CoinGecko simple-price API.
#[derive(Clone)]
pub struct CoinGeckoService {
    client: Client,
    base_url: String,
    api_key: Option<String>,
    cache: Arc<Cache<String, f64>>,
}

impl CoinGeckoService {
    pub fn new(base_url: String, api_key: Option<String>, cache_ttl_secs: u64) -> Self {
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
            api_key,
            cache: Arc::new(cache),
        }
    }

    /// Spot price of `coin_id` in `vs_currency`. Absent quotes count as 0.
    pub async fn fetch_simple_price(
        &self,
        coin_id: &str,
        vs_currency: &str,
    ) -> Result<f64, Box<dyn std::error::Error + Send + Sync>> {
        let cache_key = format!("{}_{}", coin_id, vs_currency);

        if let Some(cached) = self.cache.get(&cache_key).await {
            tracing::debug!("Cache hit for {}", cache_key);
            return Ok(cached);
        }

        tracing::debug!("Fetching {} price from CoinGecko", coin_id);

        let url = format!("{}/simple/price", self.base_url);

        let mut request = self
            .client
            .get(&url)
            .header("accept", "application/json")
            .query(&[("ids", coin_id), ("vs_currencies", vs_currency)]);

        if let Some(api_key) = &self.api_key {
            request = request.header("x-cg-pro-api-key", api_key);
        }

        let response = request.send().await?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            return Err(format!("CoinGecko API error {}: {}", status, error_text).into());
        }

        let data: Value = response.json().await?;
        let price = extract_quote(&data, coin_id, vs_currency);

        self.cache.insert(cache_key, price).await;

        Ok(price)
    }
}

fn extract_quote(data: &Value, coin_id: &str, vs_currency: &str) -> f64 {
    data.get(coin_id)
        .and_then(|c| c.get(vs_currency))
        .and_then(Value::as_f64)
        .unwrap_or(0.0)
}
