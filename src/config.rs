//! Runtime configuration.
//!
//! Everything tunable is read from the environment exactly once at startup
//! and carried inside `AppState`; request handlers never touch `std::env`.

use std::env;

/// Which dashboard panels are polled and rendered.
#[derive(Debug, Clone)]
pub struct PanelSet {
    pub prices: bool,
    pub buyback: bool,
    pub treasury: bool,
    pub round: bool,
}

/// Poll period per data stream, in seconds.
#[derive(Debug, Clone)]
pub struct PollIntervals {
    pub prices_secs: u64,
    pub buyback_secs: u64,
    pub treasury_secs: u64,
    pub round_secs: u64,
}

/// Typed view configuration: one parameterized dashboard instead of
/// near-duplicate page variants.
#[derive(Debug, Clone)]
pub struct DashboardConfig {
    pub panels: PanelSet,
    pub intervals: PollIntervals,
    /// Experimental production-cost panel. Off in the current deployment.
    pub production_cost_enabled: bool,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub bind_addr: String,

    pub solana_rpc_url: String,
    pub buyback_address: String,
    pub state_api_base: String,
    pub coingecko_base_url: String,
    pub coingecko_api_key: Option<String>,
    pub dexscreener_base_url: String,
    pub ore_token_address: String,
    pub ore_icon_url: String,

    /// Balance at or below this is 100% health.
    pub min_sol: f64,
    /// Balance at or above this is 0% health.
    pub max_sol: f64,

    pub balance_cache_secs: u64,
    pub treasury_cache_secs: u64,
    pub round_cache_secs: u64,
    pub price_cache_secs: u64,

    pub model_dir: String,
    pub model_file: String,

    pub dashboard: DashboardConfig,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            bind_addr: var_or("BIND_ADDR", "0.0.0.0:3000"),

            solana_rpc_url: var_or("SOLANA_RPC_URL", "https://api.mainnet-beta.solana.com"),
            buyback_address: var_or(
                "BUYBACK_ADDRESS",
                "45db2FSR4mcXdSVVZbKbwojU6uYDpMyhpEi7cC8nHaWG",
            ),
            state_api_base: var_or("STATE_API_BASE", "https://ore-api.gmore.fun"),
            coingecko_base_url: var_or("COINGECKO_BASE_URL", "https://api.coingecko.com/api/v3"),
            coingecko_api_key: env::var("COINGECKO_API_KEY").ok().filter(|k| !k.is_empty()),
            dexscreener_base_url: var_or("DEXSCREENER_BASE_URL", "https://api.dexscreener.com"),
            ore_token_address: var_or(
                "ORE_TOKEN_ADDRESS",
                "oreoU2P8bN6jkk3jbaiVxYnG1dCXcYxwhwyK9jSybcp",
            ),
            ore_icon_url: var_or("ORE_ICON_URL", "https://ore.supply/assets/icon.png"),

            min_sol: parsed_var_or("MIN_SOL", 0.0),
            max_sol: parsed_var_or("MAX_SOL", 1000.0),

            balance_cache_secs: parsed_var_or("BALANCE_CACHE_SECS", 60),
            treasury_cache_secs: parsed_var_or("TREASURY_CACHE_SECS", 60),
            round_cache_secs: parsed_var_or("ROUND_CACHE_SECS", 1),
            price_cache_secs: parsed_var_or("PRICE_CACHE_SECS", 60),

            model_dir: var_or("MODEL_DIR", "assets/hawg-3d"),
            model_file: var_or("MODEL_FILE", "base.obj"),

            dashboard: DashboardConfig {
                panels: PanelSet {
                    prices: parsed_var_or("PANEL_PRICES", true),
                    buyback: parsed_var_or("PANEL_BUYBACK", true),
                    treasury: parsed_var_or("PANEL_TREASURY", true),
                    round: parsed_var_or("PANEL_ROUND", true),
                },
                intervals: PollIntervals {
                    prices_secs: parsed_var_or("PRICES_POLL_SECS", 30),
                    buyback_secs: parsed_var_or("BUYBACK_POLL_SECS", 60),
                    treasury_secs: parsed_var_or("TREASURY_POLL_SECS", 60),
                    round_secs: parsed_var_or("ROUND_POLL_SECS", 1),
                },
                production_cost_enabled: parsed_var_or("PRODUCTION_COST_ENABLED", false),
            },
        }
    }
}

fn var_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

fn parsed_var_or<T: std::str::FromStr>(key: &str, default: T) -> T {
    match env::var(key) {
        Ok(raw) => raw.parse().unwrap_or_else(|_| {
            tracing::warn!("Invalid value for {}: '{}', using default", key, raw);
            default
        }),
        Err(_) => default,
    }
}
