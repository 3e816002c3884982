// src/lib.rs

use std::sync::Arc;

use config::Config;
use services::{
    coingecko::CoinGeckoService, dexscreener::DexScreenerService, model_asset::ModelAssetService,
    snapshot_store::SnapshotStore, solana_rpc::SolanaRpcService, state_api::StateApiService,
};

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub solana_rpc: SolanaRpcService,
    pub state_api: StateApiService,
    pub coingecko: CoinGeckoService,
    pub dexscreener: DexScreenerService,
    pub model_assets: ModelAssetService,
    pub snapshots: SnapshotStore,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        let config = Arc::new(config);
        Self {
            solana_rpc: SolanaRpcService::new(
                config.solana_rpc_url.clone(),
                config.balance_cache_secs,
            ),
            state_api: StateApiService::new(
                config.state_api_base.clone(),
                config.treasury_cache_secs,
                config.round_cache_secs,
            ),
            coingecko: CoinGeckoService::new(
                config.coingecko_base_url.clone(),
                config.coingecko_api_key.clone(),
                config.price_cache_secs,
            ),
            dexscreener: DexScreenerService::new(
                config.dexscreener_base_url.clone(),
                config.price_cache_secs,
            ),
            model_assets: ModelAssetService::new(config.model_dir.clone()),
            snapshots: SnapshotStore::new(),
            config,
        }
    }
}

pub mod config;

pub mod services {
    pub mod coingecko;
    pub mod dexscreener;
    pub mod display;
    pub mod model_asset;
    pub mod snapshot_store;
    pub mod solana_rpc;
    pub mod state_api;
}

pub mod handlers {
    pub mod buyback;
    pub mod dashboard;
    pub mod model;
    pub mod motherlode;
    pub mod prices;
    pub mod round;
}

pub mod models {
    pub mod buyback;
    pub mod dashboard;
    pub mod model_asset;
    pub mod prices;
    pub mod round;
    pub mod treasury;
}

pub mod jobs {
    pub mod snapshot_poll;
}
