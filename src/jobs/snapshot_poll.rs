//! Background polling jobs feeding the snapshot store.
//!
//! One task per active panel, each on its own interval. A stream's loop
//! awaits its fetch before the next tick, so at most one request per stream
//! is ever in flight. On failure the previous snapshot is left untouched;
//! before the first success the slot stays empty ("loading").

use chrono::Utc;
use tokio::task::JoinHandle;
use tokio::time::{interval, Duration, MissedTickBehavior};

use crate::services::display;
use crate::services::snapshot_store::{
    BalanceSnapshot, PriceSnapshot, RoundSnapshot, TreasurySnapshot,
};
use crate::AppState;

/// Handles for every spawned polling task. `shutdown` tears all of them
/// down; an aborted task can no longer touch the store.
pub struct PollerHandles {
    handles: Vec<JoinHandle<()>>,
}

impl PollerHandles {
    pub fn shutdown(&self) {
        for handle in &self.handles {
            handle.abort();
        }
    }

    pub fn task_count(&self) -> usize {
        self.handles.len()
    }
}

pub fn start_snapshot_poll_jobs(state: &AppState) -> PollerHandles {
    let dashboard = &state.config.dashboard;
    let mut handles = Vec::new();

    if dashboard.panels.prices {
        handles.push(spawn_prices_poll(
            state.clone(),
            dashboard.intervals.prices_secs,
        ));
    }
    if dashboard.panels.buyback {
        handles.push(spawn_buyback_poll(
            state.clone(),
            dashboard.intervals.buyback_secs,
        ));
    }
    if dashboard.panels.treasury {
        handles.push(spawn_treasury_poll(
            state.clone(),
            dashboard.intervals.treasury_secs,
        ));
    }
    if dashboard.panels.round {
        handles.push(spawn_round_poll(
            state.clone(),
            dashboard.intervals.round_secs,
        ));
    }

    PollerHandles { handles }
}

fn spawn_prices_poll(state: AppState, period_secs: u64) -> JoinHandle<()> {
    tokio::spawn(async move {
        tracing::info!("Starting price polling (every {}s)", period_secs);

        let mut interval = interval(Duration::from_secs(period_secs.max(1)));
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            // first tick completes immediately: fetch-on-mount
            interval.tick().await;

            if let Err(e) = poll_prices(&state).await {
                tracing::error!("Price poll failed: {}", e);
            }
        }
    })
}

fn spawn_buyback_poll(state: AppState, period_secs: u64) -> JoinHandle<()> {
    tokio::spawn(async move {
        tracing::info!("Starting buyback polling (every {}s)", period_secs);

        let mut interval = interval(Duration::from_secs(period_secs.max(1)));
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            interval.tick().await;

            if let Err(e) = poll_buyback(&state).await {
                tracing::error!("Buyback poll failed: {}", e);
            }
        }
    })
}

fn spawn_treasury_poll(state: AppState, period_secs: u64) -> JoinHandle<()> {
    tokio::spawn(async move {
        tracing::info!("Starting treasury polling (every {}s)", period_secs);

        let mut interval = interval(Duration::from_secs(period_secs.max(1)));
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            interval.tick().await;

            if let Err(e) = poll_treasury(&state).await {
                tracing::error!("Treasury poll failed: {}", e);
            }
        }
    })
}

fn spawn_round_poll(state: AppState, period_secs: u64) -> JoinHandle<()> {
    tokio::spawn(async move {
        tracing::info!("Starting round polling (every {}s)", period_secs);

        let mut interval = interval(Duration::from_secs(period_secs.max(1)));
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            interval.tick().await;

            if let Err(e) = poll_round(&state).await {
                tracing::error!("Round poll failed: {}", e);
            }
        }
    })
}

async fn poll_prices(state: &AppState) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let sol_usd = state.coingecko.fetch_simple_price("solana", "usd").await?;

    // secondary source: a miss leaves the token price at zero
    let ore_usd = match state
        .dexscreener
        .fetch_token_price_usd(&state.config.ore_token_address)
        .await
    {
        Ok(price) => price,
        Err(e) => {
            tracing::warn!("DexScreener price fetch failed: {}", e);
            0.0
        }
    };

    state.snapshots.set_prices(PriceSnapshot {
        sol_usd,
        ore_usd,
        ore_icon: state.config.ore_icon_url.clone(),
        observed_at: Utc::now().timestamp_millis(),
    });

    Ok(())
}

async fn poll_buyback(state: &AppState) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let sol_balance = state
        .solana_rpc
        .get_balance_sol(&state.config.buyback_address)
        .await?;

    state.snapshots.set_balance(BalanceSnapshot {
        sol_balance,
        health: display::buyback_health(sol_balance, state.config.min_sol, state.config.max_sol),
        observed_at: Utc::now().timestamp_millis(),
    });

    Ok(())
}

async fn poll_treasury(state: &AppState) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let summary = state.state_api.fetch_treasury().await?;

    state.snapshots.set_treasury(TreasurySnapshot {
        motherlode: summary.motherlode,
        motherlode_raw: summary.motherlode_raw,
        observed_at: summary.observed_at,
        fetched_at: Utc::now().timestamp_millis(),
    });

    Ok(())
}

async fn poll_round(state: &AppState) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let summary = state.state_api.fetch_round().await?;

    state.snapshots.set_round(RoundSnapshot {
        deployed_sol: summary.deployed_sol,
        round_id: summary.round_id,
        mining_status: summary.mining_status,
        unique_miners: summary.unique_miners,
        observed_at: summary.observed_at,
        fetched_at: Utc::now().timestamp_millis(),
    });

    Ok(())
}
