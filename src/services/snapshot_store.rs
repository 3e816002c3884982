//! In-memory snapshot store for the dashboard polling loops.
//!
//! One slot per data stream. A slot is `None` until its first successful
//! poll; after that it always holds the last known good value. Slots are
//! replaced wholesale and are refreshed independently, so values from
//! different streams may be mutually inconsistent at any instant.

use parking_lot::RwLock;
use std::sync::Arc;

use crate::models::round::MiningStatus;

#[derive(Debug, Clone)]
pub struct PriceSnapshot {
    pub sol_usd: f64,
    pub ore_usd: f64,
    pub ore_icon: String,
    pub observed_at: i64,
}

#[derive(Debug, Clone)]
pub struct BalanceSnapshot {
    pub sol_balance: f64,
    pub health: u8,
    pub observed_at: i64,
}

#[derive(Debug, Clone)]
pub struct TreasurySnapshot {
    pub motherlode: String,
    pub motherlode_raw: String,
    pub observed_at: Option<i64>,
    pub fetched_at: i64,
}

#[derive(Debug, Clone)]
pub struct RoundSnapshot {
    pub deployed_sol: String,
    pub round_id: String,
    pub mining_status: MiningStatus,
    pub unique_miners: String,
    pub observed_at: Option<i64>,
    pub fetched_at: i64,
}

#[derive(Clone, Default)]
pub struct SnapshotStore {
    prices: Arc<RwLock<Option<PriceSnapshot>>>,
    balance: Arc<RwLock<Option<BalanceSnapshot>>>,
    treasury: Arc<RwLock<Option<TreasurySnapshot>>>,
    round: Arc<RwLock<Option<RoundSnapshot>>>,
}

impl SnapshotStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_prices(&self, snapshot: PriceSnapshot) {
        *self.prices.write() = Some(snapshot);
    }

    pub fn prices(&self) -> Option<PriceSnapshot> {
        self.prices.read().clone()
    }

    pub fn set_balance(&self, snapshot: BalanceSnapshot) {
        *self.balance.write() = Some(snapshot);
    }

    pub fn balance(&self) -> Option<BalanceSnapshot> {
        self.balance.read().clone()
    }

    pub fn set_treasury(&self, snapshot: TreasurySnapshot) {
        *self.treasury.write() = Some(snapshot);
    }

    pub fn treasury(&self) -> Option<TreasurySnapshot> {
        self.treasury.read().clone()
    }

    pub fn set_round(&self, snapshot: RoundSnapshot) {
        *self.round.write() = Some(snapshot);
    }

    pub fn round(&self) -> Option<RoundSnapshot> {
        self.round.read().clone()
    }
}
