//! Derived display values.
//!
//! Pure functions recomputed on every request; none of them allocate beyond
//! the returned string and none can yield NaN or infinity.

use std::str::FromStr;

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

use crate::models::dashboard::{CostEstimate, StatusColor};
use crate::models::round::MiningStatus;

/// Inverse of the per-unit win probability (p = 1/625).
const PRODUCTION_ODDS_INV: f64 = 625.0;
/// Empirical adjustment applied to the miners-per-cost figure.
const MINER_ADJUSTMENT: f64 = 1.11;

/// Price formatting: more precision for smaller magnitudes.
pub fn format_price(price: f64) -> String {
    if price == 0.0 {
        return "0.00".to_string();
    }
    if price < 0.01 {
        format!("{:.6}", price)
    } else if price < 1.0 {
        format!("{:.4}", price)
    } else {
        format!("{:.2}", price)
    }
}

/// Linear buyback health: 100 at/below `min_sol`, 0 at/above `max_sol`.
pub fn buyback_health(sol_balance: f64, min_sol: f64, max_sol: f64) -> u8 {
    if sol_balance <= min_sol {
        return 100;
    }
    if sol_balance >= max_sol {
        return 0;
    }
    (((max_sol - sol_balance) / (max_sol - min_sol)) * 100.0).round() as u8
}

/// Hunger label for a health score. Upper bounds are exclusive.
pub fn health_status_label(health: u8) -> &'static str {
    if health < 25 {
        "VERY HUNGRY"
    } else if health < 50 {
        "HUNGRY"
    } else if health < 75 {
        "RAISED APPETITE"
    } else if health < 95 {
        "SCRATCHING STOMACH"
    } else {
        "FULL"
    }
}

pub fn mining_status_color(status: MiningStatus) -> StatusColor {
    match status {
        MiningStatus::Active => StatusColor::Amber,
        MiningStatus::Finished => StatusColor::Green,
        MiningStatus::Expired => StatusColor::Gray,
        MiningStatus::Idle => StatusColor::Neutral,
    }
}

/// Parse an upstream decimal string, tolerating a trailing unit suffix
/// ("123.456789000 ORE"). Anything unparseable counts as zero.
pub fn parse_amount(raw: &str) -> f64 {
    let token = raw.split_whitespace().next().unwrap_or("");
    Decimal::from_str(token)
        .ok()
        .and_then(|d| d.to_f64())
        .unwrap_or(0.0)
}

/// Per-round production cost chain. Each figure guards its own divisor, so a
/// zero anywhere upstream collapses everything downstream to zero.
pub fn production_cost_estimate(
    deployed_sol: f64,
    motherlode_ore: f64,
    unique_miners: f64,
    sol_usd: f64,
    ore_usd: f64,
) -> CostEstimate {
    let cost_per_ore_sol = if deployed_sol > 0.0 && motherlode_ore > 0.0 {
        (PRODUCTION_ODDS_INV * deployed_sol) / motherlode_ore
    } else {
        0.0
    };

    let cost_per_ore_usd = cost_per_ore_sol * sol_usd;

    let miners_per_cost = if cost_per_ore_sol > 0.0 {
        (unique_miners / cost_per_ore_sol) * MINER_ADJUSTMENT
    } else {
        0.0
    };

    let ore_multiplier = if cost_per_ore_usd > 0.0 && ore_usd > 0.0 {
        cost_per_ore_usd / ore_usd
    } else {
        0.0
    };

    CostEstimate {
        cost_per_ore_sol,
        cost_per_ore_usd,
        miners_per_cost,
        ore_multiplier,
    }
}
