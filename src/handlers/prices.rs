use axum::{extract::State, http::StatusCode, Json};
use chrono::Utc;

use crate::{
    models::prices::{PricesFallback, PricesResponse},
    AppState,
};

/// Handler for GET /api/prices
/// SOL spot price plus the ORE token price from its first listed pair.
/// A failing token lookup degrades to 0; only a failing SOL lookup is a 500.
pub async fn get_prices(
    State(state): State<AppState>,
) -> Result<Json<PricesResponse>, (StatusCode, Json<PricesFallback>)> {
    let sol = match state.coingecko.fetch_simple_price("solana", "usd").await {
        Ok(price) => price,
        Err(e) => {
            tracing::error!("Error fetching prices: {}", e);
            return Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(PricesFallback::default()),
            ));
        }
    };

    let ore = match state
        .dexscreener
        .fetch_token_price_usd(&state.config.ore_token_address)
        .await
    {
        Ok(price) => price,
        Err(e) => {
            tracing::warn!("Error fetching ORE price from DexScreener: {}", e);
            0.0
        }
    };

    Ok(Json(PricesResponse {
        sol,
        ore,
        ore_icon: state.config.ore_icon_url.clone(),
        timestamp: Utc::now().timestamp_millis(),
    }))
}
