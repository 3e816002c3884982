use axum::{extract::State, http::StatusCode, Json};
use chrono::Utc;

use crate::{
    models::buyback::{BuybackFallback, BuybackResponse},
    services::display,
    AppState,
};

/// Handler for GET /api/buyback
/// Treasury buyback account balance and the derived health score.
pub async fn get_buyback(
    State(state): State<AppState>,
) -> Result<Json<BuybackResponse>, (StatusCode, Json<BuybackFallback>)> {
    match state
        .solana_rpc
        .get_balance_sol(&state.config.buyback_address)
        .await
    {
        Ok(sol_balance) => {
            let health =
                display::buyback_health(sol_balance, state.config.min_sol, state.config.max_sol);

            Ok(Json(BuybackResponse {
                sol_balance,
                health,
                timestamp: Utc::now().timestamp_millis(),
            }))
        }
        Err(e) => {
            tracing::error!("Error fetching buyback balance: {}", e);
            Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(BuybackFallback::default()),
            ))
        }
    }
}
