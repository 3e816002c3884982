use axum::{extract::State, http::StatusCode, Json};
use chrono::Utc;

use crate::{
    models::round::{RoundFallback, RoundResponse},
    AppState,
};

/// Handler for GET /api/round
/// Current mining round statistics, near-realtime cache window.
pub async fn get_round(
    State(state): State<AppState>,
) -> Result<Json<RoundResponse>, (StatusCode, Json<RoundFallback>)> {
    match state.state_api.fetch_round().await {
        Ok(summary) => Ok(Json(RoundResponse {
            deployed_sol: summary.deployed_sol,
            round_id: summary.round_id,
            observed_at: summary.observed_at,
            mining_status: summary.mining_status,
            unique_miners: summary.unique_miners,
            timestamp: Utc::now().timestamp_millis(),
        })),
        Err(e) => {
            tracing::error!("Error fetching round data: {}", e);
            Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(RoundFallback::default()),
            ))
        }
    }
}
