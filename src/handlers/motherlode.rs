use axum::{extract::State, http::StatusCode, Json};
use chrono::Utc;

use crate::{
    models::treasury::{MotherlodeFallback, MotherlodeResponse},
    AppState,
};

/// Handler for GET /api/motherlode
/// Cumulative treasury balance from the state aggregator.
pub async fn get_motherlode(
    State(state): State<AppState>,
) -> Result<Json<MotherlodeResponse>, (StatusCode, Json<MotherlodeFallback>)> {
    match state.state_api.fetch_treasury().await {
        Ok(summary) => Ok(Json(MotherlodeResponse {
            motherlode: summary.motherlode,
            motherlode_raw: summary.motherlode_raw,
            observed_at: summary.observed_at,
            timestamp: Utc::now().timestamp_millis(),
        })),
        Err(e) => {
            tracing::error!("Error fetching motherlode: {}", e);
            Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(MotherlodeFallback::default()),
            ))
        }
    }
}
