use axum::{
    extract::{Query, State},
    http::StatusCode,
    Json,
};

use crate::{
    models::model_asset::{ModelErrorResponse, ModelMetadataResponse, ModelQuery, SubMeshInfo},
    services::model_asset,
    AppState,
};

const DEFAULT_VIEWPORT_PX: u32 = 1280;

/// Handler for GET /api/model
/// Metadata for the decorative mesh: counts, bounds, the recenter/rescale
/// transform for the requested viewport, and the texture maps on disk.
pub async fn get_model_metadata(
    State(state): State<AppState>,
    Query(query): Query<ModelQuery>,
) -> Result<Json<ModelMetadataResponse>, (StatusCode, Json<ModelErrorResponse>)> {
    let model = state
        .model_assets
        .load(&state.config.model_file)
        .await
        .map_err(|e| {
            tracing::error!("Error loading model {}: {}", state.config.model_file, e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ModelErrorResponse {
                    error: "Failed to load model".to_string(),
                }),
            )
        })?;

    let viewport = query.viewport.unwrap_or(DEFAULT_VIEWPORT_PX);

    let textures = state
        .model_assets
        .available_textures()
        .await
        .into_iter()
        .map(|name| format!("/hawg-3d/{}", name))
        .collect();

    Ok(Json(ModelMetadataResponse {
        mesh_url: format!("/hawg-3d/{}", state.config.model_file),
        vertex_count: model.vertex_count,
        face_count: model.face_count,
        submeshes: model
            .submeshes
            .iter()
            .map(|s| SubMeshInfo {
                name: s.name.clone(),
                face_count: s.face_count,
            })
            .collect(),
        bounds_min: model.bounds_min,
        bounds_max: model.bounds_max,
        center_offset: model.center_offset(),
        scale: model_asset::display_scale(viewport),
        textures,
    }))
}
