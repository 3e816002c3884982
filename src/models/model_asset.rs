use serde::{Deserialize, Serialize};

/// Query for `GET /api/model`.
#[derive(Debug, Deserialize)]
pub struct ModelQuery {
    /// Viewport width in px; drives the display scale breakpoint.
    pub viewport: Option<u32>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubMeshInfo {
    pub name: String,
    pub face_count: usize,
}

/// Mesh metadata for the decorative viewer: counts, bounds and the
/// recenter/rescale transform, plus the texture maps found next to the mesh.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ModelMetadataResponse {
    pub mesh_url: String,
    pub vertex_count: usize,
    pub face_count: usize,
    pub submeshes: Vec<SubMeshInfo>,
    pub bounds_min: [f64; 3],
    pub bounds_max: [f64; 3],
    /// Translation that moves the bounding-box center to the origin.
    pub center_offset: [f64; 3],
    pub scale: f64,
    pub textures: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelErrorResponse {
    pub error: String,
}
