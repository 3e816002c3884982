//! Decorative 3D mesh assets.
//!
//! Parses the static OBJ mesh server-side to hand the viewer its bounding
//! box, re-centering offset and display scale, and discovers the PBR texture
//! maps sitting next to the mesh. Parsed meshes are cached; a load whose
//! request is torn down mid-flight inserts nothing.

use moka::future::Cache;
use std::path::Path;
use std::sync::Arc;

/// Texture maps the viewer knows how to apply, in material order.
pub const TEXTURE_MAPS: [&str; 5] = [
    "texture_diffuse.png",
    "texture_normal.png",
    "texture_metallic.png",
    "texture_roughness.png",
    "texture_pbr.png",
];

const MOBILE_BREAKPOINT_PX: u32 = 768;
const MOBILE_SCALE: f64 = 1.5;
const DESKTOP_SCALE: f64 = 1.4;

#[derive(Debug, Clone)]
pub struct SubMesh {
    pub name: String,
    pub face_count: usize,
}

#[derive(Debug, Clone)]
pub struct ObjModel {
    pub vertex_count: usize,
    pub face_count: usize,
    pub submeshes: Vec<SubMesh>,
    pub bounds_min: [f64; 3],
    pub bounds_max: [f64; 3],
}

impl ObjModel {
    pub fn center(&self) -> [f64; 3] {
        [
            (self.bounds_min[0] + self.bounds_max[0]) / 2.0,
            (self.bounds_min[1] + self.bounds_max[1]) / 2.0,
            (self.bounds_min[2] + self.bounds_max[2]) / 2.0,
        ]
    }

    /// Translation that puts the bounding-box center at the origin.
    pub fn center_offset(&self) -> [f64; 3] {
        let center = self.center();
        [-center[0], -center[1], -center[2]]
    }

    pub fn size(&self) -> [f64; 3] {
        [
            self.bounds_max[0] - self.bounds_min[0],
            self.bounds_max[1] - self.bounds_min[1],
            self.bounds_max[2] - self.bounds_min[2],
        ]
    }
}

/// Display scale for a given viewport width. Narrow viewports render the
/// model slightly larger.
pub fn display_scale(viewport_width: u32) -> f64 {
    if viewport_width < MOBILE_BREAKPOINT_PX {
        MOBILE_SCALE
    } else {
        DESKTOP_SCALE
    }
}

/// Parse a Wavefront OBJ source: vertex positions, faces, and sub-mesh
/// grouping (`o`/`g`/`usemtl`). Texture coordinates and normals are skipped;
/// only what the metadata endpoint reports is collected.
pub fn parse_obj(source: &str) -> Result<ObjModel, Box<dyn std::error::Error + Send + Sync>> {
    let mut vertex_count = 0usize;
    let mut face_count = 0usize;
    let mut bounds_min = [f64::INFINITY; 3];
    let mut bounds_max = [f64::NEG_INFINITY; 3];
    let mut submeshes: Vec<SubMesh> = Vec::new();

    for (line_no, raw_line) in source.lines().enumerate() {
        let line = raw_line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let mut parts = line.split_whitespace();
        let keyword = parts.next().unwrap_or("");

        match keyword {
            "v" => {
                let mut coords = [0.0f64; 3];
                for coord in coords.iter_mut() {
                    let token = parts
                        .next()
                        .ok_or_else(|| format!("truncated vertex on line {}", line_no + 1))?;
                    *coord = token
                        .parse()
                        .map_err(|_| format!("invalid vertex on line {}", line_no + 1))?;
                }
                for axis in 0..3 {
                    bounds_min[axis] = bounds_min[axis].min(coords[axis]);
                    bounds_max[axis] = bounds_max[axis].max(coords[axis]);
                }
                vertex_count += 1;
            }
            "f" => {
                let mut vertices_in_face = 0usize;
                for vertex in parts {
                    // v, v/vt, v//vn and v/vt/vn forms; indices may be negative
                    let index_token = vertex.split('/').next().unwrap_or("");
                    let index: isize = index_token.parse().map_err(|_| {
                        format!("invalid face index '{}' on line {}", vertex, line_no + 1)
                    })?;
                    if index == 0 {
                        return Err(format!("face index 0 on line {}", line_no + 1).into());
                    }
                    vertices_in_face += 1;
                }
                if vertices_in_face < 3 {
                    return Err(
                        format!("face with {} vertices on line {}", vertices_in_face, line_no + 1)
                            .into(),
                    );
                }

                if submeshes.is_empty() {
                    submeshes.push(SubMesh {
                        name: "default".to_string(),
                        face_count: 0,
                    });
                }
                if let Some(current) = submeshes.last_mut() {
                    current.face_count += 1;
                }
                face_count += 1;
            }
            "o" | "g" | "usemtl" => {
                let name = parts.next().unwrap_or("unnamed").to_string();
                match submeshes.last_mut() {
                    // a group header before any face renames the open group
                    Some(current) if current.face_count == 0 => current.name = name,
                    _ => submeshes.push(SubMesh {
                        name,
                        face_count: 0,
                    }),
                }
            }
            // vt, vn, s, mtllib and friends carry nothing we report
            _ => {}
        }
    }

    if vertex_count == 0 {
        return Err("mesh has no vertices".into());
    }

    Ok(ObjModel {
        vertex_count,
        face_count,
        submeshes,
        bounds_min,
        bounds_max,
    })
}

/// Cached loader over the configured asset directory.
#[derive(Clone)]
pub struct ModelAssetService {
    model_dir: String,
    cache: Arc<Cache<String, Arc<ObjModel>>>,
}

impl ModelAssetService {
    pub fn new(model_dir: String) -> Self {
        let cache = Cache::builder().max_capacity(4).build();

        Self {
            model_dir,
            cache: Arc::new(cache),
        }
    }

    pub async fn load(
        &self,
        file: &str,
    ) -> Result<Arc<ObjModel>, Box<dyn std::error::Error + Send + Sync>> {
        if let Some(cached) = self.cache.get(file).await {
            tracing::debug!("Mesh cache hit for {}", file);
            return Ok(cached);
        }

        let path = Path::new(&self.model_dir).join(file);
        tracing::info!("Loading mesh from {}", path.display());

        let source = tokio::fs::read_to_string(&path).await?;
        let model = Arc::new(parse_obj(&source)?);

        self.cache.insert(file.to_string(), model.clone()).await;

        Ok(model)
    }

    /// Texture maps present next to the mesh, in material order.
    pub async fn available_textures(&self) -> Vec<String> {
        let mut found = Vec::new();
        for name in TEXTURE_MAPS {
            let path = Path::new(&self.model_dir).join(name);
            if tokio::fs::metadata(&path).await.is_ok() {
                found.push(name.to_string());
            }
        }
        found
    }
}
