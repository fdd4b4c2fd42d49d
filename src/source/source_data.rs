//! Blend Shape Source Data - Pure DOP
//!
//! NO METHODS. Just data.
//! Setup-time input handed over by the geometry and blend shape providers.
//! Transcription into the dense delta buffer happens in source_operations.rs

use glam::Vec3;
use rustc_hash::FxHashMap;

/// Rest-pose geometry of the target mesh
#[derive(Debug, Clone, Default)]
pub struct GeometrySource {
    /// Stable identity of each mesh vertex, one per entry in `base_positions`
    pub original_vertex_indices: Vec<u32>,

    /// Rest-pose positions (V entries)
    pub base_positions: Vec<Vec3>,
}

/// One blend shape as delivered by the importer
#[derive(Debug, Clone, Default)]
pub struct BlendShapeSource {
    /// Property name used by the binding layer
    pub name: String,

    /// Frame weight the live weight is compared against
    pub threshold: f32,

    /// Original vertex index -> index into `deltas`
    pub vertex_map: FxHashMap<u32, u32>,

    /// Sparse per-shape displacements
    pub deltas: Vec<Vec3>,
}
