//! Blend Shape Source Operations - Pure DOP Functions
//!
//! Sparse per-shape data is only read here, once, during setup. The tick
//! path works on the dense shape-major buffer this module produces.

use super::source_data::{BlendShapeSource, GeometrySource};
use crate::accumulator::layout;
use crate::error::{BlendShapeError, BlendShapeResult};
use glam::Vec3;

/// Vertex count of the target mesh
pub fn vertex_count(geometry: &GeometrySource) -> usize {
    geometry.base_positions.len()
}

/// Check that the geometry's per-vertex arrays agree
pub fn validate_geometry(geometry: &GeometrySource) -> BlendShapeResult<()> {
    if geometry.original_vertex_indices.len() != geometry.base_positions.len() {
        return Err(BlendShapeError::DimensionMismatch {
            buffer: "original_vertex_indices",
            expected: geometry.base_positions.len(),
            found: geometry.original_vertex_indices.len(),
        });
    }
    Ok(())
}

/// Transcribe sparse shapes into a dense shape-major delta buffer.
/// Vertices a shape does not map keep a zero delta.
pub fn build_delta_buffer(
    geometry: &GeometrySource,
    shapes: &[BlendShapeSource],
) -> BlendShapeResult<Vec<Vec3>> {
    validate_geometry(geometry)?;

    let vertex_count = vertex_count(geometry);
    let len = layout::delta_buffer_len(shapes.len(), vertex_count).ok_or(
        BlendShapeError::DimensionMismatch {
            buffer: "deltas",
            expected: usize::MAX,
            found: shapes.len(),
        },
    )?;

    let mut deltas = vec![Vec3::ZERO; len];
    let mut mapped = 0usize;

    for (shape_index, shape) in shapes.iter().enumerate() {
        let row = layout::shape_deltas_mut(&mut deltas, shape_index, vertex_count);

        for (slot, original) in row.iter_mut().zip(&geometry.original_vertex_indices) {
            let Some(&local) = shape.vertex_map.get(original) else {
                continue;
            };

            *slot = match shape.deltas.get(local as usize) {
                Some(&delta) => delta,
                None => {
                    return Err(BlendShapeError::InvalidSourceData {
                        shape: shape.name.clone(),
                        reason: format!(
                            "vertex {} maps to delta {} but shape has {} deltas",
                            original,
                            local,
                            shape.deltas.len()
                        ),
                    })
                }
            };
            mapped += 1;
        }
    }

    log::debug!(
        "[build_delta_buffer] {} shapes x {} vertices, {} mapped entries",
        shapes.len(),
        vertex_count,
        mapped
    );

    Ok(deltas)
}

/// Per-shape thresholds in shape order
pub fn collect_thresholds(shapes: &[BlendShapeSource]) -> Vec<f32> {
    shapes.iter().map(|shape| shape.threshold).collect()
}

/// Per-shape names in shape order
pub fn collect_names(shapes: &[BlendShapeSource]) -> Vec<String> {
    shapes.iter().map(|shape| shape.name.clone()).collect()
}
