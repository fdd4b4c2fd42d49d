//! Flat delta buffer layout
//!
//! Deltas are stored shape-major: shape `s`, vertex `v` lives at `s * V + v`,
//! so one shape's displacements form a contiguous row of `V` entries.

use glam::Vec3;

// The output buffer is handed to mesh consumers as packed f32 triples.
static_assertions::assert_eq_size!(Vec3, [f32; 3]);
static_assertions::assert_eq_align!(Vec3, f32);

/// Length of a delta buffer for `shape_count` shapes over `vertex_count` vertices
pub fn delta_buffer_len(shape_count: usize, vertex_count: usize) -> Option<usize> {
    shape_count.checked_mul(vertex_count)
}

/// Index of shape `shape`'s delta for vertex `vertex`
#[inline]
pub fn delta_index(shape: usize, vertex: usize, vertex_count: usize) -> usize {
    shape * vertex_count + vertex
}

/// Row of deltas belonging to one shape. Panics if `shape` is out of range.
pub fn shape_deltas(deltas: &[Vec3], shape: usize, vertex_count: usize) -> &[Vec3] {
    let start = delta_index(shape, 0, vertex_count);
    &deltas[start..start + vertex_count]
}

/// Mutable row of deltas belonging to one shape. Panics if `shape` is out of range.
pub fn shape_deltas_mut(deltas: &mut [Vec3], shape: usize, vertex_count: usize) -> &mut [Vec3] {
    let start = delta_index(shape, 0, vertex_count);
    &mut deltas[start..start + vertex_count]
}
