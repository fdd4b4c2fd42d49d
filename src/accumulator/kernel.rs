//! Per-vertex blend kernel and chunked dispatch
//!
//! Each vertex is independent: its result is the rest position plus the
//! contribution of every active shape, summed in ascending shape order.
//! Dispatch splits the output into fixed-size chunks and joins before
//! returning, so callers never observe a partially written buffer.

use super::layout::delta_index;
use crate::config::BlendMode;
use crate::thread_pool::{run_on_pool, BlendThreadPoolData};
use glam::Vec3;
use rayon::prelude::*;

/// A shape contributing to the current tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ActiveShape {
    pub shape: usize,
    pub factor: f32,
}

/// Fill `out` with the shapes that contribute this tick.
///
/// `Threshold` keeps shapes whose weight is strictly greater than their
/// threshold, at full strength. `Weighted` keeps every shape with a non-zero
/// normalized weight and ignores thresholds.
pub fn collect_active_shapes(
    weights: &[f32],
    thresholds: &[f32],
    mode: BlendMode,
    weight_scale: f32,
    out: &mut Vec<ActiveShape>,
) {
    out.clear();

    match mode {
        BlendMode::Threshold => {
            out.extend(
                weights
                    .iter()
                    .zip(thresholds)
                    .enumerate()
                    .filter(|(_, (weight, threshold))| weight > threshold)
                    .map(|(shape, _)| ActiveShape { shape, factor: 1.0 }),
            );
        }
        BlendMode::Weighted => {
            out.extend(
                weights
                    .iter()
                    .enumerate()
                    .map(|(shape, weight)| ActiveShape {
                        shape,
                        factor: weight / weight_scale,
                    })
                    .filter(|active| active.factor != 0.0),
            );
        }
    }
}

/// Deformed position of one vertex
#[inline]
pub fn blend_vertex(
    vertex: usize,
    base: Vec3,
    deltas: &[Vec3],
    vertex_count: usize,
    active: &[ActiveShape],
) -> Vec3 {
    active.iter().fold(base, |position, active| {
        position + deltas[delta_index(active.shape, vertex, vertex_count)] * active.factor
    })
}

fn blend_chunk(
    first_vertex: usize,
    output: &mut [Vec3],
    base: &[Vec3],
    deltas: &[Vec3],
    vertex_count: usize,
    active: &[ActiveShape],
) {
    for (offset, (slot, &rest)) in output.iter_mut().zip(base).enumerate() {
        *slot = blend_vertex(first_vertex + offset, rest, deltas, vertex_count, active);
    }
}

/// Recompute `output` from `base` and the active shapes.
///
/// With `parallel` set, chunks of `chunk_size` vertices run on `pool` and the
/// call blocks until all of them are done. Otherwise the same chunks run in
/// order on the calling thread.
pub fn blend_into(
    output: &mut [Vec3],
    base: &[Vec3],
    deltas: &[Vec3],
    active: &[ActiveShape],
    chunk_size: usize,
    parallel: bool,
    pool: &BlendThreadPoolData,
) {
    debug_assert_eq!(output.len(), base.len());
    debug_assert!(chunk_size > 0);

    if active.is_empty() {
        output.copy_from_slice(base);
        return;
    }

    let vertex_count = base.len();

    if parallel {
        run_on_pool(pool, || {
            output
                .par_chunks_mut(chunk_size)
                .zip(base.par_chunks(chunk_size))
                .enumerate()
                .for_each(|(chunk_index, (out, rest))| {
                    blend_chunk(chunk_index * chunk_size, out, rest, deltas, vertex_count, active);
                });
        });
    } else {
        output
            .chunks_mut(chunk_size)
            .zip(base.chunks(chunk_size))
            .enumerate()
            .for_each(|(chunk_index, (out, rest))| {
                blend_chunk(chunk_index * chunk_size, out, rest, deltas, vertex_count, active);
            });
    }
}
