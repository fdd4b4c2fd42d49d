//! Accumulator Operations - Pure DOP Functions
//!
//! No methods, no self, just transformations on AccumulatorData.
//!
//! Phase order per frame is set weights -> tick -> read output. Both
//! `set_weight` and `tick` take `&mut AccumulatorData`, so a tick can never
//! overlap weight writes, and `output` borrows immutably until the next tick.

use super::accumulator_data::{
    AccumulatorData, AccumulatorState, AccumulatorStats, SharedAccumulator, TickMetrics,
};
use super::kernel;
use super::layout;
use crate::config::AccumulatorConfig;
use crate::error::{BlendShapeError, BlendShapeResult};
use crate::source::{self, BlendShapeSource, GeometrySource};
use crate::thread_pool::{create_thread_pool_data, BlendThreadPoolConfig};
use glam::Vec3;
use parking_lot::RwLock;
use std::sync::Arc;
use std::time::Instant;

// ============================================================================
// CREATION
// ============================================================================

/// Create an uninitialized accumulator
pub fn create_accumulator(config: AccumulatorConfig) -> BlendShapeResult<AccumulatorData> {
    config.validate()?;

    let pool = create_thread_pool_data(BlendThreadPoolConfig {
        worker_threads: config.worker_threads,
    })?;

    Ok(AccumulatorData {
        state: AccumulatorState::Uninitialized,
        config,
        pool,
        shape_count: 0,
        vertex_count: 0,
        deltas: Vec::new(),
        base_positions: Vec::new(),
        thresholds: Vec::new(),
        weights: Vec::new(),
        output: Vec::new(),
        active_shapes: Vec::new(),
        metrics: TickMetrics::default(),
    })
}

/// Create an uninitialized accumulator behind Arc<RwLock<>>
pub fn create_shared_accumulator(config: AccumulatorConfig) -> BlendShapeResult<SharedAccumulator> {
    Ok(Arc::new(RwLock::new(create_accumulator(config)?)))
}

// ============================================================================
// SETUP
// ============================================================================

/// Take ownership of copies of the setup buffers and enter `Ready`.
///
/// `deltas` is shape-major (`shape_count * vertex_count`), `base_positions`
/// has one entry per vertex and `thresholds` one per shape.
pub fn initialize(
    data: &mut AccumulatorData,
    shape_count: usize,
    vertex_count: usize,
    deltas: &[Vec3],
    base_positions: &[Vec3],
    thresholds: &[f32],
) -> BlendShapeResult<()> {
    require_uninitialized(data)?;
    check_dimensions(
        &data.config,
        shape_count,
        vertex_count,
        deltas.len(),
        base_positions.len(),
        thresholds.len(),
    )?;

    install_buffers(
        data,
        shape_count,
        vertex_count,
        deltas.to_vec(),
        base_positions.to_vec(),
        thresholds.to_vec(),
    );
    Ok(())
}

/// Build the dense buffers from importer data and enter `Ready`
pub fn initialize_from_sources(
    data: &mut AccumulatorData,
    geometry: &GeometrySource,
    shapes: &[BlendShapeSource],
) -> BlendShapeResult<()> {
    require_uninitialized(data)?;
    if let Some(cap) = data.config.max_shapes {
        check_capacity(shapes.len(), cap)?;
    }

    let deltas = source::build_delta_buffer(geometry, shapes)?;
    let thresholds = source::collect_thresholds(shapes);
    let vertex_count = source::vertex_count(geometry);

    check_dimensions(
        &data.config,
        shapes.len(),
        vertex_count,
        deltas.len(),
        geometry.base_positions.len(),
        thresholds.len(),
    )?;

    install_buffers(
        data,
        shapes.len(),
        vertex_count,
        deltas,
        geometry.base_positions.clone(),
        thresholds,
    );
    Ok(())
}

fn check_capacity(shape_count: usize, cap: usize) -> BlendShapeResult<()> {
    if shape_count > cap {
        log::error!(
            "[initialize] {} shapes requested but the configured cap is {}",
            shape_count,
            cap
        );
        return Err(BlendShapeError::CapacityExceeded { shape_count, cap });
    }
    Ok(())
}

fn check_dimensions(
    config: &AccumulatorConfig,
    shape_count: usize,
    vertex_count: usize,
    deltas_len: usize,
    base_len: usize,
    thresholds_len: usize,
) -> BlendShapeResult<()> {
    if let Some(cap) = config.max_shapes {
        check_capacity(shape_count, cap)?;
    }

    let expected_deltas = layout::delta_buffer_len(shape_count, vertex_count).ok_or(
        BlendShapeError::DimensionMismatch {
            buffer: "deltas",
            expected: usize::MAX,
            found: deltas_len,
        },
    )?;

    let checks = [
        ("deltas", expected_deltas, deltas_len),
        ("base_positions", vertex_count, base_len),
        ("thresholds", shape_count, thresholds_len),
    ];

    for (buffer, expected, found) in checks {
        if expected != found {
            log::error!(
                "[initialize] {} has {} entries, expected {}",
                buffer,
                found,
                expected
            );
            return Err(BlendShapeError::DimensionMismatch {
                buffer,
                expected,
                found,
            });
        }
    }
    Ok(())
}

fn install_buffers(
    data: &mut AccumulatorData,
    shape_count: usize,
    vertex_count: usize,
    deltas: Vec<Vec3>,
    base_positions: Vec<Vec3>,
    thresholds: Vec<f32>,
) {
    data.shape_count = shape_count;
    data.vertex_count = vertex_count;
    data.output = base_positions.clone();
    data.deltas = deltas;
    data.base_positions = base_positions;
    data.thresholds = thresholds;
    data.weights = vec![0.0; shape_count];
    data.active_shapes = Vec::with_capacity(shape_count);
    data.metrics = TickMetrics::default();
    data.state = AccumulatorState::Ready;

    log::info!(
        "[initialize] Accumulator ready: {} shapes x {} vertices, chunk_size={}, workers={}",
        shape_count,
        vertex_count,
        data.config.chunk_size,
        data.pool.worker_count
    );
}

// ============================================================================
// WEIGHTS
// ============================================================================

/// Set the live weight of one shape
pub fn set_weight(data: &mut AccumulatorData, index: usize, value: f32) -> BlendShapeResult<()> {
    require_ready(data, "set_weight")?;
    check_index(data, index)?;

    if !value.is_finite() {
        return Err(BlendShapeError::InvalidWeight { index, value });
    }

    data.weights[index] = value;
    Ok(())
}

/// Live weight of one shape
pub fn weight(data: &AccumulatorData, index: usize) -> BlendShapeResult<f32> {
    require_ready(data, "weight")?;
    check_index(data, index)?;
    Ok(data.weights[index])
}

/// All live weights in shape order
pub fn weights(data: &AccumulatorData) -> BlendShapeResult<&[f32]> {
    require_ready(data, "weights")?;
    Ok(&data.weights)
}

/// Threshold of one shape
pub fn threshold(data: &AccumulatorData, index: usize) -> BlendShapeResult<f32> {
    require_ready(data, "threshold")?;
    check_index(data, index)?;
    Ok(data.thresholds[index])
}

/// All thresholds in shape order
pub fn thresholds(data: &AccumulatorData) -> BlendShapeResult<&[f32]> {
    require_ready(data, "thresholds")?;
    Ok(&data.thresholds)
}

/// Set every live weight back to zero
pub fn reset_weights(data: &mut AccumulatorData) -> BlendShapeResult<()> {
    require_ready(data, "reset_weights")?;
    data.weights.fill(0.0);
    Ok(())
}

// ============================================================================
// TICK
// ============================================================================

/// Recompute the whole output buffer from the current weights.
/// Returns once every dispatched chunk has completed.
pub fn tick(data: &mut AccumulatorData) -> BlendShapeResult<()> {
    require_ready(data, "tick")?;
    let started = Instant::now();

    let AccumulatorData {
        config,
        pool,
        deltas,
        base_positions,
        thresholds,
        weights,
        output,
        active_shapes,
        metrics,
        ..
    } = data;

    kernel::collect_active_shapes(
        weights,
        thresholds,
        config.blend_mode,
        config.weight_scale,
        active_shapes,
    );
    kernel::blend_into(
        output,
        base_positions,
        deltas,
        active_shapes,
        config.chunk_size,
        config.parallel,
        pool,
    );

    metrics.tick_count += 1;
    metrics.last_active_shapes = active_shapes.len();
    metrics.last_tick_duration = started.elapsed();

    log::trace!(
        "[tick] #{}: {} active shapes over {} vertices in {:?}",
        metrics.tick_count,
        metrics.last_active_shapes,
        output.len(),
        metrics.last_tick_duration
    );
    Ok(())
}

// ============================================================================
// OUTPUT
// ============================================================================

/// Deformed positions from the last tick (base positions before the first)
pub fn output(data: &AccumulatorData) -> BlendShapeResult<&[Vec3]> {
    require_ready(data, "output")?;
    Ok(&data.output)
}

/// Deformed positions as packed f32 bytes, for direct vertex buffer upload
pub fn output_bytes(data: &AccumulatorData) -> BlendShapeResult<&[u8]> {
    require_ready(data, "output_bytes")?;
    Ok(bytemuck::cast_slice(&data.output))
}

/// Get memory and activity statistics
pub fn stats(data: &AccumulatorData) -> AccumulatorStats {
    let deltas_size = data.deltas.len() * std::mem::size_of::<Vec3>();
    let vertex_buffers_size =
        (data.base_positions.len() + data.output.len()) * std::mem::size_of::<Vec3>();
    let weights_size = (data.weights.len() + data.thresholds.len()) * std::mem::size_of::<f32>();

    AccumulatorStats {
        state: data.state,
        shape_count: data.shape_count,
        vertex_count: data.vertex_count,
        active_shapes: data.metrics.last_active_shapes,
        tick_count: data.metrics.tick_count,
        last_tick_micros: data.metrics.last_tick_duration.as_micros(),
        deltas_size,
        vertex_buffers_size,
        weights_size,
        total_size: deltas_size + vertex_buffers_size + weights_size,
    }
}

// ============================================================================
// TEARDOWN
// ============================================================================

/// Release every owned buffer and enter the terminal `Disposed` state
pub fn teardown(data: &mut AccumulatorData) -> BlendShapeResult<()> {
    require_ready(data, "teardown")?;

    log::info!("[teardown] Releasing accumulator: {}", stats(data));

    data.deltas = Vec::new();
    data.base_positions = Vec::new();
    data.thresholds = Vec::new();
    data.weights = Vec::new();
    data.output = Vec::new();
    data.active_shapes = Vec::new();
    data.shape_count = 0;
    data.vertex_count = 0;
    data.state = AccumulatorState::Disposed;
    Ok(())
}

// ============================================================================
// STATE CHECKS
// ============================================================================

fn require_ready(data: &AccumulatorData, operation: &'static str) -> BlendShapeResult<()> {
    match data.state {
        AccumulatorState::Ready => Ok(()),
        AccumulatorState::Uninitialized => Err(BlendShapeError::UseBeforeInitialize { operation }),
        AccumulatorState::Disposed => Err(BlendShapeError::UseAfterTeardown { operation }),
    }
}

fn require_uninitialized(data: &AccumulatorData) -> BlendShapeResult<()> {
    match data.state {
        AccumulatorState::Uninitialized => Ok(()),
        AccumulatorState::Ready => Err(BlendShapeError::AlreadyInitialized),
        AccumulatorState::Disposed => Err(BlendShapeError::UseAfterTeardown {
            operation: "initialize",
        }),
    }
}

fn check_index(data: &AccumulatorData, index: usize) -> BlendShapeResult<()> {
    if index >= data.shape_count {
        return Err(BlendShapeError::IndexOutOfRange {
            index,
            len: data.shape_count,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::BlendMode;
    use rand::{Rng, SeedableRng};
    use rustc_hash::FxHashMap;

    /// N=3, V=4, base at origin, shape s displaces every vertex along axis s.
    fn scenario() -> AccumulatorData {
        let mut data = create_accumulator(AccumulatorConfig::default()).expect("accumulator");
        let mut deltas = Vec::new();
        deltas.extend([Vec3::X; 4]);
        deltas.extend([Vec3::Y; 4]);
        deltas.extend([Vec3::Z; 4]);

        initialize(&mut data, 3, 4, &deltas, &[Vec3::ZERO; 4], &[0.0, 50.0, 50.0])
            .expect("scenario should initialize");
        data
    }

    /// Distinct base positions and per-vertex deltas so row mixups show up.
    fn varied(shape_count: usize, vertex_count: usize, config: AccumulatorConfig) -> AccumulatorData {
        let mut data = create_accumulator(config).expect("accumulator");
        let base: Vec<Vec3> = (0..vertex_count)
            .map(|v| Vec3::new(v as f32, -(v as f32), 0.5))
            .collect();
        let deltas: Vec<Vec3> = (0..shape_count * vertex_count)
            .map(|i| Vec3::new((i % 7) as f32, (i % 5) as f32 * 0.25, (i % 3) as f32 * -2.0))
            .collect();
        let thresholds = vec![0.0; shape_count];
        initialize(&mut data, shape_count, vertex_count, &deltas, &base, &thresholds)
            .expect("valid buffers");
        data
    }

    #[test]
    fn test_scenario_three_shapes_four_vertices() {
        let mut data = scenario();
        set_weight(&mut data, 0, 10.0).unwrap();
        set_weight(&mut data, 1, 60.0).unwrap();
        set_weight(&mut data, 2, 40.0).unwrap();
        tick(&mut data).unwrap();

        let out = output(&data).unwrap();
        assert_eq!(out.len(), 4);
        assert!(out.iter().all(|p| *p == Vec3::new(1.0, 1.0, 0.0)));
        assert_eq!(stats(&data).active_shapes, 2);
    }

    #[test]
    fn test_rest_state_matches_base() {
        let mut data = varied(5, 33, AccumulatorConfig::default());
        // Weights all zero == thresholds: nothing active.
        tick(&mut data).unwrap();
        assert_eq!(output(&data).unwrap(), &data.base_positions[..]);

        for s in 0..5 {
            set_weight(&mut data, s, -3.0).unwrap();
        }
        tick(&mut data).unwrap();
        assert_eq!(output(&data).unwrap(), &data.base_positions[..]);
    }

    #[test]
    fn test_single_shape_activation() {
        let mut data = varied(4, 10, AccumulatorConfig::default());
        set_weight(&mut data, 2, 1.0).unwrap();
        tick(&mut data).unwrap();

        let out = output(&data).unwrap();
        for v in 0..10 {
            let expected = data.base_positions[v] + data.deltas[layout::delta_index(2, v, 10)];
            assert_eq!(out[v], expected);
        }
    }

    #[test]
    fn test_two_shapes_are_additive() {
        let mut data = varied(4, 10, AccumulatorConfig::default());
        set_weight(&mut data, 3, 1.0).unwrap();
        set_weight(&mut data, 1, 1.0).unwrap();
        tick(&mut data).unwrap();

        let out = output(&data).unwrap();
        for v in 0..10 {
            let expected = data.base_positions[v]
                + data.deltas[layout::delta_index(1, v, 10)]
                + data.deltas[layout::delta_index(3, v, 10)];
            assert_eq!(out[v], expected);
        }
    }

    #[test]
    fn test_threshold_boundary() {
        let mut data = scenario();

        set_weight(&mut data, 1, 50.0).unwrap();
        tick(&mut data).unwrap();
        assert!(output(&data).unwrap().iter().all(|p| *p == Vec3::ZERO));

        let above = 50.0_f32 + 50.0 * f32::EPSILON;
        assert!(above > 50.0);
        set_weight(&mut data, 1, above).unwrap();
        tick(&mut data).unwrap();
        assert!(output(&data).unwrap().iter().all(|p| *p == Vec3::Y));
    }

    #[test]
    fn test_tick_is_idempotent() {
        let mut data = varied(6, 25, AccumulatorConfig::default());
        set_weight(&mut data, 0, 2.0).unwrap();
        set_weight(&mut data, 4, 2.0).unwrap();

        tick(&mut data).unwrap();
        let first = output(&data).unwrap().to_vec();
        tick(&mut data).unwrap();
        assert_eq!(output(&data).unwrap(), &first[..]);
        assert_eq!(stats(&data).tick_count, 2);
    }

    #[test]
    fn test_unmapped_vertex_gets_no_displacement() {
        let geometry = GeometrySource {
            original_vertex_indices: vec![100, 101, 102],
            base_positions: vec![Vec3::ZERO, Vec3::ONE, Vec3::splat(2.0)],
        };
        let full: FxHashMap<u32, u32> = [(100, 0), (101, 1), (102, 2)].into_iter().collect();
        let partial: FxHashMap<u32, u32> = [(100, 0), (102, 1)].into_iter().collect();
        let shapes = vec![
            BlendShapeSource {
                name: "full".to_string(),
                threshold: 0.0,
                vertex_map: full,
                deltas: vec![Vec3::X; 3],
            },
            BlendShapeSource {
                name: "partial".to_string(),
                threshold: 0.0,
                vertex_map: partial,
                deltas: vec![Vec3::Z; 2],
            },
        ];

        let mut data = create_accumulator(AccumulatorConfig::default()).unwrap();
        initialize_from_sources(&mut data, &geometry, &shapes).unwrap();
        set_weight(&mut data, 0, 1.0).unwrap();
        set_weight(&mut data, 1, 1.0).unwrap();
        tick(&mut data).unwrap();

        let out = output(&data).unwrap();
        assert_eq!(out[0], Vec3::X + Vec3::Z);
        // Vertex 101 is missing from "partial": base plus "full" only.
        assert_eq!(out[1], Vec3::ONE + Vec3::X);
        assert_eq!(out[2], Vec3::splat(2.0) + Vec3::X + Vec3::Z);
    }

    #[test]
    fn test_results_independent_of_chunking() {
        let mut rng = rand::rngs::StdRng::seed_from_u64(7);
        let shape_count = 9;
        let vertex_count = 257;

        let base: Vec<Vec3> = (0..vertex_count)
            .map(|_| Vec3::new(rng.gen_range(-1.0..1.0), rng.gen_range(-1.0..1.0), rng.gen_range(-1.0..1.0)))
            .collect();
        let deltas: Vec<Vec3> = (0..shape_count * vertex_count)
            .map(|_| Vec3::new(rng.gen_range(-0.1..0.1), rng.gen_range(-0.1..0.1), rng.gen_range(-0.1..0.1)))
            .collect();
        let thresholds: Vec<f32> = (0..shape_count).map(|_| rng.gen_range(0.0..100.0)).collect();
        let weights: Vec<f32> = (0..shape_count).map(|_| rng.gen_range(0.0..100.0)).collect();

        let configs = [
            AccumulatorConfig {
                parallel: false,
                chunk_size: vertex_count,
                ..Default::default()
            },
            AccumulatorConfig::default(),
            AccumulatorConfig {
                chunk_size: 1,
                ..Default::default()
            },
            AccumulatorConfig {
                chunk_size: 64,
                worker_threads: 2,
                ..Default::default()
            },
        ];

        let mut outputs = Vec::new();
        for config in configs {
            let mut data = create_accumulator(config).unwrap();
            initialize(&mut data, shape_count, vertex_count, &deltas, &base, &thresholds).unwrap();
            for (s, w) in weights.iter().enumerate() {
                set_weight(&mut data, s, *w).unwrap();
            }
            tick(&mut data).unwrap();
            outputs.push(output(&data).unwrap().to_vec());
        }

        for other in &outputs[1..] {
            assert_eq!(other, &outputs[0]);
        }
    }

    #[test]
    fn test_weighted_mode_scales_deltas() {
        let config = AccumulatorConfig {
            blend_mode: BlendMode::Weighted,
            ..Default::default()
        };
        let mut data = create_accumulator(config).unwrap();
        let deltas = [Vec3::new(2.0, 0.0, 0.0), Vec3::new(0.0, 4.0, 0.0)];
        // Thresholds are ignored in weighted mode.
        initialize(&mut data, 2, 1, &deltas, &[Vec3::ONE], &[90.0, 90.0]).unwrap();

        set_weight(&mut data, 0, 50.0).unwrap();
        set_weight(&mut data, 1, 25.0).unwrap();
        tick(&mut data).unwrap();
        assert_eq!(output(&data).unwrap()[0], Vec3::new(2.0, 2.0, 1.0));
    }

    #[test]
    fn test_weights_start_at_zero_and_reset() {
        let mut data = scenario();
        assert_eq!(weights(&data).unwrap(), &[0.0f32; 3]);
        assert_eq!(thresholds(&data).unwrap(), &[0.0f32, 50.0, 50.0]);
        assert_eq!(threshold(&data, 2).unwrap(), 50.0);

        set_weight(&mut data, 2, 75.0).unwrap();
        assert_eq!(weight(&data, 2).unwrap(), 75.0);

        reset_weights(&mut data).unwrap();
        assert_eq!(weights(&data).unwrap(), &[0.0f32; 3]);
    }

    #[test]
    fn test_output_before_first_tick_is_base() {
        let data = varied(2, 3, AccumulatorConfig::default());
        assert_eq!(output(&data).unwrap(), &data.base_positions[..]);
    }

    #[test]
    fn test_index_out_of_range() {
        let mut data = scenario();
        assert_eq!(
            set_weight(&mut data, 3, 1.0),
            Err(BlendShapeError::IndexOutOfRange { index: 3, len: 3 })
        );
        assert!(matches!(
            weight(&data, 99),
            Err(BlendShapeError::IndexOutOfRange { index: 99, len: 3 })
        ));
        assert!(matches!(
            threshold(&data, 3),
            Err(BlendShapeError::IndexOutOfRange { .. })
        ));
    }

    #[test]
    fn test_non_finite_weight_rejected() {
        let mut data = scenario();
        assert!(matches!(
            set_weight(&mut data, 0, f32::NAN),
            Err(BlendShapeError::InvalidWeight { index: 0, .. })
        ));
        assert!(set_weight(&mut data, 0, f32::INFINITY).is_err());
        assert_eq!(weight(&data, 0).unwrap(), 0.0);
    }

    #[test]
    fn test_dimension_mismatches() {
        let mut data = create_accumulator(AccumulatorConfig::default()).unwrap();
        assert_eq!(
            initialize(&mut data, 2, 3, &[Vec3::ZERO; 5], &[Vec3::ZERO; 3], &[0.0; 2]),
            Err(BlendShapeError::DimensionMismatch {
                buffer: "deltas",
                expected: 6,
                found: 5
            })
        );
        assert_eq!(
            initialize(&mut data, 2, 3, &[Vec3::ZERO; 6], &[Vec3::ZERO; 2], &[0.0; 2]),
            Err(BlendShapeError::DimensionMismatch {
                buffer: "base_positions",
                expected: 3,
                found: 2
            })
        );
        assert_eq!(
            initialize(&mut data, 2, 3, &[Vec3::ZERO; 6], &[Vec3::ZERO; 3], &[0.0; 1]),
            Err(BlendShapeError::DimensionMismatch {
                buffer: "thresholds",
                expected: 2,
                found: 1
            })
        );
        // Failed setup leaves the accumulator usable.
        assert_eq!(data.state, AccumulatorState::Uninitialized);
        assert!(initialize(&mut data, 2, 3, &[Vec3::ZERO; 6], &[Vec3::ZERO; 3], &[0.0; 2]).is_ok());
    }

    #[test]
    fn test_capacity_cap() {
        let config = AccumulatorConfig {
            max_shapes: Some(2),
            ..Default::default()
        };
        let mut data = create_accumulator(config).unwrap();
        assert_eq!(
            initialize(&mut data, 3, 1, &[Vec3::ZERO; 3], &[Vec3::ZERO], &[0.0; 3]),
            Err(BlendShapeError::CapacityExceeded {
                shape_count: 3,
                cap: 2
            })
        );
        assert!(initialize(&mut data, 2, 1, &[Vec3::ZERO; 2], &[Vec3::ZERO], &[0.0; 2]).is_ok());
    }

    #[test]
    fn test_capacity_cap_from_sources() {
        let config = AccumulatorConfig {
            max_shapes: Some(1),
            ..Default::default()
        };
        let mut data = create_accumulator(config).unwrap();
        let shapes = vec![BlendShapeSource::default(), BlendShapeSource::default()];
        assert!(matches!(
            initialize_from_sources(&mut data, &GeometrySource::default(), &shapes),
            Err(BlendShapeError::CapacityExceeded { shape_count: 2, cap: 1 })
        ));
    }

    #[test]
    fn test_use_before_initialize() {
        let mut data = create_accumulator(AccumulatorConfig::default()).unwrap();
        assert_eq!(
            tick(&mut data),
            Err(BlendShapeError::UseBeforeInitialize { operation: "tick" })
        );
        assert!(matches!(
            set_weight(&mut data, 0, 1.0),
            Err(BlendShapeError::UseBeforeInitialize { .. })
        ));
        assert!(matches!(
            output(&data),
            Err(BlendShapeError::UseBeforeInitialize { .. })
        ));
        assert!(matches!(
            teardown(&mut data),
            Err(BlendShapeError::UseBeforeInitialize { .. })
        ));
    }

    #[test]
    fn test_initialize_twice_rejected() {
        let mut data = scenario();
        assert_eq!(
            initialize(&mut data, 1, 1, &[Vec3::ZERO], &[Vec3::ZERO], &[0.0]),
            Err(BlendShapeError::AlreadyInitialized)
        );
    }

    #[test]
    fn test_teardown_releases_and_is_terminal() {
        let mut data = scenario();
        tick(&mut data).unwrap();
        teardown(&mut data).unwrap();

        assert_eq!(data.state, AccumulatorState::Disposed);
        assert_eq!(stats(&data).total_size, 0);
        assert_eq!(data.deltas.capacity(), 0);

        assert_eq!(
            teardown(&mut data),
            Err(BlendShapeError::UseAfterTeardown {
                operation: "teardown"
            })
        );
        assert!(matches!(
            tick(&mut data),
            Err(BlendShapeError::UseAfterTeardown { .. })
        ));
        assert!(matches!(
            weights(&data),
            Err(BlendShapeError::UseAfterTeardown { .. })
        ));
        assert!(matches!(
            initialize(&mut data, 1, 1, &[Vec3::ZERO], &[Vec3::ZERO], &[0.0]),
            Err(BlendShapeError::UseAfterTeardown {
                operation: "initialize"
            })
        ));
    }

    #[test]
    fn test_zero_shapes_and_zero_vertices() {
        let mut data = create_accumulator(AccumulatorConfig::default()).unwrap();
        initialize(&mut data, 0, 2, &[], &[Vec3::ONE, Vec3::X], &[]).unwrap();
        tick(&mut data).unwrap();
        assert_eq!(output(&data).unwrap(), &[Vec3::ONE, Vec3::X]);

        let mut data = create_accumulator(AccumulatorConfig::default()).unwrap();
        initialize(&mut data, 2, 0, &[], &[], &[0.0, 0.0]).unwrap();
        set_weight(&mut data, 1, 5.0).unwrap();
        tick(&mut data).unwrap();
        assert!(output(&data).unwrap().is_empty());
    }

    #[test]
    fn test_output_bytes_are_packed_floats() {
        let mut data = scenario();
        set_weight(&mut data, 0, 1.0).unwrap();
        tick(&mut data).unwrap();

        let bytes = output_bytes(&data).unwrap();
        assert_eq!(bytes.len(), 4 * 3 * std::mem::size_of::<f32>());
        let floats: &[f32] = bytemuck::cast_slice(bytes);
        assert_eq!(&floats[..3], &[1.0f32, 0.0, 0.0]);
    }

    #[test]
    fn test_stats_display() {
        let data = scenario();
        let stats = stats(&data);
        assert_eq!(stats.deltas_size, 12 * 12);
        assert_eq!(stats.vertex_buffers_size, 8 * 12);
        assert_eq!(stats.weights_size, 6 * 4);
        assert!(stats.to_string().starts_with("Accumulator[Ready]: 3 shapes x 4 vertices"));
    }

    #[test]
    fn test_shared_accumulator_phases() {
        let shared = create_shared_accumulator(AccumulatorConfig::default()).unwrap();
        {
            let mut data = shared.write();
            initialize(&mut data, 1, 2, &[Vec3::Y; 2], &[Vec3::ZERO; 2], &[0.0]).unwrap();
            set_weight(&mut data, 0, 1.0).unwrap();
            tick(&mut data).unwrap();
        }

        let reader = Arc::clone(&shared);
        let consumed = std::thread::spawn(move || {
            let data = reader.read();
            output(&data).map(|positions| positions.to_vec())
        })
        .join()
        .expect("consumer thread");

        assert_eq!(consumed.unwrap(), vec![Vec3::Y; 2]);
    }
}
