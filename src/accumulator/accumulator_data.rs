//! Accumulator Data - Pure DOP
//!
//! NO METHODS. Just data.
//! All transformations happen in accumulator_operations.rs

use super::kernel::ActiveShape;
use crate::config::AccumulatorConfig;
use crate::thread_pool::BlendThreadPoolData;
use glam::Vec3;
use parking_lot::RwLock;
use std::sync::Arc;
use std::time::Duration;

/// Lifecycle of an accumulator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccumulatorState {
    Uninitialized,
    Ready,
    Disposed,
}

/// Blend shape accumulator buffers (Structure of Arrays)
#[derive(Debug)]
pub struct AccumulatorData {
    pub state: AccumulatorState,
    pub config: AccumulatorConfig,

    /// Worker pool for the vertex fan-out
    pub pool: BlendThreadPoolData,

    /// N
    pub shape_count: usize,

    /// V
    pub vertex_count: usize,

    /// Shape-major deltas (N * V), immutable after initialize
    pub deltas: Vec<Vec3>,

    /// Rest-pose positions (V), immutable after initialize
    pub base_positions: Vec<Vec3>,

    /// Per-shape frame weights (N), immutable after initialize
    pub thresholds: Vec<f32>,

    /// Live per-shape weights (N)
    pub weights: Vec<f32>,

    /// Deformed positions (V), rewritten by every tick
    pub output: Vec<Vec3>,

    /// Scratch list of shapes contributing to the current tick
    pub active_shapes: Vec<ActiveShape>,

    pub metrics: TickMetrics,
}

/// Per-tick bookkeeping
#[derive(Debug, Clone, Copy, Default)]
pub struct TickMetrics {
    pub tick_count: u64,
    pub last_active_shapes: usize,
    pub last_tick_duration: Duration,
}

/// Snapshot of accumulator size and activity
#[derive(Debug, Clone)]
pub struct AccumulatorStats {
    pub state: AccumulatorState,
    pub shape_count: usize,
    pub vertex_count: usize,
    pub active_shapes: usize,
    pub tick_count: u64,
    pub last_tick_micros: u128,
    pub deltas_size: usize,
    pub vertex_buffers_size: usize,
    pub weights_size: usize,
    pub total_size: usize,
}

/// Thread-safe shared accumulator (Arc<RwLock<>>)
pub type SharedAccumulator = Arc<RwLock<AccumulatorData>>;

impl std::fmt::Display for AccumulatorStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Accumulator[{:?}]: {} shapes x {} vertices, {} active, {} ticks (last {}us), {} bytes total (deltas: {}, vertices: {}, weights: {})",
            self.state,
            self.shape_count,
            self.vertex_count,
            self.active_shapes,
            self.tick_count,
            self.last_tick_micros,
            self.total_size,
            self.deltas_size,
            self.vertex_buffers_size,
            self.weights_size
        )
    }
}
