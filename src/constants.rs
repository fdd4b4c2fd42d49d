//! Blend shape player constants
//!
//! Defaults shared by the config layer, the kernel and the demos.

/// Vertices handed to a worker per dispatch chunk
pub const DEFAULT_CHUNK_SIZE: usize = 4;

/// Largest chunk size accepted by config validation
pub const MAX_CHUNK_SIZE: usize = 1 << 16;

/// Shape cap of hosts that still address weights through a fixed named-property table
pub const LEGACY_SHAPE_CAP: usize = 2048;

/// Full-strength weight in the morph-target convention ([0, 100])
pub const DEFAULT_WEIGHT_SCALE: f32 = 100.0;

/// Name prefix for dedicated worker threads
pub const WORKER_THREAD_PREFIX: &str = "blendshape-worker";
