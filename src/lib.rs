// Blendshape Player - Data-Oriented Programming (DOP) Architecture
//
// Per-frame CPU blend shape evaluation over flat Structure-of-Arrays buffers.
// - *_data modules hold plain data, no methods
// - *_operations modules hold the transformations
//
// Frame order is always: set weights -> tick -> read output.

// Constants module
pub mod constants;

// Core modules
pub mod config;
pub mod error;

// Input data and worker pool
pub mod source;
pub mod thread_pool;

// Evaluation
pub mod accumulator;

// Host-facing adapters
pub mod binding;
pub mod player;

// Export configuration and error types
pub use config::{AccumulatorConfig, BlendMode};
pub use error::{BlendShapeError, BlendShapeResult};

#[cfg(feature = "toml-config")]
pub use config::{load_config, parse_config};

// Export accumulator data and functions
pub use accumulator::{
    create_accumulator, create_shared_accumulator, initialize, initialize_from_sources, output,
    output_bytes, reset_weights, set_weight, stats, teardown, threshold, thresholds, tick, weight,
    weights, AccumulatorData, AccumulatorState, AccumulatorStats, SharedAccumulator,
};

// Export source data
pub use source::{BlendShapeSource, GeometrySource};

// Export adapters
pub use binding::{apply_named_weights, create_binding_table, ShapeBindingTable};
pub use player::{
    create_player, shutdown_player, update_player, MeshSink, PlayerData, WeightSource,
};

// Re-export for hosts passing positions in and out
pub use glam::Vec3;
