/// Accumulator Module - Data-Oriented Programming (DOP) style
///
/// This module follows pure DOP principles:
/// - accumulator_data.rs: Pure data structures with NO methods
/// - accumulator_operations.rs: Pure functions that operate on data
/// - layout.rs / kernel.rs: buffer indexing and the per-vertex blend

pub mod accumulator_data;
pub mod accumulator_operations;
pub mod kernel;
pub mod layout;

// Re-export data structures
pub use accumulator_data::{
    AccumulatorData, AccumulatorState, AccumulatorStats, SharedAccumulator, TickMetrics,
};
pub use kernel::ActiveShape;

// Re-export all operations
pub use accumulator_operations::{
    // Creation
    create_accumulator,
    create_shared_accumulator,

    // Setup
    initialize,
    initialize_from_sources,

    // Weights
    set_weight,
    weight,
    weights,
    threshold,
    thresholds,
    reset_weights,

    // Tick
    tick,

    // Output
    output,
    output_bytes,
    stats,

    // Teardown
    teardown,
};
