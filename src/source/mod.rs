//! Source Module - Data-Oriented Programming (DOP) style
//!
//! - source_data.rs: setup-time geometry and blend shape input, NO methods
//! - source_operations.rs: validation and sparse-to-dense transcription

pub mod source_data;
pub mod source_operations;

pub use source_data::{BlendShapeSource, GeometrySource};
pub use source_operations::{
    build_delta_buffer, collect_names, collect_thresholds, validate_geometry, vertex_count,
};
