//! Binding Module - named property adapter
//!
//! - binding_data.rs: the name table, NO methods
//! - binding_operations.rs: lookups and named weight writes

pub mod binding_data;
pub mod binding_operations;

pub use binding_data::ShapeBindingTable;
pub use binding_operations::{
    apply_named_weights, create_binding_table, shape_index, shape_name,
};
