//! Shape Binding Data - Pure DOP
//!
//! NO METHODS. Just data.
//! Lookups happen in binding_operations.rs

use rustc_hash::FxHashMap;

/// Name -> weight index table for hosts that address shapes by property name
#[derive(Debug, Clone, Default)]
pub struct ShapeBindingTable {
    /// Shape names in index order
    pub names: Vec<String>,

    /// First index registered for each name
    pub index_by_name: FxHashMap<String, usize>,
}
