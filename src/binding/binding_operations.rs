//! Shape Binding Operations - Pure DOP Functions
//!
//! Thin adapter between named animation properties and the accumulator's
//! index-based weight array. Nothing here runs inside the tick.

use super::binding_data::ShapeBindingTable;
use crate::accumulator::{self, AccumulatorData};
use crate::error::BlendShapeResult;
use rustc_hash::FxHashMap;

/// Build a table from shape names in index order.
/// A repeated name keeps the index it was first seen at.
pub fn create_binding_table<I, S>(names: I) -> ShapeBindingTable
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let names: Vec<String> = names.into_iter().map(Into::into).collect();
    let mut index_by_name = FxHashMap::default();
    index_by_name.reserve(names.len());

    for (index, name) in names.iter().enumerate() {
        if let Some(&first) = index_by_name.get(name) {
            log::warn!(
                "[create_binding_table] Duplicate shape name '{}' at index {}, binding stays on index {}",
                name,
                index,
                first
            );
            continue;
        }
        index_by_name.insert(name.clone(), index);
    }

    ShapeBindingTable {
        names,
        index_by_name,
    }
}

/// Weight index bound to `name`
pub fn shape_index(table: &ShapeBindingTable, name: &str) -> Option<usize> {
    table.index_by_name.get(name).copied()
}

/// Name of the shape at `index`
pub fn shape_name(table: &ShapeBindingTable, index: usize) -> Option<&str> {
    table.names.get(index).map(String::as_str)
}

/// Number of shapes in the table
pub fn len(table: &ShapeBindingTable) -> usize {
    table.names.len()
}

/// Check if empty
pub fn is_empty(table: &ShapeBindingTable) -> bool {
    table.names.is_empty()
}

/// Write weights addressed by name. Unknown names are skipped.
/// Returns how many weights were written.
pub fn apply_named_weights<'a, I>(
    table: &ShapeBindingTable,
    data: &mut AccumulatorData,
    named_weights: I,
) -> BlendShapeResult<usize>
where
    I: IntoIterator<Item = (&'a str, f32)>,
{
    let mut applied = 0;
    for (name, value) in named_weights {
        match shape_index(table, name) {
            Some(index) => {
                accumulator::set_weight(data, index, value)?;
                applied += 1;
            }
            None => log::debug!("[apply_named_weights] No shape bound to '{}'", name),
        }
    }
    Ok(applied)
}
