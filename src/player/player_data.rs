//! Player Data - Pure DOP
//!
//! NO METHODS. Just data.

use crate::accumulator::AccumulatorData;
use crate::binding::ShapeBindingTable;

/// One animated mesh: its accumulator plus the name table of its shapes
#[derive(Debug)]
pub struct PlayerData {
    pub accumulator: AccumulatorData,
    pub bindings: ShapeBindingTable,

    /// Completed updates
    pub frame: u64,
}
