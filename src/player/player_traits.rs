//! Seams to the animation driver and the mesh consumer

use crate::error::BlendShapeResult;
use glam::Vec3;

/// Supplies this frame's weight for each shape.
/// `None` leaves the shape's current weight in place.
pub trait WeightSource {
    fn shape_weight(&mut self, shape_index: usize) -> Option<f32>;
}

impl WeightSource for [f32] {
    fn shape_weight(&mut self, shape_index: usize) -> Option<f32> {
        self.get(shape_index).copied()
    }
}

impl WeightSource for Vec<f32> {
    fn shape_weight(&mut self, shape_index: usize) -> Option<f32> {
        self.as_mut_slice().shape_weight(shape_index)
    }
}

impl<F> WeightSource for F
where
    F: FnMut(usize) -> Option<f32>,
{
    fn shape_weight(&mut self, shape_index: usize) -> Option<f32> {
        self(shape_index)
    }
}

/// Receives the deformed positions once a tick has completed
pub trait MeshSink {
    fn upload_positions(&mut self, positions: &[Vec3]) -> BlendShapeResult<()>;
}

impl MeshSink for Vec<Vec3> {
    fn upload_positions(&mut self, positions: &[Vec3]) -> BlendShapeResult<()> {
        self.clear();
        self.extend_from_slice(positions);
        Ok(())
    }
}
