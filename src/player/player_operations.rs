//! Player Operations - Pure DOP Functions
//!
//! Drives one frame in the fixed order: set weights, tick, consume output.

use super::player_data::PlayerData;
use super::player_traits::{MeshSink, WeightSource};
use crate::accumulator::{self, AccumulatorState};
use crate::binding::create_binding_table;
use crate::config::AccumulatorConfig;
use crate::error::BlendShapeResult;
use crate::source::{self, BlendShapeSource, GeometrySource};

/// Build and initialize a player from importer data
pub fn create_player(
    config: AccumulatorConfig,
    geometry: &GeometrySource,
    shapes: &[BlendShapeSource],
) -> BlendShapeResult<PlayerData> {
    let mut accumulator = accumulator::create_accumulator(config)?;
    accumulator::initialize_from_sources(&mut accumulator, geometry, shapes)?;
    let bindings = create_binding_table(source::collect_names(shapes));

    log::info!(
        "[create_player] Player ready: {} shapes over {} vertices",
        accumulator.shape_count,
        accumulator.vertex_count
    );

    Ok(PlayerData {
        accumulator,
        bindings,
        frame: 0,
    })
}

/// Advance one frame
pub fn update_player<S, M>(
    player: &mut PlayerData,
    weights: &mut S,
    sink: &mut M,
) -> BlendShapeResult<()>
where
    S: WeightSource + ?Sized,
    M: MeshSink + ?Sized,
{
    for index in 0..player.accumulator.shape_count {
        if let Some(value) = weights.shape_weight(index) {
            accumulator::set_weight(&mut player.accumulator, index, value)?;
        }
    }

    accumulator::tick(&mut player.accumulator)?;
    sink.upload_positions(accumulator::output(&player.accumulator)?)?;

    player.frame += 1;
    Ok(())
}

/// Whether the player can still be updated
pub fn is_active(player: &PlayerData) -> bool {
    player.accumulator.state == AccumulatorState::Ready
}

/// Tear down the player's accumulator
pub fn shutdown_player(player: &mut PlayerData) -> BlendShapeResult<()> {
    log::info!("[shutdown_player] Shutting down after {} frames", player.frame);
    accumulator::teardown(&mut player.accumulator)
}
