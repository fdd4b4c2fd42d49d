//! Morph playback demo
//!
//! Builds a small grid mesh with three blend shapes, sweeps their weights
//! over a few frames and prints the deformed corner vertex each frame.
//!
//! Run with `RUST_LOG=debug cargo run --example morph_playback`.

use anyhow::Result;
use blendshape_player::{
    accumulator, create_player, shutdown_player, update_player, AccumulatorConfig,
    BlendShapeSource, GeometrySource, Vec3,
};
use rustc_hash::FxHashMap;

const GRID: u32 = 8;
const FRAMES: u32 = 12;

fn build_geometry() -> GeometrySource {
    let mut original_vertex_indices = Vec::new();
    let mut base_positions = Vec::new();
    for y in 0..GRID {
        for x in 0..GRID {
            original_vertex_indices.push(y * GRID + x);
            base_positions.push(Vec3::new(x as f32, y as f32, 0.0));
        }
    }
    GeometrySource {
        original_vertex_indices,
        base_positions,
    }
}

/// Shape touching only the vertices accepted by `select`
fn build_shape(
    name: &str,
    threshold: f32,
    delta: Vec3,
    select: impl Fn(u32, u32) -> bool,
) -> BlendShapeSource {
    let mut vertex_map = FxHashMap::default();
    let mut deltas = Vec::new();
    for y in 0..GRID {
        for x in 0..GRID {
            if select(x, y) {
                vertex_map.insert(y * GRID + x, deltas.len() as u32);
                deltas.push(delta);
            }
        }
    }
    BlendShapeSource {
        name: name.to_string(),
        threshold,
        vertex_map,
        deltas,
    }
}

fn main() -> Result<()> {
    env_logger::init();

    let geometry = build_geometry();
    let shapes = vec![
        build_shape("Bulge", 0.0, Vec3::Z, |x, y| x > 1 && x < 6 && y > 1 && y < 6),
        build_shape("LeanRight", 50.0, Vec3::X * 0.5, |_, y| y >= GRID / 2),
        build_shape("Lift", 80.0, Vec3::Y, |_, _| true),
    ];

    let config = AccumulatorConfig {
        chunk_size: 16,
        ..Default::default()
    };
    let mut player = create_player(config, &geometry, &shapes)?;
    let mut mesh: Vec<Vec3> = Vec::new();

    for frame in 0..FRAMES {
        let t = frame as f32 / (FRAMES - 1) as f32;
        let mut weights = vec![t * 100.0, (1.0 - t) * 100.0, t * t * 100.0];
        update_player(&mut player, &mut weights, &mut mesh)?;

        let corner = mesh[(GRID * GRID - 1) as usize];
        println!(
            "frame {:>2}: weights [{:>5.1}, {:>5.1}, {:>5.1}] -> corner ({:.2}, {:.2}, {:.2})",
            frame, weights[0], weights[1], weights[2], corner.x, corner.y, corner.z
        );
    }

    println!("{}", accumulator::stats(&player.accumulator));
    shutdown_player(&mut player)?;
    Ok(())
}
