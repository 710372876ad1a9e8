//! Wander-path generation for idle agents

use std::f32::consts::TAU;

use glam::Vec2;
use rand::Rng;

use crate::ai::{Grid, Path};

/// Attempts to land on a walkable cell before giving up and staying put.
const MAX_SAMPLES: usize = 8;

/// Produce a short random path for idle movement.
///
/// The destination lies within `radius` of `from`, inside the grid, and on a
/// walkable cell when one can be sampled. Unlike the pathfinder this never
/// fails: if every sample lands on blocked ground the path simply stays at
/// `from`, and the caller will roll again next tick.
///
/// Randomness comes only from the injected `rng`, so a fixed seed replays
/// the same wander sequence.
pub fn wander(from: Vec2, grid: &Grid, radius: f32, rng: &mut impl Rng) -> Path {
    let margin = grid.cell_size * 0.5;
    let min = grid.world_min() + Vec2::splat(margin);
    let max = grid.world_max() - Vec2::splat(margin);

    for _ in 0..MAX_SAMPLES {
        let angle = rng.random_range(0.0..TAU);
        let distance = rng.random_range((radius * 0.25)..=radius);
        let candidate = from + Vec2::new(angle.cos(), angle.sin()) * distance;
        let candidate = candidate.clamp(min, max);

        if grid.is_walkable_world(candidate) {
            return Path::direct(candidate);
        }
    }

    Path::direct(from)
}
