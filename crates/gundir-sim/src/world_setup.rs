//! Target spawn factories for scenarios and tests.
//!
//! Creates target entities with the full component bundle the tracker
//! expects. The seeded RNG keeps generated scenarios reproducible.

use hecs::{Entity, World};
use rand::Rng;
use rand_chacha::ChaCha8Rng;

use gundir_core::components::{Category, RadarEcho, Target};
use gundir_core::enums::TargetCategory;
use gundir_core::types::{Position, Velocity};

/// Spawn a single target with the category's nominal cross-section.
pub fn spawn_target(
    world: &mut World,
    position: Position,
    velocity: Velocity,
    category: TargetCategory,
) -> Entity {
    world.spawn((
        Target,
        position,
        velocity,
        RadarEcho {
            rcs_m2: category.rcs_m2(),
        },
        Category(category),
    ))
}

/// Spawn a wave of inbound targets at random bearings, heading toward
/// the origin at the category's typical speed.
pub fn spawn_inbound_wave(
    world: &mut World,
    rng: &mut ChaCha8Rng,
    count: usize,
    category: TargetCategory,
) -> Vec<Entity> {
    (0..count)
        .map(|_| spawn_inbound(world, rng, category))
        .collect()
}

/// Spawn one inbound target at a random bearing and range.
pub fn spawn_inbound(world: &mut World, rng: &mut ChaCha8Rng, category: TargetCategory) -> Entity {
    let bearing: f64 = rng.gen_range(0.0..std::f64::consts::TAU);
    let range: f64 = rng.gen_range(8_000.0..15_000.0);
    let altitude: f64 = rng.gen_range(100.0..2_000.0);
    let speed = category_speed(category);

    // Bearing measured from North (y-axis) clockwise to East (x-axis).
    let x = range * bearing.sin();
    let y = range * bearing.cos();
    let position = Position::new(x, y, altitude);

    // Level flight toward the origin.
    let inbound = bearing + std::f64::consts::PI;
    let velocity = Velocity::new(speed * inbound.sin(), speed * inbound.cos(), 0.0);

    spawn_target(world, position, velocity, category)
}

/// Typical speed for a category (m/s).
fn category_speed(category: TargetCategory) -> f64 {
    match category {
        TargetCategory::Static => 0.0,
        TargetCategory::Slow => 60.0,
        TargetCategory::Fast => 250.0,
    }
}
