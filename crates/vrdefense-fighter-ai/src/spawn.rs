//! Spawn and respawn placement for fighters.

use rand::Rng;

use vrdefense_core::constants::*;
use vrdefense_core::types::Vec3;

/// Starting point for a fresh fighter, in a box off the mothership's orbit.
pub fn initial_position<R: Rng>(rng: &mut R) -> Vec3 {
    let x = rng.gen_range(0..SPAWN_SPAN_X) as f64 + 50.0;
    let y = rng.gen_range(0..SPAWN_SPAN_Y) as f64 - 20.0;
    let z = rng.gen_range(0..SPAWN_SPAN_Z) as f64 - 50.0;
    Vec3::new(x, SPAWN_BASE_Y + y, z)
}

/// Re-entry point for a recycled fighter, biased toward the current waypoint.
pub fn respawn_position<R: Rng>(rng: &mut R, target: Vec3) -> Vec3 {
    let x = rng.gen_range(0..SPAWN_SPAN_X) as f64 + target.x / 2.0;
    let y = rng.gen_range(0..SPAWN_SPAN_Y) as f64 - 20.0;
    let z = rng.gen_range(0..SPAWN_SPAN_Z) as f64 + target.z / 2.0;
    Vec3::new(x, y, z)
}

/// Activation delay of the `index`-th fighter in the pool.
pub fn staggered_delay_ms(index: usize, first_ms: u64, step_ms: u64) -> u64 {
    first_ms + step_ms * index as u64
}
