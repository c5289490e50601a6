//! Missile launch geometry for every non-player faction.

use rand::Rng;

use vrdefense_core::constants::*;
use vrdefense_core::enums::Faction;
use vrdefense_core::events::GameEvent;
use vrdefense_core::types::{direction_and_distance, Vec3};

use crate::entities::Missile;
use crate::render::{Prototype, Scene};
use crate::shared::SharedState;

/// Spawn a missile renderable and append the missile to the live list.
/// Returns false if the scene could not provide the renderable.
pub fn spawn_missile(
    scene: &dyn Scene,
    shared: &SharedState,
    faction: Faction,
    from: Vec3,
    target: Vec3,
    speed: f64,
    now: u64,
) -> bool {
    let handle = match scene.spawn(Prototype::Missile(faction)) {
        Ok(handle) => handle,
        Err(err) => {
            log::warn!("{faction:?} missile not spawned: {err}");
            return false;
        }
    };
    scene.set_position(handle, from);
    let missile = Missile::launch(handle, faction, from, target, speed, now);
    shared.missiles().push(missile);
    shared.push_event(GameEvent::MissileLaunched { faction });
    true
}

/// Fire at the mothership from `origin`. Long shots launch further along
/// the line and fly faster.
pub fn attack_mothership(
    scene: &dyn Scene,
    shared: &SharedState,
    faction: Faction,
    origin: Vec3,
    mothership: Vec3,
    now: u64,
) -> bool {
    let (direction, distance) = direction_and_distance(origin, mothership);
    let long_range = distance > LONG_RANGE_DISTANCE;
    let (offset, speed) = if long_range {
        (LONG_RANGE_LAUNCH_OFFSET, MISSILE_LONG_RANGE_SPEED)
    } else {
        (SHORT_RANGE_LAUNCH_OFFSET, MISSILE_SPEED)
    };
    spawn_missile(
        scene,
        shared,
        faction,
        origin + direction * offset,
        mothership,
        speed,
        now,
    )
}

/// Mothership counter-attack toward a jittered point near the destroyer.
pub fn attack_destroyer<R: Rng>(
    scene: &dyn Scene,
    shared: &SharedState,
    rng: &mut R,
    origin: Vec3,
    destroyer: Vec3,
    now: u64,
) -> bool {
    let jitter = Vec3::new(
        rng.gen_range(0..MOTHERSHIP_AIM_JITTER) as f64,
        rng.gen_range(0..MOTHERSHIP_AIM_JITTER) as f64,
        rng.gen_range(0..MOTHERSHIP_AIM_JITTER) as f64,
    );
    let target = destroyer + jitter;
    let (direction, _) = direction_and_distance(origin, target);
    spawn_missile(
        scene,
        shared,
        Faction::Mothership,
        origin + direction * SHORT_RANGE_LAUNCH_OFFSET,
        target,
        MISSILE_SPEED,
        now,
    )
}
