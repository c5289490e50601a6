//! Spawn factories for setting up a session.
//!
//! Creates the mothership, the viewpoint proxy, the destroyer and the
//! fighter pool, each backed by a renderable from the scene.

use rand::Rng;

use vrdefense_core::config::SimConfig;
use vrdefense_core::constants::FIGHTER_MAX_SPEED;
use vrdefense_core::types::Vec3;
use vrdefense_fighter_ai::profiles::resolve_max_speed;
use vrdefense_fighter_ai::spawn;

use crate::engine::SetupError;
use crate::entities::{Destroyer, Fighter, Mothership};
use crate::render::{Prototype, RenderHandle, Scene};

/// Where the mothership starts before the embedding begins moving it.
pub const MOTHERSHIP_START: Vec3 = Vec3::new(0.0, 15.0, 100.0);

/// Where the player's viewpoint proxy starts.
pub const VIEWPOINT_START: Vec3 = Vec3::new(0.0, 23.0, 100.0);

pub const DESTROYER_POSITION: Vec3 = Vec3::ZERO;

fn spawn_at(
    scene: &dyn Scene,
    prototype: Prototype,
    position: Vec3,
    what: &'static str,
) -> Result<RenderHandle, SetupError> {
    let handle = scene
        .spawn(prototype)
        .map_err(|source| SetupError::Spawn { what, source })?;
    scene.set_position(handle, position);
    Ok(handle)
}

pub fn spawn_mothership(scene: &dyn Scene, config: &SimConfig) -> Result<Mothership, SetupError> {
    let handle = spawn_at(scene, Prototype::Mothership, MOTHERSHIP_START, "mothership")?;
    Ok(Mothership::new(
        handle,
        MOTHERSHIP_START,
        config.tuning.mothership_attack_interval_ms,
    ))
}

pub fn spawn_viewpoint(scene: &dyn Scene) -> Result<RenderHandle, SetupError> {
    spawn_at(scene, Prototype::Viewpoint, VIEWPOINT_START, "viewpoint")
}

pub fn spawn_destroyer(scene: &dyn Scene) -> Result<Destroyer, SetupError> {
    let handle = spawn_at(scene, Prototype::Destroyer, DESTROYER_POSITION, "destroyer")?;
    Ok(Destroyer::new(handle, DESTROYER_POSITION))
}

/// Spawn the fighter pool with staggered activation times.
///
/// A fighter whose renderable cannot be created is left out of the pool.
/// The others keep the activation slot of their original index.
pub fn spawn_fighter_pool<R: Rng>(
    scene: &dyn Scene,
    rng: &mut R,
    config: &SimConfig,
    now: u64,
) -> Vec<Fighter> {
    let tuning = &config.tuning;
    let kind = config.fighter_kind;
    let max_speed = resolve_max_speed(kind, FIGHTER_MAX_SPEED);

    let mut fighters = Vec::with_capacity(config.fighter_count);
    for index in 0..config.fighter_count {
        let position = spawn::initial_position(rng);
        let handle = match scene.spawn(Prototype::Fighter(kind)) {
            Ok(handle) => handle,
            Err(err) => {
                log::warn!("fighter {index} left out of the pool: {err}");
                continue;
            }
        };
        scene.set_position(handle, position);
        let delay = spawn::staggered_delay_ms(
            index,
            tuning.fighter_first_delay_ms,
            tuning.fighter_delay_step_ms,
        );
        fighters.push(Fighter::new(
            handle,
            kind,
            position,
            tuning.fighter_target_offset,
            max_speed,
            now + delay,
        ));
    }
    log::info!(
        "spawned {} of {} fighters ({:?})",
        fighters.len(),
        config.fighter_count,
        kind
    );
    fighters
}
