//! Fighter flight finite state machine.
//!
//! Pure functions that compute mode transitions and velocity for one
//! fighter per frame. No renderer or engine dependency; operates on
//! plain data. Integration into position is left to the caller.

use vrdefense_core::constants::*;
use vrdefense_core::enums::EntityMode;
use vrdefense_core::types::{direction_and_distance, Vec3};

/// Input to the fighter FSM for a single frame.
pub struct FighterContext {
    pub mode: EntityMode,
    pub position: Vec3,
    pub velocity: Vec3,
    /// Current waypoint (mothership position plus vertical offset).
    pub target: Vec3,
    pub max_speed: f64,
    /// Impulse to add before clamping, if any.
    pub knockback: Option<Vec3>,
}

/// Output from the fighter FSM.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FighterUpdate {
    pub new_mode: EntityMode,
    /// Velocity after steering and speed clamp.
    pub new_velocity: Vec3,
    pub mode_changed: bool,
    /// Turn finished: the caller flips the sign of the vertical offset.
    pub flip_offset: bool,
    /// Recycle point reached: the caller restores health, offset and position.
    pub respawn: bool,
}

/// Evaluate the FSM for one fighter.
pub fn evaluate(ctx: &FighterContext) -> FighterUpdate {
    let (direction, distance) = direction_and_distance(ctx.position, ctx.target);
    let steer = direction * FIGHTER_ACCEL;

    let mut velocity = ctx.velocity;
    let mut new_mode = ctx.mode;
    let mut flip_offset = false;
    let mut respawn = false;

    match ctx.mode {
        EntityMode::Attack => {
            if distance < TURN_THRESHOLD {
                new_mode = EntityMode::Turn;
            } else {
                velocity += steer;
            }
        }
        EntityMode::Turn => {
            // No steering: coast past the waypoint until far enough for another pass
            if distance > WAYPOINT_DISTANCE {
                new_mode = EntityMode::Attack;
                flip_offset = true;
            }
        }
        EntityMode::Dying => {
            if distance < SINK_ARRIVAL_RADIUS {
                new_mode = EntityMode::Destroyed;
            } else {
                velocity += steer;
            }
        }
        EntityMode::Destroyed => {
            if distance < SINK_ARRIVAL_RADIUS {
                new_mode = EntityMode::Attack;
                respawn = true;
            } else {
                velocity += steer;
            }
        }
        // Fighters are never spawned in the generic mode; treat it as an attack pass.
        EntityMode::Moving => {
            new_mode = EntityMode::Attack;
            velocity += steer;
        }
    }

    if let Some(impulse) = ctx.knockback {
        if matches!(new_mode, EntityMode::Attack | EntityMode::Turn) {
            velocity += impulse.normalize_or_zero() * KNOCKBACK_ACCEL;
        }
    }

    FighterUpdate {
        new_mode,
        new_velocity: clamp_speed(velocity, FIGHTER_MIN_SPEED, ctx.max_speed),
        mode_changed: new_mode != ctx.mode,
        flip_offset,
        respawn,
    }
}

/// Rescale `velocity` so its magnitude lies in `[min_speed, max_speed]`.
/// A zero vector stays zero (there is no direction to scale).
pub fn clamp_speed(velocity: Vec3, min_speed: f64, max_speed: f64) -> Vec3 {
    let speed = velocity.length();
    if speed == 0.0 {
        return Vec3::ZERO;
    }
    let clamped = speed.min(max_speed).max(min_speed);
    velocity / speed * clamped
}
