//! Enemy fighter: weaving attack passes, shot down, recycled.
//!
//! Flight decisions come from the pure FSM in `vrdefense-fighter-ai`; this
//! type owns the mutable state and applies the FSM's verdict.

use rand::Rng;

use vrdefense_core::constants::*;
use vrdefense_core::enums::{EntityMode, FighterKind};
use vrdefense_core::types::Vec3;
use vrdefense_fighter_ai::fsm::{self, FighterContext};
use vrdefense_fighter_ai::spawn;

use crate::entities::{GameObject, HitFlash};
use crate::render::{RenderHandle, Scene};

/// Outcome of one fighter update.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FighterTick {
    pub mode: EntityMode,
    pub respawned: bool,
}

#[derive(Debug, Clone)]
pub struct Fighter {
    pub object: GameObject,
    kind: FighterKind,
    position: Vec3,
    velocity: Vec3,
    /// Mothership position the waypoint hangs off.
    anchor: Vec3,
    target: Vec3,
    attack_vector: Vec3,
    health: i32,
    y_offset: f64,
    /// Offset to restore on respawn.
    restore_offset: f64,
    max_speed: f64,
    active_at: u64,
    last_launch: Option<u64>,
    flash: HitFlash,
}

impl Fighter {
    pub fn new(
        handle: RenderHandle,
        kind: FighterKind,
        position: Vec3,
        y_offset: f64,
        max_speed: f64,
        active_at: u64,
    ) -> Self {
        Self {
            object: GameObject::new(handle, EntityMode::Attack),
            kind,
            position,
            velocity: Vec3::ZERO,
            anchor: Vec3::ZERO,
            target: position,
            attack_vector: Vec3::ZERO,
            health: FIGHTER_HEALTH,
            y_offset,
            restore_offset: y_offset,
            max_speed,
            active_at,
            last_launch: None,
            flash: HitFlash::default(),
        }
    }

    /// Re-aim at the mothership; the waypoint sits `y_offset` above it.
    pub fn set_target(&mut self, mothership: Vec3) {
        self.anchor = mothership;
        self.target = mothership + Vec3::new(0.0, self.y_offset, 0.0);
    }

    /// Whether the spawn delay has elapsed.
    pub fn is_active(&self, now: u64) -> bool {
        now >= self.active_at
    }

    pub fn is_ready_to_attack(&self, now: u64) -> bool {
        self.is_active(now)
            && self.object.mode() == EntityMode::Attack
            && self
                .last_launch
                .map_or(true, |at| now >= at + FIGHTER_LAUNCH_INTERVAL_MS)
    }

    pub fn set_attack_time(&mut self, now: u64) {
        self.last_launch = Some(now);
    }

    /// Apply damage. Returns true if this hit took the fighter down.
    pub fn attacked(&mut self, damage: i32, scene: &dyn Scene, now: u64) -> bool {
        self.health -= damage;
        self.flash.trigger(scene, self.object.handle(), now);
        if self.health < 0 && self.object.is_alive() {
            self.object.set_mode(EntityMode::Dying);
            self.restore_offset = self.y_offset;
            self.y_offset = DYING_SINK_OFFSET;
            self.set_target(self.anchor);
            return true;
        }
        false
    }

    /// Remember the direction of the last hit (used for knockback).
    pub fn set_attack_vector(&mut self, vector: Vec3) {
        self.attack_vector = vector;
    }

    /// Advance one frame. Inert fighters are left untouched.
    pub fn update<R: Rng>(
        &mut self,
        scene: &dyn Scene,
        rng: &mut R,
        now: u64,
        knockback: bool,
    ) -> FighterTick {
        self.flash.update(scene, self.object.handle(), now);
        if !self.is_active(now) {
            return FighterTick {
                mode: self.object.mode(),
                respawned: false,
            };
        }

        let impulse = (knockback && self.flash.is_active(now) && self.attack_vector != Vec3::ZERO)
            .then_some(self.attack_vector);
        let update = fsm::evaluate(&FighterContext {
            mode: self.object.mode(),
            position: self.position,
            velocity: self.velocity,
            target: self.target,
            max_speed: self.max_speed,
            knockback: impulse,
        });

        if update.mode_changed {
            log::debug!(
                "fighter {}: {:?} -> {:?}",
                self.object.handle(),
                self.object.mode(),
                update.new_mode
            );
        }
        self.object.set_mode(update.new_mode);
        self.velocity = update.new_velocity;

        if update.flip_offset {
            self.y_offset = -self.y_offset;
            self.set_target(self.anchor);
        }
        if update.respawn {
            self.health = FIGHTER_HEALTH;
            self.y_offset = self.restore_offset;
            self.set_target(self.anchor);
            self.position = spawn::respawn_position(rng, self.target);
            self.attack_vector = Vec3::ZERO;
        }

        self.position += self.velocity;
        scene.set_position(self.object.handle(), self.position);
        scene.look_at(self.object.handle(), self.position + self.velocity);
        self.object.refresh_bounds(scene);

        FighterTick {
            mode: update.new_mode,
            respawned: update.respawn,
        }
    }

    pub fn kind(&self) -> FighterKind {
        self.kind
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn velocity(&self) -> Vec3 {
        self.velocity
    }

    pub fn target(&self) -> Vec3 {
        self.target
    }

    pub fn health(&self) -> i32 {
        self.health
    }

    pub fn y_offset(&self) -> f64 {
        self.y_offset
    }

    pub fn attack_vector(&self) -> Vec3 {
        self.attack_vector
    }

    pub fn active_at(&self) -> u64 {
        self.active_at
    }

    pub fn is_flashing(&self) -> bool {
        self.flash.is_visible()
    }

    #[cfg(test)]
    pub(crate) fn place(&mut self, position: Vec3) {
        self.position = position;
    }
}
