//! The capital ship the player defends.
//!
//! Its pose is driven by the embedding (it flies a scripted path), so each
//! update reads the position back from the scene rather than integrating.

use vrdefense_core::constants::CAPITAL_HEALTH;
use vrdefense_core::enums::EntityMode;
use vrdefense_core::types::Vec3;

use crate::entities::{GameObject, HitFlash};
use crate::render::{RenderHandle, Scene};

#[derive(Debug, Clone)]
pub struct Mothership {
    pub object: GameObject,
    position: Vec3,
    health: i32,
    attack_interval_ms: u64,
    next_attack_at: u64,
    flash: HitFlash,
}

impl Mothership {
    pub fn new(handle: RenderHandle, position: Vec3, attack_interval_ms: u64) -> Self {
        Self {
            object: GameObject::new(handle, EntityMode::Moving),
            position,
            health: CAPITAL_HEALTH,
            attack_interval_ms,
            next_attack_at: 0,
            flash: HitFlash::default(),
        }
    }

    pub fn update(&mut self, scene: &dyn Scene, now: u64) -> EntityMode {
        match scene.position(self.object.handle()) {
            Some(position) => self.position = position,
            None => log::warn!(
                "mothership handle {} has no pose; keeping last position",
                self.object.handle()
            ),
        }
        self.flash.update(scene, self.object.handle(), now);
        self.object.refresh_bounds(scene);
        self.object.mode()
    }

    pub fn is_attacking_time(&self, now: u64) -> bool {
        now >= self.next_attack_at
    }

    pub fn set_attack_time(&mut self, now: u64) {
        self.next_attack_at = now + self.attack_interval_ms;
    }

    /// Apply damage. Returns true if this hit destroyed the mothership.
    pub fn attacked(&mut self, damage: i32, scene: &dyn Scene, now: u64) -> bool {
        self.health -= damage;
        self.flash.trigger(scene, self.object.handle(), now);
        if self.health < 0 && self.object.mode() != EntityMode::Destroyed {
            log::info!("mothership destroyed");
            self.object.set_mode(EntityMode::Destroyed);
            return true;
        }
        false
    }

    pub fn is_destroyed(&self) -> bool {
        self.object.mode() == EntityMode::Destroyed
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn health(&self) -> i32 {
        self.health
    }

    pub fn next_attack_at(&self) -> u64 {
        self.next_attack_at
    }

    pub fn is_flashing(&self) -> bool {
        self.flash.is_visible()
    }
}
