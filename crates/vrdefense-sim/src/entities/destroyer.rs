//! Stationary defender with a burst-then-cooldown counter-attack.

use vrdefense_core::constants::*;
use vrdefense_core::enums::EntityMode;
use vrdefense_core::types::Vec3;

use crate::entities::{GameObject, HitFlash};
use crate::render::{RenderHandle, Scene};

#[derive(Debug, Clone)]
pub struct Destroyer {
    pub object: GameObject,
    position: Vec3,
    health: i32,
    next_attack_at: u64,
    attack_count: u32,
    flash: HitFlash,
}

impl Destroyer {
    pub fn new(handle: RenderHandle, position: Vec3) -> Self {
        Self {
            object: GameObject::new(handle, EntityMode::Moving),
            position,
            health: CAPITAL_HEALTH,
            next_attack_at: 0,
            attack_count: 0,
            flash: HitFlash::default(),
        }
    }

    pub fn update(&mut self, scene: &dyn Scene, now: u64) -> EntityMode {
        self.flash.update(scene, self.object.handle(), now);
        self.object.mode()
    }

    pub fn is_attacking_time(&self, now: u64) -> bool {
        now >= self.next_attack_at
    }

    /// Schedule the next shot: short gaps inside a burst, a long cooldown
    /// after the last shot of the burst.
    pub fn set_attack_time(&mut self, now: u64) {
        self.attack_count += 1;
        if self.attack_count < DESTROYER_BURST_LEN {
            self.next_attack_at = now + DESTROYER_BURST_INTERVAL_MS;
        } else {
            self.attack_count = 0;
            self.next_attack_at = now + DESTROYER_COOLDOWN_MS;
        }
    }

    /// Apply damage. Returns true if this hit destroyed the destroyer.
    pub fn attacked(&mut self, damage: i32, scene: &dyn Scene, now: u64) -> bool {
        self.health -= damage;
        self.flash.trigger(scene, self.object.handle(), now);
        if self.health < 0 && self.object.mode() != EntityMode::Destroyed {
            log::info!("destroyer destroyed");
            self.object.set_mode(EntityMode::Destroyed);
            return true;
        }
        false
    }

    /// Point counter-attack missiles launch from.
    pub fn launch_point(&self) -> Vec3 {
        self.position + Vec3::new(0.0, DESTROYER_LAUNCH_HEIGHT, 0.0)
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
