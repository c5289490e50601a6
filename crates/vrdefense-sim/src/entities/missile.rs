//! Straight-line projectile.

use vrdefense_core::constants::{MISSILE_ARRIVAL_RADIUS, MISSILE_SPEED, MISSILE_TTL_MS};
use vrdefense_core::enums::{EntityMode, Faction};
use vrdefense_core::types::Vec3;

use crate::entities::GameObject;
use crate::render::{RenderHandle, Scene};

/// A missile flying at constant velocity toward a fixed point.
#[derive(Debug, Clone)]
pub struct Missile {
    pub object: GameObject,
    faction: Faction,
    position: Vec3,
    velocity: Vec3,
    target: Vec3,
    speed: f64,
    spawned_at: u64,
}

impl Missile {
    pub fn new(handle: RenderHandle, faction: Faction, position: Vec3, now: u64) -> Self {
        Self {
            object: GameObject::new(handle, EntityMode::Moving),
            faction,
            position,
            velocity: Vec3::ZERO,
            target: position,
            speed: MISSILE_SPEED,
            spawned_at: now,
        }
    }

    /// Build a missile already aimed at `target` with the given speed.
    pub fn launch(
        handle: RenderHandle,
        faction: Faction,
        from: Vec3,
        target: Vec3,
        speed: f64,
        now: u64,
    ) -> Self {
        let mut missile = Self::new(handle, faction, from, now);
        missile.set_speed(speed);
        missile.set_target(target);
        missile
    }

    /// Aim at `target`; velocity becomes `normalize(target - position) * speed`.
    pub fn set_target(&mut self, target: Vec3) {
        self.target = target;
        self.velocity = (target - self.position).normalize_or_zero() * self.speed;
    }

    /// Change the speed, keeping the current heading.
    pub fn set_speed(&mut self, speed: f64) {
        self.speed = speed;
        self.velocity = self.velocity.normalize_or_zero() * speed;
    }

    /// Advance one frame. Once `Destroyed` the missile stays put and the
    /// caller must reap it.
    pub fn update(&mut self, scene: &dyn Scene, now: u64) -> EntityMode {
        if self.object.mode() == EntityMode::Destroyed {
            return EntityMode::Destroyed;
        }
        let arrived = self.position.distance(self.target) < MISSILE_ARRIVAL_RADIUS;
        let expired = now >= self.spawned_at + MISSILE_TTL_MS;
        if arrived || expired {
            self.object.set_mode(EntityMode::Destroyed);
            return EntityMode::Destroyed;
        }
        self.position += self.velocity;
        scene.set_position(self.object.handle(), self.position);
        self.object.mode()
    }

    pub fn faction(&self) -> Faction {
        self.faction
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

    pub fn speed(&self) -> f64 {
        self.speed
    }

    pub fn spawned_at(&self) -> u64 {
        self.spawned_at
    }

    /// Direction of travel.
    pub fn facing(&self) -> Vec3 {
        self.velocity.normalize_or_zero()
    }
}
