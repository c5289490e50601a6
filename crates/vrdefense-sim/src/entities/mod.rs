//! Simulation entities.
//!
//! Each entity type wraps a [`GameObject`] (mode, render handle, bounding
//! volume) and adds its own update rule. There is no trait hierarchy; the
//! engine knows the concrete types.

pub mod destroyer;
pub mod fighter;
pub mod missile;
pub mod mothership;

pub use destroyer::Destroyer;
pub use fighter::Fighter;
pub use missile::Missile;
pub use mothership::Mothership;

use vrdefense_core::constants::HIT_FLASH_MS;
use vrdefense_core::enums::EntityMode;
use vrdefense_core::types::Aabb;

use crate::render::{RenderHandle, Scene};

/// State shared by every entity.
#[derive(Debug, Clone)]
pub struct GameObject {
    mode: EntityMode,
    handle: RenderHandle,
    bounds: Option<Aabb>,
}

impl GameObject {
    pub fn new(handle: RenderHandle, mode: EntityMode) -> Self {
        Self {
            mode,
            handle,
            bounds: None,
        }
    }

    pub fn mode(&self) -> EntityMode {
        self.mode
    }

    pub fn set_mode(&mut self, mode: EntityMode) {
        self.mode = mode;
    }

    pub fn is_alive(&self) -> bool {
        self.mode.is_alive()
    }

    pub fn handle(&self) -> RenderHandle {
        self.handle
    }

    /// Recompute the bounding volume from the renderable's current pose.
    pub fn refresh_bounds(&mut self, scene: &dyn Scene) {
        self.bounds = scene.world_bounds(self.handle);
        if self.bounds.is_none() {
            log::warn!("no bounding volume for {}; skipping collisions", self.handle);
        }
    }

    pub fn bounds(&self) -> Option<&Aabb> {
        self.bounds.as_ref()
    }

    /// Overlap test against another entity. False if either volume is missing.
    pub fn intersects(&self, other: &GameObject) -> bool {
        match (&self.bounds, &other.bounds) {
            (Some(a), Some(b)) => a.intersects(b),
            _ => false,
        }
    }
}

/// Timed damage highlight, independent of mode transitions.
#[derive(Debug, Clone, Copy, Default)]
pub struct HitFlash {
    hit_at: Option<u64>,
    visible: bool,
}

impl HitFlash {
    /// Show the highlight and restart the window.
    pub fn trigger(&mut self, scene: &dyn Scene, handle: RenderHandle, now: u64) {
        self.hit_at = Some(now);
        self.visible = true;
        scene.set_highlight(handle, true);
    }

    /// Hide the highlight once the window has elapsed.
    pub fn update(&mut self, scene: &dyn Scene, handle: RenderHandle, now: u64) {
        if self.visible && !self.is_active(now) {
            self.visible = false;
            scene.set_highlight(handle, false);
        }
    }

    /// Whether `now` falls inside the highlight window.
    pub fn is_active(&self, now: u64) -> bool {
        self.hit_at
            .is_some_and(|hit_at| now < hit_at + HIT_FLASH_MS)
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }
}
