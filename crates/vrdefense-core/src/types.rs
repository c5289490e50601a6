//! Fundamental geometric and simulation types.

use glam::DVec3;
use serde::{Deserialize, Serialize};

/// 3D vector in world units. Y is up.
pub type Vec3 = DVec3;

/// Axis-aligned bounding volume in world space.
///
/// The scene collaborator reports one of these per renderable handle,
/// already transformed by the handle's current pose.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    pub min: Vec3,
    pub max: Vec3,
}

/// Frame bookkeeping for the simulation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimTime {
    /// Number of frames that actually advanced the simulation.
    pub frame: u64,
    /// Simulation timestamp (ms) of the last advanced frame.
    pub now_ms: u64,
}

impl Aabb {
    pub fn new(min: Vec3, max: Vec3) -> Self {
        Self {
            min: min.min(max),
            max: min.max(max),
        }
    }

    /// Box centred on `center` with the given half extents.
    pub fn from_center(center: Vec3, half_extents: Vec3) -> Self {
        let half = half_extents.abs();
        Self {
            min: center - half,
            max: center + half,
        }
    }

    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    pub fn half_extents(&self) -> Vec3 {
        (self.max - self.min) * 0.5
    }

    /// Overlap test. Touching faces count as intersecting.
    pub fn intersects(&self, other: &Aabb) -> bool {
        self.min.x <= other.max.x
            && self.max.x >= other.min.x
            && self.min.y <= other.max.y
            && self.max.y >= other.min.y
            && self.min.z <= other.max.z
            && self.max.z >= other.min.z
    }

    pub fn contains(&self, point: Vec3) -> bool {
        point.cmpge(self.min).all() && point.cmple(self.max).all()
    }
}

impl SimTime {
    /// Record one advanced frame at `now_ms`.
    pub fn advance(&mut self, now_ms: u64) {
        self.frame += 1;
        self.now_ms = now_ms;
    }
}

/// Unit vector from `from` toward `to` and the distance between them.
/// Returns a zero vector when the points coincide.
pub fn direction_and_distance(from: Vec3, to: Vec3) -> (Vec3, f64) {
    let delta = to - from;
    let distance = delta.length();
    (delta.normalize_or_zero(), distance)
}
