//! Scripted flight paths for the mothership and the player's viewpoint.
//!
//! Both follow a closed Catmull-Rom curve around the battlefield, one lap
//! every `ORBIT_PERIOD_MS`. The viewpoint's curve is the mothership's
//! nudged by `VIEWPOINT_OFFSET` so the player rides just above and beside
//! the ship.

use vrdefense_core::constants::{ORBIT_ALTITUDE, ORBIT_PERIOD_MS, ORBIT_RADIUS, VIEWPOINT_OFFSET};
use vrdefense_core::types::Vec3;
use vrdefense_sim::render::{RenderHandle, Scene};

/// Closed uniform Catmull-Rom spline through a loop of control points.
#[derive(Debug, Clone, PartialEq)]
pub struct ClosedSpline {
    points: Vec<Vec3>,
}

impl ClosedSpline {
    /// Needs at least two points; fewer collapse to a fixed point.
    pub fn new(points: Vec<Vec3>) -> Self {
        Self { points }
    }

    /// Point at `u` laps around the loop. Only the fractional part matters.
    pub fn point_at(&self, u: f64) -> Vec3 {
        let n = self.points.len();
        match n {
            0 => return Vec3::ZERO,
            1 => return self.points[0],
            _ => {}
        }
        let scaled = u.rem_euclid(1.0) * n as f64;
        let segment = (scaled.floor() as usize).min(n - 1);
        let t = scaled - segment as f64;

        let p0 = self.points[(segment + n - 1) % n];
        let p1 = self.points[segment];
        let p2 = self.points[(segment + 1) % n];
        let p3 = self.points[(segment + 2) % n];

        let t2 = t * t;
        let t3 = t2 * t;
        0.5 * ((2.0 * p1)
            + (p2 - p0) * t
            + (2.0 * p0 - 5.0 * p1 + 4.0 * p2 - p3) * t2
            + (3.0 * p1 - p0 - 3.0 * p2 + p3) * t3)
    }
}

/// Drives the mothership and viewpoint renderables along their paths.
#[derive(Debug, Clone)]
pub struct OrbitDriver {
    mothership_path: ClosedSpline,
    viewpoint_path: ClosedSpline,
    period_ms: u64,
}

impl Default for OrbitDriver {
    fn default() -> Self {
        Self::new(ORBIT_PERIOD_MS)
    }
}

impl OrbitDriver {
    pub fn new(period_ms: u64) -> Self {
        let (r, h, o) = (ORBIT_RADIUS, ORBIT_ALTITUDE, VIEWPOINT_OFFSET);
        Self {
            mothership_path: ClosedSpline::new(vec![
                Vec3::new(0.0, h, r),
                Vec3::new(-r, h, 0.0),
                Vec3::new(0.0, h, -r),
                Vec3::new(r, h, 0.0),
            ]),
            viewpoint_path: ClosedSpline::new(vec![
                Vec3::new(0.0, h + o, r),
                Vec3::new(-r + o, h, 0.0),
                Vec3::new(0.0, h - o, -r),
                Vec3::new(r + o, h, 0.0),
            ]),
            period_ms: period_ms.max(1),
        }
    }

    fn lap_fraction(&self, now_ms: u64) -> f64 {
        (now_ms % self.period_ms) as f64 / self.period_ms as f64
    }

    pub fn mothership_at(&self, now_ms: u64) -> Vec3 {
        self.mothership_path.point_at(self.lap_fraction(now_ms))
    }

    pub fn viewpoint_at(&self, now_ms: u64) -> Vec3 {
        self.viewpoint_path.point_at(self.lap_fraction(now_ms))
    }

    /// Move both renderables to their pose at `now_ms`. The mothership
    /// faces along its path; the viewpoint's orientation belongs to the
    /// head tracker.
    pub fn apply(
        &self,
        scene: &dyn Scene,
        mothership: RenderHandle,
        viewpoint: RenderHandle,
        now_ms: u64,
    ) {
        let u = self.lap_fraction(now_ms);
        let position = self.mothership_path.point_at(u);
        let ahead = self.mothership_path.point_at(u + 0.001);
        scene.set_position(mothership, position);
        scene.look_at(mothership, ahead);
        scene.set_position(viewpoint, self.viewpoint_path.point_at(u));
    }
}
