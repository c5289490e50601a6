//! Rendering collaborator seam.
//!
//! The simulation never owns meshes or materials. It holds a
//! [`RenderHandle`] (a generational index into the scene's arena) per
//! entity and pushes pose changes through the [`Scene`] trait.
//! [`HeadlessScene`] is an in-memory implementation used by tests and by
//! the headless runner.

use std::collections::HashSet;
use std::fmt;
use std::sync::{Mutex, MutexGuard, PoisonError};

use serde::{Deserialize, Serialize};

use vrdefense_core::enums::{Faction, FighterKind};
use vrdefense_core::types::{Aabb, Vec3};
use vrdefense_fighter_ai::profiles::get_profile;

/// Opaque reference to a renderable in the scene.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RenderHandle {
    pub index: u32,
    pub generation: u32,
}

impl RenderHandle {
    pub fn new(index: u32, generation: u32) -> Self {
        Self { index, generation }
    }
}

impl fmt::Display for RenderHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "R{}g{}", self.index, self.generation)
    }
}

/// What to clone a new renderable from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Prototype {
    Mothership,
    Destroyer,
    /// Small proxy that follows the head-tracked camera.
    Viewpoint,
    Fighter(FighterKind),
    /// Missile tinted by its launching faction.
    Missile(Faction),
}

/// Failures reported by the rendering collaborator.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RenderError {
    #[error("prototype {prototype:?} failed to load: {reason}")]
    PrototypeLoad {
        prototype: Prototype,
        reason: String,
    },
}

/// Scene container plus prototype factory.
///
/// Implementations must be shareable across threads: the fire path spawns
/// missiles from whichever thread delivers the trigger.
pub trait Scene: Send + Sync {
    /// Clone `prototype` and add the copy to the scene.
    fn spawn(&self, prototype: Prototype) -> Result<RenderHandle, RenderError>;
    /// Detach and release a renderable. Unknown handles are ignored.
    fn remove(&self, handle: RenderHandle);
    fn position(&self, handle: RenderHandle) -> Option<Vec3>;
    fn set_position(&self, handle: RenderHandle, position: Vec3);
    /// Orient the renderable toward `point`.
    fn look_at(&self, handle: RenderHandle, point: Vec3);
    /// Toggle the damage highlight (bounding-volume outline).
    fn set_highlight(&self, handle: RenderHandle, on: bool);
    /// Bounding volume transformed by the current pose.
    fn world_bounds(&self, handle: RenderHandle) -> Option<Aabb>;
}

/// Half extents used by [`HeadlessScene`] for each prototype.
pub fn default_half_extents(prototype: Prototype) -> Vec3 {
    match prototype {
        Prototype::Mothership => Vec3::new(10.0, 4.0, 25.0),
        Prototype::Destroyer => Vec3::new(20.0, 6.0, 8.0),
        Prototype::Viewpoint => Vec3::splat(0.05),
        Prototype::Fighter(kind) => Vec3::splat(1.5 * get_profile(kind).render_scale),
        Prototype::Missile(_) => Vec3::splat(0.06),
    }
}

/// A renderable stored in the headless arena.
#[derive(Debug, Clone, PartialEq)]
pub struct SceneNode {
    pub prototype: Prototype,
    pub position: Vec3,
    pub facing: Option<Vec3>,
    pub highlighted: bool,
    pub half_extents: Vec3,
}

#[derive(Default)]
struct SceneArena {
    generations: Vec<u32>,
    nodes: Vec<Option<SceneNode>>,
    free_indices: Vec<u32>,
    failing: HashSet<Prototype>,
    spawned_total: u64,
}

impl SceneArena {
    fn insert(&mut self, node: SceneNode) -> RenderHandle {
        self.spawned_total += 1;
        if let Some(index) = self.free_indices.pop() {
            let slot = index as usize;
            self.nodes[slot] = Some(node);
            RenderHandle::new(index, self.generations[slot])
        } else {
            let index = self.nodes.len() as u32;
            self.nodes.push(Some(node));
            self.generations.push(0);
            RenderHandle::new(index, 0)
        }
    }

    fn remove(&mut self, handle: RenderHandle) {
        if self.get(handle).is_some() {
            let slot = handle.index as usize;
            self.nodes[slot] = None;
            self.generations[slot] += 1;
            self.free_indices.push(handle.index);
        }
    }

    fn get(&self, handle: RenderHandle) -> Option<&SceneNode> {
        let slot = handle.index as usize;
        if self.generations.get(slot).copied() != Some(handle.generation) {
            return None;
        }
        self.nodes.get(slot)?.as_ref()
    }

    fn get_mut(&mut self, handle: RenderHandle) -> Option<&mut SceneNode> {
        let slot = handle.index as usize;
        if self.generations.get(slot).copied() != Some(handle.generation) {
            return None;
        }
        self.nodes.get_mut(slot)?.as_mut()
    }
}

/// In-memory scene: a generational arena of nodes with fixed box extents.
#[derive(Default)]
pub struct HeadlessScene {
    arena: Mutex<SceneArena>,
}

impl HeadlessScene {
    pub fn new() -> Self {
        Self::default()
    }

    fn arena(&self) -> MutexGuard<'_, SceneArena> {
        self.arena.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Make every later spawn of `prototype` fail, as a broken asset would.
    pub fn fail_prototype(&self, prototype: Prototype) {
        self.arena().failing.insert(prototype);
    }

    /// Copy of the node behind `handle`, if it is still in the scene.
    pub fn node(&self, handle: RenderHandle) -> Option<SceneNode> {
        self.arena().get(handle).cloned()
    }

    pub fn contains(&self, handle: RenderHandle) -> bool {
        self.arena().get(handle).is_some()
    }

    /// Number of renderables currently in the scene.
    pub fn live_count(&self) -> usize {
        self.arena().nodes.iter().filter(|n| n.is_some()).count()
    }

    /// Number of renderables of one prototype currently in the scene.
    pub fn count_of(&self, prototype: Prototype) -> usize {
        self.arena()
            .nodes
            .iter()
            .flatten()
            .filter(|n| n.prototype == prototype)
            .count()
    }

    /// Total successful spawns since creation.
    pub fn spawned_total(&self) -> u64 {
        self.arena().spawned_total
    }
}

impl Scene for HeadlessScene {
    fn spawn(&self, prototype: Prototype) -> Result<RenderHandle, RenderError> {
        let mut arena = self.arena();
        if arena.failing.contains(&prototype) {
            return Err(RenderError::PrototypeLoad {
                prototype,
                reason: "asset unavailable".into(),
            });
        }
        Ok(arena.insert(SceneNode {
            prototype,
            position: Vec3::ZERO,
            facing: None,
            highlighted: false,
            half_extents: default_half_extents(prototype),
        }))
    }

    fn remove(&self, handle: RenderHandle) {
        self.arena().remove(handle);
    }

    fn position(&self, handle: RenderHandle) -> Option<Vec3> {
        self.arena().get(handle).map(|n| n.position)
    }

    fn set_position(&self, handle: RenderHandle, position: Vec3) {
        if let Some(node) = self.arena().get_mut(handle) {
            node.position = position;
        }
    }

    fn look_at(&self, handle: RenderHandle, point: Vec3) {
        if let Some(node) = self.arena().get_mut(handle) {
            node.facing = Some(point);
        }
    }

    fn set_highlight(&self, handle: RenderHandle, on: bool) {
        if let Some(node) = self.arena().get_mut(handle) {
            node.highlighted = on;
        }
    }

    fn world_bounds(&self, handle: RenderHandle) -> Option<Aabb> {
        self.arena()
            .get(handle)
            .map(|n| Aabb::from_center(n.position, n.half_extents))
    }
}
